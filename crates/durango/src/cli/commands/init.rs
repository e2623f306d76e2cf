//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use durango_core::config::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::{output, Cli};

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Target path, relative to `cwd` unless `--output` is absolute
    pub fn target(&self, cwd: &Path) -> PathBuf {
        match &self.output {
            Some(path) => cwd.join(path),
            None => cwd.join(DEFAULT_CONFIG_TOML),
        }
    }

    /// Write the default configuration, refusing to replace an existing file
    /// unless `--force` is given.
    pub fn write(&self, cwd: &Path) -> anyhow::Result<PathBuf> {
        let path = self.target(cwd);
        if path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }
        std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(path)
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;

        if cli.dry_run {
            output::info(&format!("Would write {}", self.target(&cwd).display()));
            print!("{}", DEFAULT_CONFIG_TEMPLATE);
            return Ok(());
        }

        let path = self.write(&cwd)?;
        if !cli.quiet {
            output::success(&format!("Created {}", path.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use durango_core::config::load_config;
    use durango_core::Config;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand {
            force: false,
            output: None,
        };

        let path = cmd.write(temp.path()).unwrap();
        assert_eq!(path, temp.path().join("durango.toml"));
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("durango.toml");
        std::fs::write(&existing, "[run]\nprogram = \"uvx\"\n").unwrap();

        let cmd = InitCommand {
            force: false,
            output: None,
        };
        assert!(cmd.write(temp.path()).is_err());
        assert!(std::fs::read_to_string(&existing).unwrap().contains("uvx"));

        let forced = InitCommand {
            force: true,
            output: None,
        };
        forced.write(temp.path()).unwrap();
        assert!(!std::fs::read_to_string(&existing).unwrap().contains("uvx"));
    }

    #[test]
    fn test_init_custom_output() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand {
            force: false,
            output: Some(PathBuf::from(".durango.toml")),
        };
        let path = cmd.write(temp.path()).unwrap();
        assert!(path.ends_with(".durango.toml"));
        assert!(path.is_file());
    }
}
