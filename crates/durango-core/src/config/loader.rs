//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }

    let format = if path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml")
    {
        "YAML"
    } else {
        "TOML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// File names are tried in [`config_file_names`] order at each level; the
/// nearest directory wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration, falling back to defaults when no file exists.
///
/// Unlike a plain "or default", a file that exists but fails to parse or
/// validate is reported as an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            debug!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PtyMode;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("durango.toml");
        std::fs::write(&config_path, "[run]\nprogram = \"uv\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("durango.toml");
        let yaml_path = temp.path().join("durango.yaml");
        std::fs::write(&toml_path, "[run]\necho = true").unwrap();
        std::fs::write(&yaml_path, "run:\n  echo: false").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_walks_up_to_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".durango.toml");
        std::fs::write(&config_path, "[docs]\nport = 9000").unwrap();
        let nested = temp.path().join("src").join("pkg");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("durango.toml");
        std::fs::write(
            &config_path,
            "[run]\nprogram = \"uvx\"\npty = \"always\"\n\n[run.env]\nFORCE_COLOR = \"1\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.run.program, "uvx");
        assert_eq!(config.run.pty, PtyMode::Always);
        assert_eq!(config.run.env.get("FORCE_COLOR"), Some(&"1".to_string()));
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("durango.yaml");
        std::fs::write(
            &config_path,
            "layout:\n  source: [lib]\n  tests: [checks]\ndocs:\n  port: 8080\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.layout.source, vec!["lib"]);
        assert_eq!(config.layout.tests, vec!["checks"]);
        assert_eq!(config.docs.port, 8080);
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_config(&temp.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_or_default_reports_invalid_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("durango.toml"), "[docs]\nport = 0\n").unwrap();

        assert!(load_config_or_default(temp.path()).is_err());
    }
}
