//! Sync command - install the project environment with uv

use clap::Args;
use tracing::info;

use durango_tasks::SyncTask;

use super::run_single;
use crate::cli::Cli;

/// Synchronise the environment with the lockfile
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Skip the dev and docs extras
    #[arg(long)]
    pub no_dev: bool,
}

impl SyncCommand {
    pub fn task(&self) -> SyncTask {
        SyncTask { dev: !self.no_dev }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dev = !self.no_dev, "executing sync command");
        let config = cli.load_config()?;
        run_single(cli, &config, &self.task(), "Environment synchronised")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{parse, record};
    use crate::cli::Commands;
    use durango_core::Config;

    fn sync(args: &[&str]) -> Vec<String> {
        let cli = parse(args);
        match &cli.command {
            Commands::Sync(cmd) => record(&cli, &Config::default(), &cmd.task()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sync_installs_extras_by_default() {
        assert_eq!(sync(&["sync"]), vec!["uv sync --extra dev --extra docs"]);
    }

    #[test]
    fn test_sync_without_dev() {
        assert_eq!(sync(&["sync", "--no-dev"]), vec!["uv sync"]);
    }
}
