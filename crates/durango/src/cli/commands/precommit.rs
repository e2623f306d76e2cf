//! Precommit command - run pre-commit hooks

use clap::Args;
use tracing::info;

use durango_tasks::PrecommitTask;

use super::run_single;
use crate::cli::Cli;

/// Run the configured pre-commit hooks
#[derive(Debug, Args)]
pub struct PrecommitCommand {
    /// Run hooks across the entire repository
    #[arg(long)]
    pub all_files: bool,
}

impl PrecommitCommand {
    pub fn task(&self) -> PrecommitTask {
        PrecommitTask {
            all_files: self.all_files,
        }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(all_files = self.all_files, "executing precommit command");
        let config = cli.load_config()?;
        run_single(cli, &config, &self.task(), "Pre-commit hooks passed")
    }
}
