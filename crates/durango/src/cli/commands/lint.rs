//! Lint command - Ruff format check and lint

use clap::Args;
use tracing::info;

use durango_tasks::LintTask;

use super::run_single;
use crate::cli::Cli;

/// Run Ruff over the source and test directories
#[derive(Debug, Args)]
pub struct LintCommand {
    /// Apply Ruff auto-fixes where possible
    #[arg(long)]
    pub fix: bool,

    /// Run `ruff format --check` before linting
    #[arg(long)]
    pub check_format: bool,
}

impl LintCommand {
    pub fn task(&self) -> LintTask {
        LintTask {
            fix: self.fix,
            check_format: self.check_format,
        }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            fix = self.fix,
            check_format = self.check_format,
            "executing lint command"
        );
        let config = cli.load_config()?;
        run_single(cli, &config, &self.task(), "Lint passed")
    }
}
