//! Mypy command - type check the source tree

use clap::Args;
use tracing::info;

use durango_tasks::MypyTask;

use super::run_single;
use crate::cli::Cli;

/// Type check the source directories
#[derive(Debug, Args)]
pub struct MypyCommand {}

impl MypyCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing mypy command");
        let config = cli.load_config()?;
        run_single(cli, &config, &MypyTask, "Type check passed")
    }
}
