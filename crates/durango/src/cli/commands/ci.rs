//! CI command - run the same checks CI runs, in order

use std::sync::Arc;

use clap::Args;
use tracing::info;

use durango_tasks::{Pipeline, ProcessRunner};

use crate::cli::Cli;

/// Run lint (with format check), mypy, tests and docs-build
#[derive(Debug, Args)]
pub struct CiCommand {}

impl CiCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let pipeline = Pipeline::ci();
        info!(steps = pipeline.step_names().len(), "executing ci command");

        let config = cli.load_config()?;
        let ctx = cli.task_context(&config, Arc::new(ProcessRunner::new()));
        pipeline.run(&ctx)?;
        Ok(())
    }
}
