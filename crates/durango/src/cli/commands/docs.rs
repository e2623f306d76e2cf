//! Docs commands - build and serve the MkDocs site

use clap::Args;
use tracing::info;

use durango_core::DocsConfig;
use durango_tasks::{DocsBuildTask, DocsServeTask};

use super::run_single;
use crate::cli::{output, Cli};

/// Build the MkDocs site
#[derive(Debug, Args)]
pub struct DocsBuildCommand {
    /// Do not fail on warnings
    #[arg(long)]
    pub no_strict: bool,
}

impl DocsBuildCommand {
    pub fn task(&self) -> DocsBuildTask {
        DocsBuildTask {
            strict: !self.no_strict,
        }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = !self.no_strict, "executing docs-build command");
        let config = cli.load_config()?;
        run_single(cli, &config, &self.task(), "Documentation built")
    }
}

/// Serve the MkDocs site locally
#[derive(Debug, Args)]
pub struct DocsServeCommand {
    /// Bind address (defaults to docs.host from config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (defaults to docs.port from config)
    #[arg(long)]
    pub port: Option<u16>,
}

impl DocsServeCommand {
    /// Build the task, falling back to the configured address
    pub fn task(&self, docs: &DocsConfig) -> DocsServeTask {
        DocsServeTask {
            host: self.host.clone().unwrap_or_else(|| docs.host.clone()),
            port: self.port.unwrap_or(docs.port),
        }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = cli.load_config()?;
        let task = self.task(&config.docs);
        info!(host = %task.host, port = task.port, "executing docs-serve command");

        if !cli.quiet && !cli.dry_run {
            output::info(&format!(
                "Serving docs at http://{}:{} (Ctrl+C to stop)",
                task.host, task.port
            ));
        }
        cli.run_task(&config, &task)
    }
}
