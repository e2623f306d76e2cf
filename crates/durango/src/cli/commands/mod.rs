//! CLI commands

mod ci;
mod completions;
mod docs;
mod init;
mod lint;
mod list;
mod mypy;
mod precommit;
mod sync;
mod tests;

pub use ci::CiCommand;
pub use completions::CompletionsCommand;
pub use docs::{DocsBuildCommand, DocsServeCommand};
pub use init::InitCommand;
pub use lint::LintCommand;
pub use list::ListCommand;
pub use mypy::MypyCommand;
pub use precommit::PrecommitCommand;
pub use sync::SyncCommand;
pub use tests::TestsCommand;

use durango_core::Config;
use durango_tasks::Task;

use crate::cli::{output, Cli};

/// Run one task with the loaded configuration and report success
fn run_single(cli: &Cli, config: &Config, task: &dyn Task, done: &str) -> anyhow::Result<()> {
    cli.run_task(config, task)?;

    if !cli.quiet && !cli.dry_run {
        output::success(done);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use clap::Parser;
    use durango_core::Config;
    use durango_tasks::{RecordingRunner, Task};

    use crate::cli::{Cli, Commands};

    pub fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["durango"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    pub fn command(args: &[&str]) -> Commands {
        parse(args).command
    }

    /// Run a task through a recording runner and return its command lines
    pub fn record(cli: &Cli, config: &Config, task: &dyn Task) -> Vec<String> {
        let runner = Arc::new(RecordingRunner::new());
        cli.task_context(config, runner.clone()).run(task).unwrap();
        runner.command_lines()
    }
}
