//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use durango_core::config::{is_valid_env_key, load_config, load_config_or_default};
use durango_core::{Config, PtyMode};
use durango_tasks::{
    CommandRunner, ProcessRunner, Task, TaskContext, TaskReporterRegistry,
};

use commands::{
    CiCommand, CompletionsCommand, DocsBuildCommand, DocsServeCommand, InitCommand, LintCommand,
    ListCommand, MypyCommand, PrecommitCommand, SyncCommand, TestsCommand,
};
use output::ConsoleReporter;

/// Durango - developer tasks for the Durango project
#[derive(Debug, Parser)]
#[command(name = "durango")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Path to a configuration file (skips the upward search)
    #[arg(short, long, global = true, env = "DURANGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Do not print commands before running them
    #[arg(long, global = true)]
    pub no_echo: bool,

    /// Pseudo-terminal usage (overrides config file)
    #[arg(long, global = true, value_enum)]
    pub pty: Option<PtyArg>,

    /// Extra environment variable for the child process (repeatable)
    #[arg(
        short,
        long = "env",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_env_pair
    )]
    pub env: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Pseudo-terminal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PtyArg {
    /// Only when stdout is a terminal
    Auto,
    /// Always
    Always,
    /// Never; inherit stdio
    Never,
}

impl From<PtyArg> for PtyMode {
    fn from(arg: PtyArg) -> Self {
        match arg {
            PtyArg::Auto => PtyMode::Auto,
            PtyArg::Always => PtyMode::Always,
            PtyArg::Never => PtyMode::Never,
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synchronise the environment with uv
    Sync(SyncCommand),

    /// Run Ruff format check and lint
    Lint(LintCommand),

    /// Run the pytest suite
    Tests(TestsCommand),

    /// Type check the source tree with MyPy
    Mypy(MypyCommand),

    /// Run the configured pre-commit hooks
    Precommit(PrecommitCommand),

    /// Build the MkDocs site
    DocsBuild(DocsBuildCommand),

    /// Serve the MkDocs site locally
    DocsServe(DocsServeCommand),

    /// Run lint, mypy, tests and docs-build like CI does
    Ci(CiCommand),

    /// List available tasks and their parameters
    List(ListCommand),

    /// Write a default durango.toml
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if !is_valid_env_key(key) {
        return Err(format!("invalid environment variable name '{}'", key));
    }
    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Sync(ref cmd) => cmd.execute(&self),
            Commands::Lint(ref cmd) => cmd.execute(&self),
            Commands::Tests(ref cmd) => cmd.execute(&self),
            Commands::Mypy(ref cmd) => cmd.execute(&self),
            Commands::Precommit(ref cmd) => cmd.execute(&self),
            Commands::DocsBuild(ref cmd) => cmd.execute(&self),
            Commands::DocsServe(ref cmd) => cmd.execute(&self),
            Commands::Ci(ref cmd) => cmd.execute(&self),
            Commands::List(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the configuration named by `--config`, or search upward from
    /// the working directory.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(path) = &self.config {
            return Ok(load_config(path)?);
        }

        let cwd = std::env::current_dir()?;
        let (config, path) = load_config_or_default(&cwd)?;
        if let Some(path) = path {
            debug!(path = %path.display(), "using config file");
        }
        Ok(config)
    }

    /// Build a task context, applying CLI overrides on top of the config
    pub fn task_context(&self, config: &Config, runner: Arc<dyn CommandRunner>) -> TaskContext {
        let mut reporters = TaskReporterRegistry::new();
        if !self.quiet {
            reporters.register(ConsoleReporter);
        }

        let mut ctx = TaskContext::from_config(runner, config).with_reporters(reporters);
        let options = ctx.options_mut();
        options.dry_run = self.dry_run;
        if self.no_echo {
            options.echo = false;
        }
        if let Some(pty) = self.pty {
            options.pty = pty.into();
        }
        for (key, value) in &self.env {
            options.env.insert(key.clone(), value.clone());
        }
        ctx
    }

    /// Run a single task with real processes
    pub fn run_task(&self, config: &Config, task: &dyn Task) -> anyhow::Result<()> {
        let ctx = self.task_context(config, Arc::new(ProcessRunner::new()));
        ctx.run(task)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use durango_tasks::RecordingRunner;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "durango", "mypy", "--dry-run", "--no-echo", "--pty", "never", "-e", "A=1", "-e",
            "B=x=y",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert!(cli.no_echo);
        assert_eq!(cli.pty, Some(PtyArg::Never));
        assert_eq!(
            cli.env,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "x=y".to_string())
            ]
        );
    }

    #[test]
    fn test_env_pair_rejected_without_equals() {
        assert!(Cli::try_parse_from(["durango", "-e", "NOVALUE", "mypy"]).is_err());
        assert!(Cli::try_parse_from(["durango", "-e", "=1", "mypy"]).is_err());
    }

    #[test]
    fn test_task_context_overrides_config() {
        let cli = Cli::try_parse_from([
            "durango",
            "--dry-run",
            "--no-echo",
            "--pty",
            "always",
            "-e",
            "MODE=cli",
            "mypy",
        ])
        .unwrap();

        let mut config = Config::default();
        config.run.env.insert("MODE".to_string(), "config".to_string());
        config.run.env.insert("KEEP".to_string(), "yes".to_string());

        let runner = Arc::new(RecordingRunner::new());
        let ctx = cli.task_context(&config, runner.clone());
        let options = ctx.options();

        assert!(options.dry_run);
        assert!(!options.echo);
        assert_eq!(options.pty, PtyMode::Always);
        assert_eq!(options.env.get("MODE"), Some(&"cli".to_string()));
        assert_eq!(options.env.get("KEEP"), Some(&"yes".to_string()));
    }

    #[test]
    fn test_task_context_defaults_from_config() {
        let cli = Cli::try_parse_from(["durango", "mypy"]).unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let ctx = cli.task_context(&Config::default(), runner);

        assert!(!ctx.options().dry_run);
        assert!(ctx.options().echo);
        assert_eq!(ctx.options().pty, PtyMode::Auto);
        assert_eq!(ctx.program(), "uv");
    }
}
