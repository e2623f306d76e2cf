//! Tests command - run pytest with optional filters

use clap::Args;
use tracing::info;

use durango_tasks::TestsTask;

use super::run_single;
use crate::cli::Cli;

/// Run the pytest suite
#[derive(Debug, Args)]
pub struct TestsCommand {
    /// Pytest -m marker expression
    #[arg(short, long, default_value = "")]
    pub markers: String,

    /// Pytest -k keyword expression
    #[arg(short, default_value = "")]
    pub k: String,

    /// Test path or dotted module (empty to let pytest decide). Not taken
    /// from `[layout] tests`, which only sets the lint targets
    #[arg(long, default_value = "tests")]
    pub path: String,

    /// Extra arguments appended to pytest, split with shell quoting rules
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub options: String,
}

impl TestsCommand {
    pub fn task(&self) -> TestsTask {
        TestsTask {
            markers: self.markers.clone(),
            k: self.k.clone(),
            path: self.path.clone(),
            options: self.options.clone(),
        }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            markers = %self.markers,
            k = %self.k,
            path = %self.path,
            "executing tests command"
        );
        let config = cli.load_config()?;
        run_single(cli, &config, &self.task(), "Tests passed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{parse, record};
    use crate::cli::Commands;
    use durango_core::Config;

    fn tests(args: &[&str]) -> Vec<String> {
        let cli = parse(args);
        match &cli.command {
            Commands::Tests(cmd) => record(&cli, &Config::default(), &cmd.task()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_tests_defaults() {
        assert_eq!(tests(&["tests"]), vec!["uv run pytest tests"]);
    }

    #[test]
    fn test_tests_filters_and_options() {
        assert_eq!(
            tests(&[
                "tests",
                "-m",
                "not slow",
                "-k",
                "parser",
                "--path",
                "tests/unit",
                "--options",
                "-x --lf",
            ]),
            vec!["uv run pytest -m 'not slow' -k parser -x --lf tests/unit"]
        );
    }

    #[test]
    fn test_tests_empty_path_is_omitted() {
        assert_eq!(
            tests(&["tests", "--path", "", "-k", "smoke"]),
            vec!["uv run pytest -k smoke"]
        );
    }
}
