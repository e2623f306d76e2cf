//! Shell completions generation command

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::Cli;

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, "executing completions command");
        let mut cmd = Cli::command();

        match &self.output {
            Some(path) => {
                let mut file = std::fs::File::create(path)?;
                generate(self.shell, &mut cmd, "durango", &mut file);
                if !cli.quiet {
                    println!("Completions written to {}", path.display());
                }
            }
            None => generate(self.shell, &mut cmd, "durango", &mut io::stdout()),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::command;
    use crate::cli::Commands;

    #[test]
    fn test_completions_mention_task_commands() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut cmd, "durango", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("docs-serve"));
        assert!(script.contains("precommit"));
    }

    #[test]
    fn test_shell_names_parse() {
        for (name, shell) in [
            ("zsh", Shell::Zsh),
            ("powershell", Shell::PowerShell),
            ("elvish", Shell::Elvish),
        ] {
            match command(&["completions", name]) {
                Commands::Completions(cmd) => assert_eq!(cmd.shell, shell),
                other => panic!("unexpected command: {:?}", other),
            }
        }
    }
}
