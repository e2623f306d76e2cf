//! List command - show available tasks and their parameters

use clap::Args;
use tracing::info;

use durango_tasks::{TaskCatalog, TaskDefinition};

use crate::cli::output::{header, key_value};
use crate::cli::{Cli, OutputFormat};

/// List available tasks
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Show only this task
    pub task: Option<String>,
}

impl ListCommand {
    /// Definitions selected by the command
    pub fn select<'a>(&self, catalog: &'a TaskCatalog) -> anyhow::Result<Vec<&'a TaskDefinition>> {
        match &self.task {
            Some(name) => {
                let definition = catalog.get(name).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown task '{}'. Available tasks: {}",
                        name,
                        catalog.names().join(", ")
                    )
                })?;
                Ok(vec![definition])
            }
            None => Ok(catalog.all().iter().collect()),
        }
    }

    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(task = ?self.task, "executing list command");
        let catalog = TaskCatalog::new();
        let definitions = self.select(&catalog)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&definitions)?);
            }
            OutputFormat::Text => print!("{}", render_text(&definitions)),
        }
        Ok(())
    }
}

fn render_text(definitions: &[&TaskDefinition]) -> String {
    let width = definitions
        .iter()
        .map(|d| d.name.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for definition in definitions {
        let name = definition.name.as_str();
        out.push_str(&format!(
            "{}{}  {}\n",
            header(name),
            " ".repeat(width - name.len()),
            definition.summary
        ));
        for param in &definition.params {
            out.push_str(&key_value(
                param.name,
                &format!("{} (default: {})", param.help, param.default),
            ));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use durango_tasks::TaskName;

    #[test]
    fn test_select_all_tasks() {
        let catalog = TaskCatalog::new();
        let cmd = ListCommand { task: None };
        let selected = cmd.select(&catalog).unwrap();
        assert_eq!(selected.len(), TaskName::all().len());
    }

    #[test]
    fn test_select_accepts_underscore_names() {
        let catalog = TaskCatalog::new();
        let cmd = ListCommand {
            task: Some("docs_serve".to_string()),
        };
        let selected = cmd.select(&catalog).unwrap();
        assert_eq!(selected[0].name, TaskName::DocsServe);
    }

    #[test]
    fn test_select_unknown_task() {
        let catalog = TaskCatalog::new();
        let cmd = ListCommand {
            task: Some("deploy".to_string()),
        };
        let err = cmd.select(&catalog).unwrap_err();
        assert!(err.to_string().contains("Available tasks: sync, lint"));
    }

    #[test]
    fn test_render_text_shows_params_and_defaults() {
        let catalog = TaskCatalog::new();
        let text = render_text(&[catalog.get("docs-serve").unwrap()]);
        assert!(text.contains("Serve the MkDocs site locally"));
        assert!(text.contains("Bind port (default: 8000)"));
        assert!(text.contains("(default: \"127.0.0.1\")"));
    }

    #[test]
    fn test_json_output_lists_params() {
        let catalog = TaskCatalog::new();
        let selected = vec![catalog.get("tests").unwrap()];
        let value = serde_json::to_value(&selected).unwrap();
        assert_eq!(value[0]["name"], "tests");
        assert_eq!(value[0]["params"][2]["default"], "tests");
    }
}
