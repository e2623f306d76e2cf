//! Output formatting utilities

use console::style;

use durango_tasks::{TaskEvent, TaskName, TaskReporter};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

fn join_steps(steps: &[TaskName]) -> String {
    steps
        .iter()
        .map(TaskName::as_str)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Render a composite task event as a status line, if it has one
pub fn pipeline_line(event: &TaskEvent) -> Option<String> {
    match event {
        TaskEvent::PipelineStarted { pipeline, steps } => Some(format!(
            "Running {}: {}",
            header(pipeline.as_str()),
            join_steps(steps)
        )),
        TaskEvent::PipelineHalted {
            pipeline,
            failed_step,
            skipped,
        } => {
            let mut line = format!("{} failed at step {}", pipeline, header(failed_step.as_str()));
            if !skipped.is_empty() {
                line.push_str(&format!(" (skipped: {})", join_steps(skipped)));
            }
            Some(line)
        }
        TaskEvent::PipelineCompleted { pipeline, duration } => Some(format!(
            "{} passed in {:.1}s",
            pipeline,
            duration.as_secs_f64()
        )),
        _ => None,
    }
}

/// Prints composite task progress; single commands are already echoed by
/// the runner.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl TaskReporter for ConsoleReporter {
    fn report(&self, event: &TaskEvent) {
        let Some(line) = pipeline_line(event) else {
            return;
        };
        match event {
            TaskEvent::PipelineStarted { .. } => info(&line),
            TaskEvent::PipelineHalted { .. } => warning(&line),
            _ => success(&line),
        }
    }
}
