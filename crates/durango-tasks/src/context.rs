//! Task context: binds a runner, base program, layout and run options

use std::sync::Arc;
use std::time::Instant;

use durango_core::{Config, Result};
use tracing::debug;

use crate::reporter::{TaskEvent, TaskReporterRegistry};
use crate::runner::{CommandRunner, Invocation, RunOptions};
use crate::task::{ProjectLayout, Task};

/// Everything needed to turn a task into running processes
#[derive(Debug)]
pub struct TaskContext {
    runner: Arc<dyn CommandRunner>,
    program: String,
    layout: ProjectLayout,
    options: RunOptions,
    reporters: TaskReporterRegistry,
}

impl TaskContext {
    /// Context with the default program (`uv`), layout and options
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::from_config(runner, &Config::default())
    }

    /// Context built from a loaded configuration
    pub fn from_config(runner: Arc<dyn CommandRunner>, config: &Config) -> Self {
        Self {
            runner,
            program: config.run.program.clone(),
            layout: ProjectLayout::from(&config.layout),
            options: RunOptions {
                echo: config.run.echo,
                dry_run: false,
                env: config.run.env.clone(),
                pty: config.run.pty,
            },
            reporters: TaskReporterRegistry::new(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_reporters(mut self, reporters: TaskReporterRegistry) -> Self {
        self.reporters = reporters;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RunOptions {
        &mut self.options
    }

    pub(crate) fn reporters(&self) -> &TaskReporterRegistry {
        &self.reporters
    }

    /// Build every invocation of a task without running anything
    pub fn plan(&self, task: &dyn Task) -> Result<Vec<Invocation>> {
        let invocations = task
            .invocations(&self.layout)?
            .into_iter()
            .map(|args| Invocation::new(self.program.clone(), args))
            .collect();
        Ok(invocations)
    }

    /// Run a task's invocations in order, stopping at the first failure.
    ///
    /// Arguments for every invocation are built before the first one runs.
    pub fn run(&self, task: &dyn Task) -> Result<()> {
        let name = task.name();
        let invocations = self.plan(task)?;
        debug!(task = %name, count = invocations.len(), "running task");

        for invocation in &invocations {
            let command = invocation.command_line();
            self.reporters.broadcast(&TaskEvent::Started {
                task: name,
                command: command.clone(),
            });

            let start = Instant::now();
            match self.runner.run(invocation, &self.options) {
                Ok(()) => self.reporters.broadcast(&TaskEvent::Completed {
                    task: name,
                    command,
                    duration: start.elapsed(),
                }),
                Err(err) => {
                    self.reporters.broadcast(&TaskEvent::Failed {
                        task: name,
                        command,
                        duration: start.elapsed(),
                        error: err.to_string(),
                    });
                    return Err(err);
                }
            }
        }

        Ok(())
    }
}
