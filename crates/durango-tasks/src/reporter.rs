//! Task execution reporting

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::task::TaskName;

/// Events emitted during task execution
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// A command is about to run
    Started { task: TaskName, command: String },
    /// A command finished with exit code zero
    Completed {
        task: TaskName,
        command: String,
        duration: Duration,
    },
    /// A command failed
    Failed {
        task: TaskName,
        command: String,
        duration: Duration,
        error: String,
    },
    /// A composite task is starting
    PipelineStarted {
        pipeline: TaskName,
        steps: Vec<TaskName>,
    },
    /// A composite task stopped at a failing step
    PipelineHalted {
        pipeline: TaskName,
        failed_step: TaskName,
        skipped: Vec<TaskName>,
    },
    /// Every step of a composite task succeeded
    PipelineCompleted {
        pipeline: TaskName,
        duration: Duration,
    },
}

/// Trait for reporting task execution progress
pub trait TaskReporter: Send + Sync {
    /// Handle a task event
    fn report(&self, event: &TaskEvent);
}

/// Simple reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TaskReporter for TracingReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::Started { task, command } => {
                tracing::info!(task = %task, "starting: {}", command);
            }
            TaskEvent::Completed {
                task,
                command,
                duration,
            } => {
                tracing::info!(
                    task = %task,
                    "{} completed in {:.1}s",
                    command,
                    duration.as_secs_f64()
                );
            }
            TaskEvent::Failed {
                task,
                command,
                duration,
                error,
            } => {
                tracing::error!(
                    task = %task,
                    "{} failed after {:.1}s: {}",
                    command,
                    duration.as_secs_f64(),
                    error
                );
            }
            TaskEvent::PipelineStarted { pipeline, steps } => {
                let names: Vec<&str> = steps.iter().map(|s| s.as_str()).collect();
                tracing::info!(pipeline = %pipeline, "running steps: {}", names.join(" -> "));
            }
            TaskEvent::PipelineHalted {
                pipeline,
                failed_step,
                skipped,
            } => {
                tracing::warn!(
                    pipeline = %pipeline,
                    "halted at {}, {} step(s) not run",
                    failed_step,
                    skipped.len()
                );
            }
            TaskEvent::PipelineCompleted { pipeline, duration } => {
                tracing::info!(
                    pipeline = %pipeline,
                    "all steps passed in {:.1}s",
                    duration.as_secs_f64()
                );
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<TaskEvent>>,
}

impl CollectingReporter {
    /// Get all collected events
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TaskReporter for CollectingReporter {
    fn report(&self, event: &TaskEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Registry of task reporters
pub struct TaskReporterRegistry {
    reporters: Vec<Arc<dyn TaskReporter>>,
}

impl TaskReporterRegistry {
    pub fn new() -> Self {
        Self {
            reporters: vec![Arc::new(TracingReporter)],
        }
    }

    pub fn empty() -> Self {
        Self {
            reporters: Vec::new(),
        }
    }

    pub fn register<R: TaskReporter + 'static>(&mut self, reporter: R) {
        self.reporters.push(Arc::new(reporter));
    }

    /// Register a reporter the caller keeps a handle to
    pub fn register_shared(&mut self, reporter: Arc<dyn TaskReporter>) {
        self.reporters.push(reporter);
    }

    pub fn all(&self) -> &[Arc<dyn TaskReporter>] {
        &self.reporters
    }

    /// Broadcast an event to all registered reporters
    pub fn broadcast(&self, event: &TaskEvent) {
        for reporter in &self.reporters {
            reporter.report(event);
        }
    }
}

impl Default for TaskReporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskReporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskReporterRegistry")
            .field("reporters", &self.reporters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingReporter::default();

        reporter.report(&TaskEvent::Started {
            task: TaskName::Mypy,
            command: "uv run mypy src".to_string(),
        });
        reporter.report(&TaskEvent::Completed {
            task: TaskName::Mypy,
            command: "uv run mypy src".to_string(),
            duration: Duration::from_secs(5),
        });

        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], TaskEvent::Completed { task: TaskName::Mypy, .. }));
    }

    #[test]
    fn test_tracing_reporter() {
        let reporter = TracingReporter;

        // Just verify it doesn't panic
        reporter.report(&TaskEvent::PipelineStarted {
            pipeline: TaskName::Ci,
            steps: vec![TaskName::Lint, TaskName::Mypy],
        });
        reporter.report(&TaskEvent::PipelineHalted {
            pipeline: TaskName::Ci,
            failed_step: TaskName::Lint,
            skipped: vec![TaskName::Mypy],
        });
    }

    #[test]
    fn test_empty_registry() {
        let registry = TaskReporterRegistry::empty();
        assert!(registry.all().is_empty());
        assert_eq!(TaskReporterRegistry::new().all().len(), 1);
    }

    #[test]
    fn test_broadcast_reaches_shared_reporter() {
        let collecting = Arc::new(CollectingReporter::default());
        let mut registry = TaskReporterRegistry::empty();
        registry.register(TracingReporter);
        registry.register_shared(collecting.clone());

        registry.broadcast(&TaskEvent::Started {
            task: TaskName::Sync,
            command: "uv sync".to_string(),
        });

        assert_eq!(registry.all().len(), 2);
        assert_eq!(collecting.events().len(), 1);
    }
}
