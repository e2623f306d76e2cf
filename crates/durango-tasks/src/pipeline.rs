//! Composite tasks: fixed, ordered sequences of steps

use std::time::Instant;

use durango_core::Result;
use tracing::info;

use crate::context::TaskContext;
use crate::reporter::TaskEvent;
use crate::task::{DocsBuildTask, LintTask, MypyTask, Task, TaskName, TestsTask};

/// An ordered list of tasks that halts at the first failure
#[derive(Debug)]
pub struct Pipeline {
    name: TaskName,
    steps: Vec<Box<dyn Task>>,
}

impl Pipeline {
    pub fn new(name: TaskName, steps: Vec<Box<dyn Task>>) -> Self {
        Self { name, steps }
    }

    /// The checks CI runs: lint (with format check), mypy, tests, docs build
    pub fn ci() -> Self {
        Self::new(
            TaskName::Ci,
            vec![
                Box::new(LintTask {
                    fix: false,
                    check_format: true,
                }),
                Box::new(MypyTask),
                Box::new(TestsTask::default()),
                Box::new(DocsBuildTask::default()),
            ],
        )
    }

    pub fn name(&self) -> TaskName {
        self.name
    }

    pub fn step_names(&self) -> Vec<TaskName> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step in order. The first failure is returned unchanged and
    /// no later step is started.
    pub fn run(&self, ctx: &TaskContext) -> Result<()> {
        let start = Instant::now();
        let steps = self.step_names();
        info!(pipeline = %self.name, steps = steps.len(), "running pipeline");
        ctx.reporters().broadcast(&TaskEvent::PipelineStarted {
            pipeline: self.name,
            steps: steps.clone(),
        });

        for (idx, step) in self.steps.iter().enumerate() {
            if let Err(err) = ctx.run(step.as_ref()) {
                ctx.reporters().broadcast(&TaskEvent::PipelineHalted {
                    pipeline: self.name,
                    failed_step: step.name(),
                    skipped: steps[idx + 1..].to_vec(),
                });
                return Err(err);
            }
        }

        ctx.reporters().broadcast(&TaskEvent::PipelineCompleted {
            pipeline: self.name,
            duration: start.elapsed(),
        });
        Ok(())
    }
}
