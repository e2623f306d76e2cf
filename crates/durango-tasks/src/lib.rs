//! Durango Tasks - developer task definitions and command runner
//!
//! This crate turns typed task parameters into argument vectors for the
//! base program (`uv` by default), runs them synchronously, and chains them
//! into the CI composite.

pub mod catalog;
pub mod context;
pub mod pipeline;
pub mod reporter;
pub mod runner;
pub mod task;

pub use catalog::{ParamSpec, ParamValue, TaskCatalog, TaskDefinition};
pub use context::TaskContext;
pub use pipeline::Pipeline;
pub use reporter::{
    CollectingReporter, TaskEvent, TaskReporter, TaskReporterRegistry, TracingReporter,
};
pub use runner::{
    merge_environment, CommandRunner, Invocation, ProcessRunner, RecordedCall, RecordingRunner,
    RunOptions,
};
pub use task::{
    DocsBuildTask, DocsServeTask, LintTask, MypyTask, PrecommitTask, ProjectLayout, SyncTask,
    Task, TaskName, TestsTask,
};
