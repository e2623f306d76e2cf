//! Task catalog: names, summaries and parameter help

use serde::Serialize;

use crate::task::{
    DocsBuildTask, DocsServeTask, LintTask, PrecommitTask, SyncTask, TaskName, TestsTask,
};

/// Default value of a task parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u16> for ParamValue {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A single task parameter
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: ParamValue,
    pub help: &'static str,
}

impl ParamSpec {
    fn new(name: &'static str, default: impl Into<ParamValue>, help: &'static str) -> Self {
        Self {
            name,
            default: default.into(),
            help,
        }
    }
}

/// Catalog entry for one task
#[derive(Debug, Clone, Serialize)]
pub struct TaskDefinition {
    pub name: TaskName,
    pub summary: &'static str,
    pub params: Vec<ParamSpec>,
}

impl TaskDefinition {
    /// Build the definition for a task; defaults come from the task types
    pub fn of(name: TaskName) -> Self {
        let (summary, params) = match name {
            TaskName::Sync => {
                let task = SyncTask::default();
                (
                    "Synchronise the environment with uv",
                    vec![ParamSpec::new(
                        "dev",
                        task.dev,
                        "Install the dev and docs extras from pyproject.toml",
                    )],
                )
            }
            TaskName::Lint => {
                let task = LintTask::default();
                (
                    "Run Ruff format check and lint",
                    vec![
                        ParamSpec::new("fix", task.fix, "Apply Ruff auto-fixes where possible"),
                        ParamSpec::new(
                            "check_format",
                            task.check_format,
                            "Run `ruff format --check` before linting",
                        ),
                    ],
                )
            }
            TaskName::Tests => {
                let task = TestsTask::default();
                (
                    "Run the pytest suite",
                    vec![
                        ParamSpec::new("markers", task.markers, "Pytest -m expression"),
                        ParamSpec::new("k", task.k, "Pytest -k expression"),
                        ParamSpec::new(
                            "path",
                            task.path,
                            "Test path or dotted module (independent of [layout] tests)",
                        ),
                        ParamSpec::new("options", task.options, "Extra arguments appended to pytest"),
                    ],
                )
            }
            TaskName::Mypy => ("Type check the source tree with MyPy", Vec::new()),
            TaskName::Precommit => {
                let task = PrecommitTask::default();
                (
                    "Run the configured pre-commit hooks",
                    vec![ParamSpec::new(
                        "all_files",
                        task.all_files,
                        "Run hooks across the entire repository",
                    )],
                )
            }
            TaskName::DocsBuild => {
                let task = DocsBuildTask::default();
                (
                    "Build the MkDocs site",
                    vec![ParamSpec::new(
                        "strict",
                        task.strict,
                        "Fail on warnings when building the docs",
                    )],
                )
            }
            TaskName::DocsServe => {
                let task = DocsServeTask::default();
                (
                    "Serve the MkDocs site locally",
                    vec![
                        ParamSpec::new("host", task.host, "Bind address"),
                        ParamSpec::new("port", task.port, "Bind port"),
                    ],
                )
            }
            TaskName::Ci => (
                "Run lint, mypy, tests and docs-build like CI does",
                Vec::new(),
            ),
        };

        Self {
            name,
            summary,
            params,
        }
    }
}

/// Registry of all task definitions
#[derive(Debug, Clone)]
pub struct TaskCatalog {
    definitions: Vec<TaskDefinition>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self {
            definitions: TaskName::all()
                .iter()
                .map(|name| TaskDefinition::of(*name))
                .collect(),
        }
    }

    /// Look up a task by name
    pub fn get(&self, name: &str) -> Option<&TaskDefinition> {
        let name = TaskName::parse(name)?;
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn all(&self) -> &[TaskDefinition] {
        &self.definitions
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::new()
    }
}
