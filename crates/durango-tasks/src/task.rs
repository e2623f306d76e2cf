//! Task types and argument construction
//!
//! Every task is a pure mapping from its parameters (plus the project
//! layout) to one or more argument vectors. The vectors are appended to the
//! base program by the [`TaskContext`](crate::TaskContext).

use std::fmt;

use serde::Serialize;

use durango_core::config::LayoutConfig;
use durango_core::{Result, TaskError};

/// Names of the available tasks
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskName {
    Sync,
    Lint,
    Tests,
    Mypy,
    Precommit,
    DocsBuild,
    DocsServe,
    Ci,
}

impl TaskName {
    /// Get the task name as used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Lint => "lint",
            Self::Tests => "tests",
            Self::Mypy => "mypy",
            Self::Precommit => "precommit",
            Self::DocsBuild => "docs-build",
            Self::DocsServe => "docs-serve",
            Self::Ci => "ci",
        }
    }

    /// Parse a task name; `docs_build` and `docs-build` are both accepted
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == normalized)
    }

    /// Get all task names in catalog order
    pub fn all() -> &'static [TaskName] {
        &[
            Self::Sync,
            Self::Lint,
            Self::Tests,
            Self::Mypy,
            Self::Precommit,
            Self::DocsBuild,
            Self::DocsServe,
            Self::Ci,
        ]
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source and test directories the tasks operate on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Source directories
    pub source: Vec<String>,
    /// Test directories
    pub tests: Vec<String>,
}

impl ProjectLayout {
    /// Directories checked by the linter: sources first, then tests
    pub fn lint_targets(&self) -> impl Iterator<Item = &String> {
        self.source.iter().chain(self.tests.iter())
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for ProjectLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            source: config.source.clone(),
            tests: config.tests.clone(),
        }
    }
}

/// A named, parameterized operation that builds external commands
pub trait Task: fmt::Debug {
    /// Task name
    fn name(&self) -> TaskName;

    /// Argument vectors to run, in order, after the base program
    fn invocations(&self, layout: &ProjectLayout) -> Result<Vec<Vec<String>>>;
}

fn args<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Synchronise the environment with the lockfile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTask {
    /// Install the dev and docs extras
    pub dev: bool,
}

impl Default for SyncTask {
    fn default() -> Self {
        Self { dev: true }
    }
}

impl Task for SyncTask {
    fn name(&self) -> TaskName {
        TaskName::Sync
    }

    fn invocations(&self, _layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut argv = args(["sync"]);
        if self.dev {
            argv.extend(args(["--extra", "dev", "--extra", "docs"]));
        }
        Ok(vec![argv])
    }
}

/// Ruff format check and lint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintTask {
    /// Apply auto-fixes
    pub fix: bool,
    /// Run `ruff format --check` before linting
    pub check_format: bool,
}

impl Task for LintTask {
    fn name(&self) -> TaskName {
        TaskName::Lint
    }

    fn invocations(&self, layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut invocations = Vec::new();

        if self.check_format {
            let mut format = args(["run", "ruff", "format", "--check"]);
            format.extend(layout.lint_targets().cloned());
            invocations.push(format);
        }

        let mut check = args(["run", "ruff", "check"]);
        check.extend(layout.lint_targets().cloned());
        if self.fix {
            check.push("--fix".to_string());
        }
        invocations.push(check);

        Ok(invocations)
    }
}

/// Pytest run with optional filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestsTask {
    /// `-m` marker expression
    pub markers: String,
    /// `-k` keyword expression
    pub k: String,
    /// Test path or dotted module; omitted when empty
    pub path: String,
    /// Extra pytest arguments, split with shell rules
    pub options: String,
}

impl Default for TestsTask {
    fn default() -> Self {
        Self {
            markers: String::new(),
            k: String::new(),
            path: "tests".to_string(),
            options: String::new(),
        }
    }
}

impl Task for TestsTask {
    fn name(&self) -> TaskName {
        TaskName::Tests
    }

    fn invocations(&self, _layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut argv = args(["run", "pytest"]);
        if !self.markers.is_empty() {
            argv.extend(["-m".to_string(), self.markers.clone()]);
        }
        if !self.k.is_empty() {
            argv.extend(["-k".to_string(), self.k.clone()]);
        }
        if !self.options.is_empty() {
            let extra =
                shell_words::split(&self.options).map_err(|e| TaskError::InvalidArguments {
                    task: self.name().to_string(),
                    message: format!("cannot split options {:?}: {}", self.options, e),
                })?;
            argv.extend(extra);
        }
        if !self.path.is_empty() {
            argv.push(self.path.clone());
        }
        Ok(vec![argv])
    }
}

/// Type check the source tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MypyTask;

impl Task for MypyTask {
    fn name(&self) -> TaskName {
        TaskName::Mypy
    }

    fn invocations(&self, layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut argv = args(["run", "mypy"]);
        argv.extend(layout.source.iter().cloned());
        Ok(vec![argv])
    }
}

/// Run the configured pre-commit hooks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecommitTask {
    /// Run hooks against every file, not just staged ones
    pub all_files: bool,
}

impl Task for PrecommitTask {
    fn name(&self) -> TaskName {
        TaskName::Precommit
    }

    fn invocations(&self, _layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut argv = args(["run", "pre-commit", "run"]);
        if self.all_files {
            argv.push("--all-files".to_string());
        }
        Ok(vec![argv])
    }
}

/// Build the MkDocs site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsBuildTask {
    /// Treat warnings as errors
    pub strict: bool,
}

impl Default for DocsBuildTask {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl Task for DocsBuildTask {
    fn name(&self) -> TaskName {
        TaskName::DocsBuild
    }

    fn invocations(&self, _layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut argv = args(["run", "mkdocs", "build"]);
        if self.strict {
            argv.push("--strict".to_string());
        }
        Ok(vec![argv])
    }
}

/// Serve the MkDocs site locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsServeTask {
    pub host: String,
    pub port: u16,
}

impl Default for DocsServeTask {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Task for DocsServeTask {
    fn name(&self) -> TaskName {
        TaskName::DocsServe
    }

    fn invocations(&self, _layout: &ProjectLayout) -> Result<Vec<Vec<String>>> {
        let mut argv = args(["run", "mkdocs", "serve", "-a"]);
        argv.push(format!("{}:{}", self.host, self.port));
        Ok(vec![argv])
    }
}
