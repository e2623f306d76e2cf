//! Error types for Durango

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DurangoError
pub type Result<T> = std::result::Result<T, DurangoError>;

/// Exit code used when the base program cannot be located
pub const EXIT_PROGRAM_NOT_FOUND: i32 = 127;

/// Main error type for Durango operations
#[derive(Debug, Error)]
pub enum DurangoError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Task execution errors
    #[error(transparent)]
    Task(#[from] TaskError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Task execution errors
#[derive(Debug, Error)]
pub enum TaskError {
    /// The external command exited with a non-zero status
    #[error("Command '{command}' exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    /// The base program is not on PATH
    #[error("Program not found on PATH: {0}")]
    ProgramNotFound(String),

    /// The child process could not be started
    #[error("Failed to start '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// Pseudo-terminal setup or I/O failed
    #[error("Pseudo-terminal error: {0}")]
    Pty(String),

    /// Task parameters could not be turned into arguments
    #[error("Invalid arguments for task '{task}': {message}")]
    InvalidArguments { task: String, message: String },
}

impl DurangoError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Process exit code that best represents this error.
    ///
    /// A failed external command passes its own status through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Task(TaskError::CommandFailed { code, .. }) => *code,
            Self::Task(TaskError::ProgramNotFound(_)) => EXIT_PROGRAM_NOT_FOUND,
            Self::Task(TaskError::InvalidArguments { .. }) => 5,
            Self::Config(_) => 2,
            _ => 1,
        }
    }

    /// Whether this error is a child process exiting non-zero
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Self::Task(TaskError::CommandFailed { .. }))
    }
}
