//! Durango Core - shared types for the Durango developer tasks
//!
//! This crate provides the error taxonomy and the configuration layer used by
//! the task runner and the CLI.

pub mod config;
pub mod error;

pub use config::{Config, DocsConfig, LayoutConfig, PtyMode, RunConfig};
pub use error::{ConfigError, DurangoError, Result, TaskError};
