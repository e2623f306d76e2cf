//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_run(config)?;
    validate_layout(config)?;
    validate_docs(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_run(config: &Config) -> Result<()> {
    if config.run.program.trim().is_empty() {
        return Err(invalid("run.program", "program cannot be empty").into());
    }

    for key in config.run.env.keys() {
        if !is_valid_env_key(key) {
            return Err(invalid(
                format!("run.env.{}", key),
                "environment variable names must be non-empty and contain no '=' or NUL",
            )
            .into());
        }
    }

    Ok(())
}

fn validate_layout(config: &Config) -> Result<()> {
    if config.layout.source.is_empty() {
        return Err(invalid("layout.source", "at least one source directory is required").into());
    }

    let mut all = config.layout.source.iter().chain(config.layout.tests.iter());
    if all.any(|dir| dir.trim().is_empty()) {
        return Err(invalid("layout", "directory entries cannot be empty").into());
    }

    Ok(())
}

fn validate_docs(config: &Config) -> Result<()> {
    if config.docs.host.trim().is_empty() {
        return Err(invalid("docs.host", "host cannot be empty").into());
    }

    if config.docs.port == 0 {
        return Err(invalid("docs.port", "port must be between 1 and 65535").into());
    }

    Ok(())
}

/// Check that a name can be used as an environment variable key
pub fn is_valid_env_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('=') && !key.contains('\0')
}
