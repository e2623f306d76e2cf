//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration for Durango
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How external commands are run
    pub run: RunConfig,

    /// Where sources and tests live
    pub layout: LayoutConfig,

    /// Documentation server defaults
    pub docs: DocsConfig,
}

/// Command execution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Base program every task is appended to
    pub program: String,

    /// Print each command before running it
    pub echo: bool,

    /// Pseudo-terminal usage
    pub pty: PtyMode,

    /// Environment overlay applied to every invocation
    pub env: BTreeMap<String, String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            program: "uv".to_string(),
            echo: true,
            pty: PtyMode::Auto,
            env: BTreeMap::new(),
        }
    }
}

/// When to attach the child process to a pseudo-terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PtyMode {
    /// Use a pseudo-terminal only when stdout is a terminal
    #[default]
    Auto,
    /// Always use a pseudo-terminal
    Always,
    /// Never use a pseudo-terminal; inherit stdio instead
    Never,
}

impl PtyMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

/// Project layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Source directories (linted and type checked)
    pub source: Vec<String>,

    /// Test directories (linted)
    pub tests: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source: vec!["src".to_string()],
            tests: vec!["tests".to_string()],
        }
    }
}

/// Documentation server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Bind address for `docs-serve`
    pub host: String,

    /// Bind port for `docs-serve`
    pub port: u16,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.run.program, "uv");
        assert!(config.run.echo);
        assert_eq!(config.run.pty, PtyMode::Auto);
        assert!(config.run.env.is_empty());
        assert_eq!(config.layout.source, vec!["src"]);
        assert_eq!(config.layout.tests, vec!["tests"]);
        assert_eq!(config.docs.host, "127.0.0.1");
        assert_eq!(config.docs.port, 8000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[run]\necho = false\npty = \"never\"\n").unwrap();
        assert!(!config.run.echo);
        assert_eq!(config.run.pty, PtyMode::Never);
        assert_eq!(config.run.program, "uv");
        assert_eq!(config.docs.port, 8000);
    }

    #[test]
    fn test_env_overlay_from_yaml() {
        let yaml = "run:\n  env:\n    PYTHONWARNINGS: error\n    COLUMNS: \"120\"\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.run.env.get("PYTHONWARNINGS"),
            Some(&"error".to_string())
        );
        assert_eq!(config.run.env.get("COLUMNS"), Some(&"120".to_string()));
    }
}
