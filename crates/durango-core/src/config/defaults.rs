//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "durango.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "durango.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".durango.toml",
        ".durango.yaml",
    ]
}

/// Default configuration template, written by `durango init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Durango developer task configuration

[run]
# Base program every task runs through
program = "uv"
# Print each command before running it
echo = true
# Pseudo-terminal for child processes: auto | always | never
pty = "auto"

# Extra environment variables for every command, e.g. FORCE_COLOR = "1"
[run.env]

[layout]
# Directories checked by ruff and mypy
source = ["src"]
# Test directories checked by ruff (pytest uses `tests --path`)
tests = ["tests"]

[docs]
# Bind address for `docs-serve`
host = "127.0.0.1"
# Bind port for `docs-serve`
port = 8000
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_template_documents_every_key() {
        let lines: Vec<&str> = DEFAULT_CONFIG_TEMPLATE.lines().collect();
        for key in ["program", "echo", "pty", "source", "tests", "host", "port"] {
            let idx = lines
                .iter()
                .position(|l| l.starts_with(&format!("{} = ", key)))
                .unwrap();
            assert!(
                lines[idx - 1].starts_with('#'),
                "{} has no comment above it",
                key
            );
        }
        assert!(DEFAULT_CONFIG_TEMPLATE.contains("auto | always | never"));
    }

    #[test]
    fn test_search_order_prefers_toml() {
        assert_eq!(config_file_names()[0], DEFAULT_CONFIG_TOML);
        assert_eq!(config_file_names().len(), 4);
    }
}
