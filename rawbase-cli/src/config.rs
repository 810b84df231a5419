//! Configuration loading
//!
//! Component configuration files are TOML tables. Every top-level key ends up
//! in the component's `Config`; the library itself only reads `debug` and
//! `id`.

use anyhow::{Context, Result};
use rawbase::Config;
use std::fs;
use std::path::Path;

/// Load a component configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Parse a component configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            debug = true
            id = 12
            name = "users"

            [database]
            table = "users"
            columns = ["id", "email"]
        "#;

        let config = parse_config(toml_content).unwrap();
        assert_eq!(config.len(), 4);
        assert_eq!(config.get("debug"), Some(&json!(true)));
        assert_eq!(config.get("id"), Some(&json!(12)));
        assert_eq!(
            config.get("database"),
            Some(&json!({"table": "users", "columns": ["id", "email"]}))
        );
    }

    #[test]
    fn test_empty_config() {
        assert!(parse_config("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_config("debug = ").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = false").unwrap();
        writeln!(file, "id = \"7\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.get("id"), Some(&json!("7")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
