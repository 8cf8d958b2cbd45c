//! Loading the sparse override map
//!
//! Overrides come from an optional TOML file and from `KEY=VALUE` pairs on
//! the command line. Values are kept as raw strings; validating them is the
//! resolver's job.

use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_NAME, DEFAULT_OVERRIDES_FILE};

/// `<config dir>/qan-config/qan.toml`, if the platform has a config dir
pub fn default_overrides_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(DEFAULT_OVERRIDES_FILE))
}

/// Read a flat TOML table of override keys
pub fn load_overrides_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_overrides_toml(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Convert a TOML table to raw override strings
pub fn parse_overrides_toml(content: &str) -> Result<HashMap<String, String>> {
    let table: toml::Table = content.parse()?;

    table
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => bail!("override '{}' must be a scalar value, found {}", key, other.type_str()),
            };
            Ok((key, text))
        })
        .collect()
}

/// Split `KEY=VALUE` on the first `=`; the value may be empty
pub fn parse_override_pair(pair: &str) -> Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid override '{}': expected KEY=VALUE", pair))?;

    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid override '{}': key is empty", pair);
    }

    Ok((key.to_string(), value.to_string()))
}

/// Merge file values with command-line pairs; pairs win
pub fn collect_overrides(file: Option<&Path>, pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut overrides = match file {
        Some(path) => load_overrides_file(path)?,
        None => HashMap::new(),
    };

    for pair in pairs {
        let (key, value) = parse_override_pair(pair)?;
        overrides.insert(key, value);
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides_toml_scalars() {
        let overrides = parse_overrides_toml(
            "UUID = \"313fc3ea\"\nCollectFrom = \"perfschema\"\nInterval = 30\nExampleQueries = false\n",
        )
        .unwrap();

        assert_eq!(overrides["UUID"], "313fc3ea");
        assert_eq!(overrides["CollectFrom"], "perfschema");
        assert_eq!(overrides["Interval"], "30");
        assert_eq!(overrides["ExampleQueries"], "false");
    }

    #[test]
    fn test_parse_overrides_toml_rejects_nested_values() {
        let err = parse_overrides_toml("Interval = [1, 2]\n").unwrap_err();
        assert!(err.to_string().contains("Interval"));
    }

    #[test]
    fn test_parse_override_pair() {
        assert_eq!(
            parse_override_pair("Interval=30").unwrap(),
            ("Interval".to_string(), "30".to_string())
        );
        assert_eq!(
            parse_override_pair("UUID=a=b").unwrap(),
            ("UUID".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_override_pair("ExampleQueries=").unwrap(),
            ("ExampleQueries".to_string(), String::new())
        );
        assert!(parse_override_pair("Interval").is_err());
        assert!(parse_override_pair("=30").is_err());
    }

    #[test]
    fn test_command_line_pairs_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qan.toml");
        fs::write(&path, "Interval = 30\nCollectFrom = \"perfschema\"\n").unwrap();

        let overrides =
            collect_overrides(Some(&path), &["Interval=120".to_string()]).unwrap();
        assert_eq!(overrides["Interval"], "120");
        assert_eq!(overrides["CollectFrom"], "perfschema");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_overrides_file(Path::new("/nonexistent/qan.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
