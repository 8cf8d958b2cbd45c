//! Offline connector over a captured copy of the server's global variables
//!
//! Accepts either the batch output of
//! `mysql -B -e "SHOW GLOBAL VARIABLES"` (tab-separated name and value) or a
//! flat TOML table of `variable = value`. The file is read on `connect()`,
//! so a missing or unreadable capture behaves like an unreachable server.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Connector, ConnectorError};

/// Header line emitted by `SHOW GLOBAL VARIABLES` in batch mode
const BATCH_HEADER: &str = "Variable_name";

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Inline(BTreeMap<String, String>),
}

/// Connector backed by a variable capture instead of a live server
#[derive(Debug, Clone)]
pub struct VariableSnapshot {
    source: Source,
    /// Populated by `connect()`, keyed by lowercase variable name
    variables: Option<BTreeMap<String, String>>,
}

impl VariableSnapshot {
    /// Snapshot read from `path` when connecting
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            variables: None,
        }
    }

    /// Snapshot over in-memory name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let variables = pairs
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();

        Self {
            source: Source::Inline(variables),
            variables: None,
        }
    }

    /// Number of variables loaded, or None before `connect()`
    pub fn variable_count(&self) -> Option<usize> {
        self.variables.as_ref().map(BTreeMap::len)
    }

    fn lookup(&self, name: &str) -> Result<&str, ConnectorError> {
        let variables = self.variables.as_ref().ok_or(ConnectorError::NotConnected)?;
        variables
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| ConnectorError::MissingVariable(name.to_string()))
    }
}

impl Connector for VariableSnapshot {
    fn connect(&mut self) -> Result<(), ConnectorError> {
        let variables = match &self.source {
            Source::Inline(pairs) => pairs.clone(),
            Source::File(path) => load_file(path)?,
        };
        tracing::debug!("loaded {} server variables", variables.len());
        self.variables = Some(variables);
        Ok(())
    }

    fn global_var_string(&mut self, name: &str) -> Result<String, ConnectorError> {
        self.lookup(name).map(str::to_string)
    }

    fn global_var_number(&mut self, name: &str) -> Result<f64, ConnectorError> {
        let value = self.lookup(name)?;
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| ConnectorError::NotNumeric {
                name: name.to_string(),
                value: value.to_string(),
            })
    }
}

fn load_file(path: &Path) -> Result<BTreeMap<String, String>, ConnectorError> {
    let content = fs::read_to_string(path).map_err(|source| ConnectorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        parse_toml(&content).map_err(|reason| ConnectorError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    } else {
        Ok(parse_batch(&content))
    }
}

/// Parse tab-separated `name<TAB>value` lines
fn parse_batch(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .filter_map(|line| {
            let (name, value) = line.split_once('\t').unwrap_or((line, ""));
            let name = name.trim();
            if name == BATCH_HEADER {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

/// Parse a flat TOML table; booleans become `ON`/`OFF` like the server reports them
fn parse_toml(content: &str) -> Result<BTreeMap<String, String>, String> {
    let table: toml::Table = content.parse().map_err(|e: toml::de::Error| e.to_string())?;

    table
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => (if b { "ON" } else { "OFF" }).to_string(),
                other => {
                    return Err(format!(
                        "variable '{}' must be a scalar, found {}",
                        name,
                        other.type_str()
                    ))
                }
            };
            Ok((name.to_ascii_lowercase(), text))
        })
        .collect()
}
