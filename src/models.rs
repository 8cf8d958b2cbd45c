//! Data models module
//!
//! Defines core data structures:
//! - CollectFrom: the mutually exclusive collection strategy
//! - RunConfig: the resolved QAN configuration, in the agent's wire format
//! - DirectiveSet: ordered statements that turn a strategy on or off
//! - ProbeReport: what a server probe applied to the baseline
//! - ConfigError: typed failures surfaced to callers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::connector::ConnectorError;

/// Mechanism used to capture query activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollectFrom {
    /// Parse the server's slow query log
    #[default]
    #[serde(rename = "slowlog")]
    SlowLog,
    /// Read statement digests from performance_schema
    #[serde(rename = "perfschema")]
    PerfSchema,
}

impl CollectFrom {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectFrom::SlowLog => "slowlog",
            CollectFrom::PerfSchema => "perfschema",
        }
    }
}

impl fmt::Display for CollectFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectFrom {
    type Err = ConfigError;

    /// Exact, case-sensitive match on the wire names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slowlog" => Ok(CollectFrom::SlowLog),
            "perfschema" => Ok(CollectFrom::PerfSchema),
            other => Err(ConfigError::UnsupportedStrategy(other.to_string())),
        }
    }
}

/// Resolved configuration consumed by the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunConfig {
    /// Instance identifier, passed through unchanged
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Active collection strategy
    pub collect_from: CollectFrom,
    /// Report interval in seconds (1-3600)
    pub interval: u32,
    /// Slow log rotation threshold in bytes
    pub max_slow_log_size: i64,
    /// Whether to keep example query text
    pub example_queries: bool,
    /// Seconds a worker may run per interval, always 90% of `interval`
    pub worker_run_time: u32,
    /// Maximum number of query classes per report
    pub report_limit: u32,
}

/// Ordered enable and disable statements for one collection strategy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveSet {
    /// Run in order to start collecting
    pub enable: Vec<String>,
    /// Run in order to stop collecting
    pub disable: Vec<String>,
}

/// Outcome of a successful server probe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbeReport {
    /// Server variables copied into the baseline
    pub applied: Vec<&'static str>,
    /// Server variables left at their prior default, with the reason
    pub skipped: Vec<SkippedVariable>,
}

/// A probed variable that could not be applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedVariable {
    pub name: &'static str,
    pub reason: String,
}

impl ProbeReport {
    pub fn is_applied(&self, name: &str) -> bool {
        self.applied.iter().any(|applied| *applied == name)
    }
}

/// Custom error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Probe could not reach the server; nothing was changed
    #[error("failed to connect to server: {0}")]
    Connection(#[source] ConnectorError),

    /// An override was malformed or out of range
    #[error("invalid {field}: '{value}': {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Directives requested for a strategy this agent does not know
    #[error("invalid CollectFrom: '{0}'; expected 'slowlog' or 'perfschema'")]
    UnsupportedStrategy(String),
}

impl ConfigError {
    /// Override key that caused a validation failure
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
