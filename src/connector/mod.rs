//! Server connection interface used by the baseline probe
//!
//! The probe only needs three capabilities: establish the connection and
//! read a global variable as text or as a number. Each call can fail on its
//! own; the probe decides which failures are fatal.

use std::path::PathBuf;

pub mod snapshot;

pub use snapshot::VariableSnapshot;

/// Read access to a MySQL-compatible server's global variables
pub trait Connector {
    /// Establish the connection. Must succeed before any read.
    fn connect(&mut self) -> Result<(), ConnectorError>;

    /// `SELECT @@GLOBAL.<name>` as text
    fn global_var_string(&mut self, name: &str) -> Result<String, ConnectorError>;

    /// `SELECT @@GLOBAL.<name>` as a number
    fn global_var_number(&mut self, name: &str) -> Result<f64, ConnectorError>;
}

/// Failures reported by a connector
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("not connected")]
    NotConnected,

    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("unknown system variable '{0}'")]
    MissingVariable(String),

    #[error("system variable '{name}' is not numeric: '{value}'")]
    NotNumeric { name: String, value: String },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .reason)]
    Parse { path: PathBuf, reason: String },
}
