//! Shared test helpers
//!
//! `FakeConnector` scripts a server's global variables, can refuse to
//! connect, can fail individual reads, and records every call made to it.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use qan_config::{Connector, ConnectorError};

/// Scripted stand-in for a live server connection
#[derive(Debug, Default)]
pub struct FakeConnector {
    /// Refuse `connect()`
    pub unreachable: bool,
    connected: bool,
    variables: HashMap<String, String>,
    /// Variables whose reads fail even though the server is up
    failing: HashSet<String>,
    /// Every call, in order: "connect", "string:<name>", "number:<name>"
    pub calls: Vec<String>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// A Percona Server with performance_schema on and every slow log extension
    pub fn percona() -> Self {
        Self::new()
            .with_var("performance_schema", "ON")
            .with_var("long_query_time", "0.5")
            .with_var("log_slow_admin_statements", "OFF")
            .with_var("log_slow_rate_limit", "50")
            .with_var("log_slow_slave_statements", "OFF")
            .with_var("log_slow_verbosity", "standard")
    }

    /// A stock MySQL server on the slow log with a throttled rate limit
    pub fn stock_mysql() -> Self {
        Self::new()
            .with_var("performance_schema", "OFF")
            .with_var("long_query_time", "2")
            .with_var("log_slow_rate_limit", "5")
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.variables.insert(name.to_string(), value.to_string());
        self
    }

    pub fn failing_read(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn reads(&self) -> usize {
        self.calls.iter().filter(|call| *call != "connect").count()
    }

    fn read(&mut self, name: &str) -> Result<String, ConnectorError> {
        if !self.connected {
            return Err(ConnectorError::NotConnected);
        }
        if self.failing.contains(name) {
            return Err(ConnectorError::Io {
                path: PathBuf::from("fake"),
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "lost connection"),
            });
        }
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| ConnectorError::MissingVariable(name.to_string()))
    }
}

impl Connector for FakeConnector {
    fn connect(&mut self) -> Result<(), ConnectorError> {
        self.calls.push("connect".to_string());
        if self.unreachable {
            return Err(ConnectorError::Unreachable("connection refused".to_string()));
        }
        self.connected = true;
        Ok(())
    }

    fn global_var_string(&mut self, name: &str) -> Result<String, ConnectorError> {
        self.calls.push(format!("string:{}", name));
        self.read(name)
    }

    fn global_var_number(&mut self, name: &str) -> Result<f64, ConnectorError> {
        self.calls.push(format!("number:{}", name));
        let value = self.read(name)?;
        match value.parse::<f64>() {
            Ok(number) => Ok(number),
            Err(_) => Err(ConnectorError::NotNumeric {
                name: name.to_string(),
                value,
            }),
        }
    }
}

/// Path to a file under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
