//! Baseline defaults and the server state probe
//!
//! `Baseline` holds the agent's best-known defaults. It starts from the
//! built-in literals in `constants.rs` and can be refreshed from a live
//! server with [`Baseline::probe`]. The resolver only ever reads it.
//!
//! A probe mutates the baseline one field at a time. Single-owner callers get
//! the required serialization from the borrow checker (`&mut` to probe, `&`
//! to resolve). Processes that resolve on several threads should use
//! [`SharedBaseline`], which publishes each probed baseline as a whole.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::coerce::to_bool;
use crate::connector::Connector;
use crate::constants::*;
use crate::models::{CollectFrom, ConfigError, ProbeReport, SkippedVariable};

/// Agent defaults for every configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub collect_from: CollectFrom,
    /// Seconds
    pub interval: u32,
    /// Minimum query duration logged, in seconds
    pub long_query_time: f64,
    /// Bytes
    pub max_slow_log_size: i64,
    pub remove_old_slow_logs: bool,
    pub example_queries: bool,
    /// Percona Server `log_slow_verbosity`
    pub slow_log_verbosity: String,
    /// Percona Server `log_slow_rate_limit`, log 1 of every N
    pub rate_limit: u32,
    pub log_slow_admin_statements: bool,
    pub log_slow_slave_statements: bool,
    /// Seconds
    pub worker_run_time: u32,
    pub report_limit: u32,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            collect_from: DEFAULT_COLLECT_FROM,
            interval: DEFAULT_INTERVAL,
            long_query_time: DEFAULT_LONG_QUERY_TIME,
            max_slow_log_size: DEFAULT_MAX_SLOW_LOG_SIZE,
            remove_old_slow_logs: DEFAULT_REMOVE_OLD_SLOW_LOGS,
            example_queries: DEFAULT_EXAMPLE_QUERIES,
            slow_log_verbosity: DEFAULT_SLOW_LOG_VERBOSITY.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            log_slow_admin_statements: DEFAULT_LOG_SLOW_ADMIN_STATEMENTS,
            log_slow_slave_statements: DEFAULT_LOG_SLOW_SLAVE_STATEMENTS,
            worker_run_time: DEFAULT_WORKER_RUNTIME,
            report_limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

impl Baseline {
    /// Connect and overwrite defaults with the server's current settings.
    ///
    /// A connection failure returns [`ConfigError::Connection`] before any
    /// field is touched. After that every variable is read independently: a
    /// read that fails, or yields an unusable value, leaves its default as it
    /// was and is listed in the report's `skipped`.
    pub fn probe<C>(&mut self, conn: &mut C) -> Result<ProbeReport, ConfigError>
    where
        C: Connector + ?Sized,
    {
        conn.connect().map_err(ConfigError::Connection)?;

        let mut report = ProbeReport::default();

        match conn.global_var_string(VAR_PERFORMANCE_SCHEMA) {
            Ok(status) => {
                self.collect_from = if to_bool(&status) {
                    CollectFrom::PerfSchema
                } else {
                    CollectFrom::SlowLog
                };
                report.applied.push(VAR_PERFORMANCE_SCHEMA);
            }
            Err(e) => skip(&mut report, VAR_PERFORMANCE_SCHEMA, e.to_string()),
        }

        match conn.global_var_number(VAR_LONG_QUERY_TIME) {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
                self.long_query_time = seconds;
                report.applied.push(VAR_LONG_QUERY_TIME);
            }
            Ok(seconds) => skip(&mut report, VAR_LONG_QUERY_TIME, out_of_range(seconds)),
            Err(e) => skip(&mut report, VAR_LONG_QUERY_TIME, e.to_string()),
        }

        match conn.global_var_string(VAR_LOG_SLOW_ADMIN_STATEMENTS) {
            Ok(value) => {
                self.log_slow_admin_statements = to_bool(&value);
                report.applied.push(VAR_LOG_SLOW_ADMIN_STATEMENTS);
            }
            Err(e) => skip(&mut report, VAR_LOG_SLOW_ADMIN_STATEMENTS, e.to_string()),
        }

        match conn.global_var_number(VAR_LOG_SLOW_RATE_LIMIT) {
            Ok(limit) if (0.0..=f64::from(u32::MAX)).contains(&limit) => {
                // Truncates like the server does for fractional values
                self.rate_limit = limit as u32;
                report.applied.push(VAR_LOG_SLOW_RATE_LIMIT);
            }
            Ok(limit) => skip(&mut report, VAR_LOG_SLOW_RATE_LIMIT, out_of_range(limit)),
            Err(e) => skip(&mut report, VAR_LOG_SLOW_RATE_LIMIT, e.to_string()),
        }

        match conn.global_var_string(VAR_LOG_SLOW_SLAVE_STATEMENTS) {
            Ok(value) => {
                self.log_slow_slave_statements = to_bool(&value);
                report.applied.push(VAR_LOG_SLOW_SLAVE_STATEMENTS);
            }
            Err(e) => skip(&mut report, VAR_LOG_SLOW_SLAVE_STATEMENTS, e.to_string()),
        }

        match conn.global_var_string(VAR_LOG_SLOW_VERBOSITY) {
            Ok(verbosity) => {
                self.slow_log_verbosity = verbosity;
                report.applied.push(VAR_LOG_SLOW_VERBOSITY);
            }
            Err(e) => skip(&mut report, VAR_LOG_SLOW_VERBOSITY, e.to_string()),
        }

        tracing::info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            collect_from = %self.collect_from,
            "server probe complete"
        );

        Ok(report)
    }
}

fn skip(report: &mut ProbeReport, name: &'static str, reason: String) {
    tracing::debug!("keeping default for {}: {}", name, reason);
    report.skipped.push(SkippedVariable { name, reason });
}

fn out_of_range(value: f64) -> String {
    format!("value {} is out of range", value)
}

/// Baseline shared between a probing owner and concurrent resolvers.
///
/// Readers take an `Arc` snapshot that never changes under them. A refresh
/// probes into a private copy and replaces the published baseline with one
/// atomic store; a failed refresh publishes nothing. Concurrent refreshes
/// are last-writer-wins.
#[derive(Debug, Clone)]
pub struct SharedBaseline {
    inner: Arc<ArcSwap<Baseline>>,
}

impl Default for SharedBaseline {
    fn default() -> Self {
        Self::new(Baseline::default())
    }
}

impl SharedBaseline {
    pub fn new(baseline: Baseline) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(baseline)),
        }
    }

    /// Current published baseline
    pub fn snapshot(&self) -> Arc<Baseline> {
        self.inner.load_full()
    }

    /// Probe `conn` and publish the refreshed baseline
    pub fn refresh<C>(&self, conn: &mut C) -> Result<ProbeReport, ConfigError>
    where
        C: Connector + ?Sized,
    {
        let mut next = Baseline::clone(&self.inner.load_full());
        let report = next.probe(conn)?;
        self.inner.store(Arc::new(next));
        Ok(report)
    }
}
