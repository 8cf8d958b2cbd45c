//! Override resolution and validation
//!
//! Merges a sparse map of user overrides onto a [`Baseline`] and produces the
//! [`RunConfig`] the collector runs with. Numeric and enum overrides are
//! validated strictly; `ExampleQueries` is coerced leniently and never fails.

use std::collections::HashMap;
use std::num::ParseIntError;

use crate::baseline::Baseline;
use crate::coerce::to_bool;
use crate::constants::*;
use crate::models::{ConfigError, RunConfig};

/// Resolve `overrides` against `baseline`.
///
/// Validation runs on a working copy, so an error never exposes a partially
/// applied configuration. Unknown keys are ignored with a warning.
pub fn validate_config(
    overrides: &HashMap<String, String>,
    baseline: &Baseline,
) -> Result<RunConfig, ConfigError> {
    warn_unknown_keys(overrides);

    let mut config = seed(overrides, baseline);

    if let Some(value) = overrides.get(KEY_COLLECT_FROM) {
        config.collect_from = value.parse().map_err(|_| ConfigError::Validation {
            field: KEY_COLLECT_FROM,
            value: value.clone(),
            reason: "must be 'slowlog' or 'perfschema'".to_string(),
        })?;
    }

    if let Some(value) = overrides.get(KEY_INTERVAL) {
        config.interval = parse_interval(value)?;
    }
    // Always derived from the final interval, overridden or not
    config.worker_run_time = worker_run_time(config.interval);

    if let Some(value) = overrides.get(KEY_EXAMPLE_QUERIES) {
        config.example_queries = to_bool(value);
    }

    tracing::debug!(
        collect_from = %config.collect_from,
        interval = config.interval,
        worker_run_time = config.worker_run_time,
        example_queries = config.example_queries,
        "resolved config"
    );

    Ok(config)
}

/// Like [`validate_config`], but always returns a usable configuration.
///
/// On failure the returned config is the baseline with only the UUID applied
/// and `worker_run_time` derived from the baseline interval, paired with the
/// error that rejected the overrides.
pub fn resolve_with_fallback(
    overrides: &HashMap<String, String>,
    baseline: &Baseline,
) -> (RunConfig, Option<ConfigError>) {
    match validate_config(overrides, baseline) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!("rejected overrides, falling back to defaults: {}", err);
            let mut fallback = seed(overrides, baseline);
            fallback.worker_run_time = worker_run_time(fallback.interval);
            (fallback, Some(err))
        }
    }
}

/// 90% of the interval, rounded down
pub fn worker_run_time(interval: u32) -> u32 {
    (u64::from(interval) * WORKER_RUNTIME_TENTHS / 10) as u32
}

fn seed(overrides: &HashMap<String, String>, baseline: &Baseline) -> RunConfig {
    RunConfig {
        uuid: overrides.get(KEY_UUID).cloned().unwrap_or_default(),
        collect_from: baseline.collect_from,
        interval: baseline.interval,
        max_slow_log_size: baseline.max_slow_log_size,
        example_queries: baseline.example_queries,
        worker_run_time: baseline.worker_run_time,
        report_limit: baseline.report_limit,
    }
}

/// Unsigned base-10, 1 to INTERVAL_MAX seconds
fn parse_interval(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Validation {
        field: KEY_INTERVAL,
        value: raw.to_string(),
        reason,
    };

    // u32::from_str accepts a leading '+', an unsigned literal has no sign
    if raw.starts_with('+') {
        return Err(invalid("invalid digit found in string".to_string()));
    }

    let seconds: u32 = raw.parse().map_err(|e: ParseIntError| invalid(e.to_string()))?;
    if seconds == 0 || seconds > INTERVAL_MAX {
        return Err(invalid(format!(
            "must be > 0 and <= {} (1 hour)",
            INTERVAL_MAX
        )));
    }

    Ok(seconds)
}

fn warn_unknown_keys(overrides: &HashMap<String, String>) {
    for key in overrides.keys() {
        if !OVERRIDE_KEYS.contains(&key.as_str()) {
            tracing::warn!("ignoring unknown override '{}'", key);
        }
    }
}
