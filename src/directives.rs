//! MySQL statements that switch a collection strategy on or off
//!
//! Statements are only produced here, never executed. The caller runs each
//! list in order.

use crate::constants::*;
use crate::models::{CollectFrom, ConfigError, DirectiveSet, RunConfig};

/// Enable and disable sequences for the config's collection strategy
pub fn get_mysql_config(config: &RunConfig) -> DirectiveSet {
    directives_for(config.collect_from)
}

/// Same as [`get_mysql_config`] for a strategy named by string.
///
/// Unknown names fail with [`ConfigError::UnsupportedStrategy`] even though a
/// validated `RunConfig` can never carry one.
pub fn get_mysql_config_by_name(collect_from: &str) -> Result<DirectiveSet, ConfigError> {
    let strategy: CollectFrom = collect_from.parse()?;
    Ok(directives_for(strategy))
}

pub fn directives_for(strategy: CollectFrom) -> DirectiveSet {
    match strategy {
        CollectFrom::SlowLog => slow_log_directives(),
        CollectFrom::PerfSchema => perf_schema_directives(),
    }
}

fn slow_log_directives() -> DirectiveSet {
    // log_output must not change while the slow log is on, so turn it off
    // first and back on only after the output target is set
    let enable = [
        SQL_SLOW_LOG_OFF,
        SQL_LOG_OUTPUT_FILE,
        SQL_SLOW_LOG_ON,
        SQL_TIME_ZONE_UTC,
    ];
    let disable = [SQL_SLOW_LOG_OFF];

    DirectiveSet {
        enable: enable.iter().map(|s| s.to_string()).collect(),
        disable: disable.iter().map(|s| s.to_string()).collect(),
    }
}

fn perf_schema_directives() -> DirectiveSet {
    // performance_schema itself can only be enabled at server startup
    DirectiveSet {
        enable: vec![SQL_TIME_ZONE_UTC.to_string()],
        disable: Vec::new(),
    }
}
