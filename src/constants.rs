//! Global constants for qan-config
//!
//! Centralized location for built-in defaults, validation bounds, override
//! keys, probed server variables and the statements sent to the server.

use crate::models::CollectFrom;

/// Application name used for the binary, config directory and log target
pub const APP_NAME: &str = "qan-config";

/// Override file looked up under the user's config directory
pub const DEFAULT_OVERRIDES_FILE: &str = "qan.toml";

/// Environment variable that overrides the CLI verbosity flags
pub const LOG_LEVEL_ENV: &str = "QAN_CONFIG_LOG";

//
// Built-in baseline defaults
//

pub const DEFAULT_COLLECT_FROM: CollectFrom = CollectFrom::SlowLog;
/// Seconds between collection reports (1 minute)
pub const DEFAULT_INTERVAL: u32 = 60;
/// Seconds (1ms)
pub const DEFAULT_LONG_QUERY_TIME: f64 = 0.001;
/// Bytes (1G)
pub const DEFAULT_MAX_SLOW_LOG_SIZE: i64 = 1_073_741_824;
pub const DEFAULT_REMOVE_OLD_SLOW_LOGS: bool = true;
pub const DEFAULT_EXAMPLE_QUERIES: bool = true;
/// All metrics, Percona Server
pub const DEFAULT_SLOW_LOG_VERBOSITY: &str = "full";
/// Log 1 of every N queries (1%), Percona Server
pub const DEFAULT_RATE_LIMIT: u32 = 100;
pub const DEFAULT_LOG_SLOW_ADMIN_STATEMENTS: bool = true;
pub const DEFAULT_LOG_SLOW_SLAVE_STATEMENTS: bool = true;
pub const DEFAULT_WORKER_RUNTIME: u32 = 55;
pub const DEFAULT_REPORT_LIMIT: u32 = 200;

//
// Validation bounds
//

/// Note: error text in resolver.rs must match this bound
pub const INTERVAL_MAX: u32 = 3600;

/// Worker run time as a fraction of the interval, in tenths
pub const WORKER_RUNTIME_TENTHS: u64 = 9;

//
// Override keys (wire names of the agent's QAN config)
//

pub const KEY_UUID: &str = "UUID";
pub const KEY_COLLECT_FROM: &str = "CollectFrom";
pub const KEY_INTERVAL: &str = "Interval";
pub const KEY_EXAMPLE_QUERIES: &str = "ExampleQueries";

/// Keys the resolver understands; anything else is ignored
pub const OVERRIDE_KEYS: &[&str] = &[KEY_UUID, KEY_COLLECT_FROM, KEY_INTERVAL, KEY_EXAMPLE_QUERIES];

//
// Probed server variables
//

pub const VAR_PERFORMANCE_SCHEMA: &str = "performance_schema";
pub const VAR_LONG_QUERY_TIME: &str = "long_query_time";
pub const VAR_LOG_SLOW_ADMIN_STATEMENTS: &str = "log_slow_admin_statements";
pub const VAR_LOG_SLOW_RATE_LIMIT: &str = "log_slow_rate_limit";
pub const VAR_LOG_SLOW_SLAVE_STATEMENTS: &str = "log_slow_slave_statements";
pub const VAR_LOG_SLOW_VERBOSITY: &str = "log_slow_verbosity";

//
// Server statements
//

pub const SQL_SLOW_LOG_OFF: &str = "SET GLOBAL slow_query_log=OFF";
/// Available as of MySQL 5.1.6
pub const SQL_LOG_OUTPUT_FILE: &str = "SET GLOBAL log_output='file'";
pub const SQL_SLOW_LOG_ON: &str = "SET GLOBAL slow_query_log=ON";
pub const SQL_TIME_ZONE_UTC: &str = "SET time_zone='+0:00'";
