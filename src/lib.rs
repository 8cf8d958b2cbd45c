//! qan-config - Query Analytics Configuration Library
//!
//! This library resolves the effective configuration of a MySQL query
//! analytics collector from server state, built-in defaults and user
//! overrides, and produces the statements that switch the chosen collection
//! strategy on or off.

pub mod baseline;
pub mod coerce;
pub mod connector;
pub mod constants;
pub mod directives;
pub mod logging;
pub mod models;
pub mod overrides;
pub mod resolver;

pub use baseline::{Baseline, SharedBaseline};
pub use connector::{Connector, ConnectorError, VariableSnapshot};
pub use directives::{get_mysql_config, get_mysql_config_by_name};
pub use models::{CollectFrom, ConfigError, DirectiveSet, ProbeReport, RunConfig};
pub use resolver::{resolve_with_fallback, validate_config};
