//! Structured logging setup
//!
//! Installs a `tracing-subscriber` formatter that writes one JSON object per
//! event to stderr, so stdout stays reserved for the resolved configuration
//! and directives.

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_LEVEL_ENV;

/// Map `-v` occurrences to a level: warn, info, then debug
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Filter from an explicit directive string, else from the `-v` count.
///
/// A directive string that does not parse falls back to the verbosity level.
pub fn build_filter(directives: Option<&str>, verbosity: u8) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(level_from_verbosity(verbosity).to_string()))
}

/// Filter from `QAN_CONFIG_LOG`, falling back to the verbosity flags
pub fn resolve_filter(verbosity: u8) -> EnvFilter {
    build_filter(std::env::var(LOG_LEVEL_ENV).ok().as_deref(), verbosity)
}

/// Install the JSON-lines subscriber on stderr
pub fn init_logging(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(resolve_filter(verbosity))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))
}
