//! Output formatting module
//!
//! Handles:
//! - Human-readable rendering of the baseline, resolved config and directives
//! - JSON output using the agent's wire field names

use anyhow::Result;
use serde_json::json;

use qan_config::{Baseline, CollectFrom, DirectiveSet, RunConfig};

/// Format the baseline defaults as human-readable text
pub fn format_baseline_human(baseline: &Baseline) -> String {
    [
        "Baseline defaults:".to_string(),
        format!("  CollectFrom: {}", baseline.collect_from),
        format!("  Interval: {}s", baseline.interval),
        format!("  LongQueryTime: {}s", baseline.long_query_time),
        format!("  MaxSlowLogSize: {} bytes", baseline.max_slow_log_size),
        format!("  RemoveOldSlowLogs: {}", baseline.remove_old_slow_logs),
        format!("  ExampleQueries: {}", baseline.example_queries),
        format!("  SlowLogVerbosity: {}", baseline.slow_log_verbosity),
        format!("  RateLimit: {}", baseline.rate_limit),
        format!("  LogSlowAdminStatements: {}", baseline.log_slow_admin_statements),
        format!("  LogSlowSlaveStatements: {}", baseline.log_slow_slave_statements),
        format!("  WorkerRunTime: {}s", baseline.worker_run_time),
        format!("  ReportLimit: {}", baseline.report_limit),
    ]
    .join("\n")
}

/// Format a resolved configuration as human-readable text
pub fn format_run_config_human(config: &RunConfig) -> String {
    let uuid = if config.uuid.is_empty() {
        "(none)"
    } else {
        config.uuid.as_str()
    };

    [
        "Resolved configuration:".to_string(),
        format!("  UUID: {}", uuid),
        format!("  CollectFrom: {}", config.collect_from),
        format!("  Interval: {}s", config.interval),
        format!("  MaxSlowLogSize: {} bytes", config.max_slow_log_size),
        format!("  ExampleQueries: {}", config.example_queries),
        format!("  WorkerRunTime: {}s", config.worker_run_time),
        format!("  ReportLimit: {}", config.report_limit),
    ]
    .join("\n")
}

/// Format directives as numbered statement lists
pub fn format_directives_human(strategy: CollectFrom, directives: &DirectiveSet) -> String {
    let mut lines = vec![format!("Directives for {}:", strategy), "  Enable:".to_string()];
    lines.extend(numbered(&directives.enable));
    lines.push("  Disable:".to_string());
    lines.extend(numbered(&directives.disable));
    lines.join("\n")
}

fn numbered(statements: &[String]) -> Vec<String> {
    if statements.is_empty() {
        return vec!["    (none)".to_string()];
    }
    statements
        .iter()
        .enumerate()
        .map(|(i, statement)| format!("    {}. {};", i + 1, statement))
        .collect()
}

pub fn print_baseline(baseline: &Baseline, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(baseline)?);
    } else {
        println!("{}", format_baseline_human(baseline));
    }
    Ok(())
}

pub fn print_run_config(config: &RunConfig, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        println!("{}", format_run_config_human(config));
    }
    Ok(())
}

pub fn print_directives(strategy: CollectFrom, directives: &DirectiveSet, json_output: bool) -> Result<()> {
    if json_output {
        let value = json!({
            "CollectFrom": strategy,
            "enable": directives.enable,
            "disable": directives.disable,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", format_directives_human(strategy, directives));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qan_config::directives::directives_for;

    #[test]
    fn test_run_config_human_shows_missing_uuid() {
        let config = RunConfig {
            uuid: String::new(),
            collect_from: CollectFrom::SlowLog,
            interval: 60,
            max_slow_log_size: 1_073_741_824,
            example_queries: true,
            worker_run_time: 54,
            report_limit: 200,
        };

        let text = format_run_config_human(&config);
        assert!(text.contains("UUID: (none)"));
        assert!(text.contains("WorkerRunTime: 54s"));
    }

    #[test]
    fn test_directives_human_numbers_statements_in_order() {
        let text = format_directives_human(CollectFrom::SlowLog, &directives_for(CollectFrom::SlowLog));
        let off = text.find("1. SET GLOBAL slow_query_log=OFF;").unwrap();
        let output = text.find("2. SET GLOBAL log_output='file';").unwrap();
        let on = text.find("3. SET GLOBAL slow_query_log=ON;").unwrap();
        assert!(off < output && output < on);
    }

    #[test]
    fn test_directives_human_marks_empty_disable() {
        let text = format_directives_human(
            CollectFrom::PerfSchema,
            &directives_for(CollectFrom::PerfSchema),
        );
        assert!(text.ends_with("  Disable:\n    (none)"));
    }
}
