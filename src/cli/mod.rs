//! CLI argument parsing module
//!
//! Handles command-line interface using clap, including:
//! - `defaults`: show the baseline, optionally probed from a variable capture
//! - `resolve`: apply overrides and print the resolved configuration
//! - `directives`: print the enable/disable statements for a strategy
//! - Verbosity and JSON output selection

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// What the invocation asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Defaults,
    Resolve,
    Directives {
        /// Strategy named on the command line instead of resolved
        collect_from: Option<String>,
    },
}

/// Parsed command line
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub action: Action,
    /// Captured `SHOW GLOBAL VARIABLES` to probe before resolving
    pub server_vars: Option<PathBuf>,
    /// TOML override file
    pub config_file: Option<PathBuf>,
    /// Raw `KEY=VALUE` overrides, applied after the file
    pub overrides: Vec<String>,
    /// Whether to output JSON format
    pub json_output: bool,
    /// Number of `-v` flags
    pub verbosity: u8,
}

fn server_vars_arg() -> Arg {
    Arg::new("server-vars")
        .long("server-vars")
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Probe server defaults from captured SHOW GLOBAL VARIABLES output (tab-separated or TOML)")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .short('j')
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn override_args() -> [Arg; 2] {
    [
        Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .help("TOML file of overrides (UUID, CollectFrom, Interval, ExampleQueries)"),
        Arg::new("set")
            .short('s')
            .long("set")
            .value_name("KEY=VALUE")
            .help("Override a configuration key; repeatable, wins over --config")
            .action(ArgAction::Append),
    ]
}

/// Build the clap command tree
pub fn build_command() -> Command {
    Command::new("qan-config")
        .version(env!("QAN_CONFIG_VERSION"))
        .long_version(concat!(env!("QAN_CONFIG_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Resolve query analytics collector configuration for MySQL")
        .long_about(
            "Resolve the effective query analytics configuration from server state, \
             built-in defaults and overrides, and print the MySQL statements that \
             enable or disable slow log or performance_schema collection.",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("defaults")
                .about("Show the baseline defaults")
                .arg(server_vars_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Apply overrides to the baseline and print the resolved configuration")
                .arg(server_vars_arg())
                .args(override_args())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("directives")
                .about("Print the statements that enable and disable collection")
                .arg(server_vars_arg())
                .args(override_args())
                .arg(
                    Arg::new("collect-from")
                        .long("collect-from")
                        .value_name("STRATEGY")
                        .help("Strategy to generate statements for (slowlog or perfschema) instead of resolving one")
                        // Overrides only feed resolution, which a named strategy skips
                        .conflicts_with_all(["set", "config"]),
                )
                .arg(json_arg()),
        )
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    from_matches(&build_command().get_matches())
}

/// Parse an explicit argument list
pub fn parse_from<I, T>(args: I) -> Result<CliConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    from_matches(&build_command().try_get_matches_from(args)?)
}

fn from_matches(matches: &ArgMatches) -> Result<CliConfig> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("No subcommand given"))?;

    // -v is global and may appear before or after the subcommand
    let verbosity = matches.get_count("verbose").max(sub.get_count("verbose"));

    let action = match name {
        "defaults" => Action::Defaults,
        "resolve" => Action::Resolve,
        "directives" => Action::Directives {
            collect_from: sub.get_one::<String>("collect-from").cloned(),
        },
        other => anyhow::bail!("Unknown subcommand: {}", other),
    };

    // Only resolve and directives define the override arguments
    let takes_overrides = !matches!(action, Action::Defaults);

    let config_file = if takes_overrides {
        sub.get_one::<PathBuf>("config").cloned()
    } else {
        None
    };

    let overrides = if takes_overrides {
        sub.get_many::<String>("set")
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Ok(CliConfig {
        action,
        server_vars: sub.get_one::<PathBuf>("server-vars").cloned(),
        config_file,
        overrides,
        json_output: sub.get_flag("json"),
        verbosity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_resolve_collects_repeated_overrides() {
        let config = parse_from([
            "qan-config",
            "-vv",
            "resolve",
            "--set",
            "Interval=30",
            "-s",
            "CollectFrom=perfschema",
            "--config",
            "/etc/qan.toml",
            "--json",
        ])
        .unwrap();

        assert_eq!(config.action, Action::Resolve);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.overrides, vec!["Interval=30", "CollectFrom=perfschema"]);
        assert_eq!(config.config_file, Some(PathBuf::from("/etc/qan.toml")));
        assert!(config.json_output);
        assert!(config.server_vars.is_none());
    }

    #[test]
    fn test_directives_with_named_strategy() {
        let config = parse_from(["qan-config", "directives", "--collect-from", "perfschema"]).unwrap();
        assert_eq!(
            config.action,
            Action::Directives {
                collect_from: Some("perfschema".to_string())
            }
        );
        assert!(!config.json_output);
    }

    #[test]
    fn test_named_strategy_rejects_overrides() {
        assert!(parse_from(["qan-config", "directives", "--collect-from", "slowlog", "--set", "Interval=abc"]).is_err());
        assert!(parse_from(["qan-config", "directives", "--collect-from", "slowlog", "--config", "qan.toml"]).is_err());
    }

    #[test]
    fn test_defaults_with_server_vars() {
        let config = parse_from(["qan-config", "defaults", "--server-vars", "vars.tsv"]).unwrap();
        assert_eq!(config.action, Action::Defaults);
        assert_eq!(config.server_vars, Some(PathBuf::from("vars.tsv")));
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_defaults_rejects_overrides() {
        assert!(parse_from(["qan-config", "defaults", "--set", "Interval=5"]).is_err());
    }
}
