#![forbid(unsafe_code)]

mod cli;
mod output;

use anyhow::{Context, Result};

use cli::{Action, CliConfig};
use qan_config::overrides::{collect_overrides, default_overrides_path};
use qan_config::{
    get_mysql_config, get_mysql_config_by_name, logging, validate_config, Baseline, RunConfig,
    SharedBaseline, VariableSnapshot,
};

fn main() -> Result<()> {
    let config = cli::parse_args()?;

    logging::init_logging(config.verbosity)?;

    let baseline = SharedBaseline::default();
    if let Some(path) = &config.server_vars {
        let mut conn = VariableSnapshot::from_path(path);
        let report = baseline
            .refresh(&mut conn)
            .with_context(|| format!("Failed to probe server state from {}", path.display()))?;
        for skipped in &report.skipped {
            tracing::info!("{} not probed: {}", skipped.name, skipped.reason);
        }
    }
    let baseline = baseline.snapshot();

    match &config.action {
        Action::Defaults => output::print_baseline(&baseline, config.json_output),
        Action::Resolve => {
            let run_config = resolve(&config, &baseline)?;
            output::print_run_config(&run_config, config.json_output)
        }
        Action::Directives { collect_from: Some(name) } => {
            let directives = get_mysql_config_by_name(name)?;
            let strategy = name.parse()?;
            output::print_directives(strategy, &directives, config.json_output)
        }
        Action::Directives { collect_from: None } => {
            let run_config = resolve(&config, &baseline)?;
            let directives = get_mysql_config(&run_config);
            output::print_directives(run_config.collect_from, &directives, config.json_output)
        }
    }
}

/// Load overrides and resolve them against the baseline
fn resolve(config: &CliConfig, baseline: &Baseline) -> Result<RunConfig> {
    let config_file = config
        .config_file
        .clone()
        .or_else(|| default_overrides_path().filter(|path| path.exists()));

    if let Some(path) = &config_file {
        tracing::info!("loading overrides from {}", path.display());
    }

    let overrides = collect_overrides(config_file.as_deref(), &config.overrides)?;
    let run_config = validate_config(&overrides, baseline)?;
    Ok(run_config)
}
