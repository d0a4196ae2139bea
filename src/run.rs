//! Orchestration for one CLI invocation.

use crate::cache::SourceCache;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::engine::RuleRunner;
use crate::error::Result;
use crate::regions::DefaultRegions;
use crate::reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
use crate::rules::{RunReport, builtin};
use std::sync::Arc;
use tracing::{debug, info};

/// Load configuration and cache, run every built-in rule and build the report.
pub fn run_audit(cli: &Cli) -> Result<RunReport> {
    let config = load_config(cli)?;
    let restricted = cli.restricted_partition || config.settings.restricted_partition_mode;
    let settings = config.settings.with_restricted_partition(restricted);

    let cache = SourceCache::from_file(&cli.cache)?;
    let resolver = DefaultRegions::new().with_overrides(config.regions);
    let runner = RuleRunner::new(Arc::new(cache)).with_resolver(Arc::new(resolver));

    let rules = builtin::all_rules();
    info!(rules = rules.len(), cache = %cli.cache.display(), "Starting audit");
    let outputs = runner.run_blocking(rules, &settings)?;

    let report = RunReport::new(outputs);
    debug!(
        ok = report.summary.ok,
        fail = report.summary.fail,
        warn = report.summary.warn,
        unknown = report.summary.unknown,
        "Audit finished"
    );
    Ok(report)
}

/// An explicit `--config` must load; otherwise fall back to discovery.
fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => Ok(Config::from_file(path)?),
        None => {
            let cwd = std::env::current_dir().ok();
            Ok(Config::load(cwd.as_deref()))
        }
    }
}

pub fn format_report(cli: &Cli, report: &RunReport) -> String {
    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose).report(report),
        OutputFormat::Json => JsonReporter::new().report(report),
    }
}
