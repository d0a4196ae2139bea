pub mod aggregator;
pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod regions;
pub mod reporter;
pub mod rules;
pub mod run;

#[cfg(test)]
pub mod test_utils;

pub use aggregator::{FindingCollector, RegionScope};
pub use cache::{CacheEntry, CacheError, CacheKey, SourceCache, SourceTrace};
pub use cli::{Cli, OutputFormat};
pub use config::{Config, ConfigError, RunSettings};
pub use engine::{FanOutOutcome, Rule, RuleRunner, fan_out, for_each_region};
pub use error::{AuditError, Result};
pub use regions::{DefaultRegions, RegionResolver, RegionSet};
pub use reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
pub use rules::{Finding, RuleMetadata, RuleOutput, RunReport, Status, Summary};
pub use run::{format_report, run_audit};
