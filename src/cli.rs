use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "posture-audit",
    version,
    about = "Evaluate cloud posture rules against collected inventory",
    long_about = "posture-audit runs the built-in compliance rules against a cache snapshot produced by an inventory collector and reports pass/fail findings per region."
)]
pub struct Cli {
    /// Cache snapshot (JSON) produced by the collector
    pub cache: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Configuration file (YAML, JSON or TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Evaluate the restricted (GovCloud) partition
    #[arg(long, alias = "govcloud")]
    pub restricted_partition: bool,

    /// Verbose output: list passing findings and enable debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Log filter directive (e.g. "warn", "posture_audit=debug")
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
