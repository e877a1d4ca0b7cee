use clap::Parser;
use std::path::PathBuf;

/// Run cashback scenarios and report customer balances
#[derive(Parser, Debug)]
#[command(name = "cashback-engine")]
#[command(about = "Run cashback scenarios and report customer balances", long_about = None)]
pub struct CliArgs {
    /// Input JSON scenario file
    #[arg(value_name = "SCENARIO", help = "Path to the scenario JSON file")]
    pub scenario_file: PathBuf,

    /// Log filter directive passed to tracing-subscriber
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Log filter (e.g. 'info', 'cashback_engine=debug')"
    )]
    pub log_level: String,
}
