//! Cashback Engine CLI
//!
//! Command-line interface for running cashback scenarios from JSON files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- scenario.json > balances.csv
//! cargo run -- --log-level info scenario.json > balances.csv
//! ```
//!
//! The program loads the scenario file, drives its events through the cashback
//! engine, and writes the final customer balances as CSV to stdout. Audit
//! notifications and rejected operations are logged to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed scenario, engine failure)

use cashback_engine::audit::TracingSink;
use cashback_engine::cli;
use cashback_engine::io::{load_scenario, run_scenario, write_balances_csv};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    let result = load_scenario(&args.scenario_file).and_then(|scenario| {
        let mut sink = TracingSink;
        let engine = run_scenario(scenario, &mut sink)?;
        let mut output = std::io::stdout();
        write_balances_csv(&engine.customers().all_sorted(), &mut output)
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
