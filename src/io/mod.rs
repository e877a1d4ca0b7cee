//! Input/output module
//!
//! Contains the scenario file format and the balances CSV output:
//! - `scenario`: JSON scenario loading and the event-driven runner
//! - `csv_format`: customer balance serialization

pub mod csv_format;
pub mod scenario;

pub use csv_format::write_balances_csv;
pub use scenario::{load_scenario, run_scenario, Scenario, ScenarioEvent};
