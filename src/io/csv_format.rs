//! CSV output for customer balances
//!
//! Centralizes the output format concern. The writer is pure (no file I/O)
//! for easy testing.

use crate::types::{CashbackError, Customer};
use std::io::Write;

/// Write customer balances to CSV format
///
/// Writes customers in CSV format with columns: customer, percent, pending,
/// spendable. Callers pass customers already sorted by ID for deterministic
/// output; balances are printed with two decimal places.
///
/// # Arguments
///
/// * `customers` - Customer states to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Errors
///
/// Returns an error if writing to the underlying output fails.
pub fn write_balances_csv(
    customers: &[&Customer],
    output: &mut dyn Write,
) -> Result<(), CashbackError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["customer", "percent", "pending", "spendable"])?;

    for customer in customers {
        writer.write_record(&[
            customer.id.to_string(),
            customer.cashback_percent.to_string(),
            format!("{:.2}", customer.pending_balance),
            format!("{:.2}", customer.spendable_balance),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
