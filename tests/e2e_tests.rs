//! End-to-end integration tests
//!
//! These tests validate the complete scenario pipeline using predefined JSON
//! test fixtures. Each test:
//! 1. Reads input.json from a fixture directory
//! 2. Drives all events through the engine
//! 3. Generates the balances CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Accrual happy path and multi-currency conversion
//! - Accrual skip paths (refund, no customer, zero percent)
//! - Settlement transfer and debt forfeiture
//! - Redemption with cooldown rejection
//! - Order cancellation compensation
//! - Credit-limit rejection at order confirmation

#[cfg(test)]
mod tests {
    use cashback_engine::audit::MemorySink;
    use cashback_engine::io::{load_scenario, run_scenario, write_balances_csv};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a test fixture by processing input.json and comparing with
    /// expected.csv
    ///
    /// # Arguments
    ///
    /// * `fixture_name` - Name of the fixture directory (e.g. "accrual_happy_path")
    ///
    /// # Panics
    ///
    /// Panics if input or expected files cannot be read, the scenario fails,
    /// or the output does not match the expectation.
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.json", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let scenario = load_scenario(Path::new(&input_path))
            .unwrap_or_else(|e| panic!("Failed to load scenario: {}", e));

        let mut sink = MemorySink::new();
        let engine = run_scenario(scenario, &mut sink)
            .unwrap_or_else(|e| panic!("Failed to run scenario: {}", e));

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        write_balances_csv(&engine.customers().all_sorted(), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to write balances: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    #[rstest]
    #[case::accrual_happy_path("accrual_happy_path")]
    #[case::multi_currency_accrual("multi_currency_accrual")]
    #[case::accrual_skip_paths("accrual_skip_paths")]
    #[case::settlement_transfer_and_forfeit("settlement_transfer_and_forfeit")]
    #[case::redemption_cooldown("redemption_cooldown")]
    #[case::cancel_compensation("cancel_compensation")]
    #[case::credit_limit_rejection("credit_limit_rejection")]
    fn test_fixture(#[case] fixture_name: &str) {
        run_test_fixture(fixture_name);
    }
}
