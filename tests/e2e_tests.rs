//! End-to-end integration tests
//!
//! These tests validate the complete simulation pipeline using predefined
//! fixtures. Each test:
//! 1. Reads input.json (and rates.csv, when present) from a fixture directory
//! 2. Runs every command through the engine
//! 3. Compares the output document with expected.json
//! 4. Compares the account snapshot with expected_accounts.csv, when present
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Split payment acceptance and settlement
//! - Insufficient funds during acceptance, then a retry
//! - Multi-hop currency conversion and missing rates
//! - Malformed commands and rejected operations

#[cfg(test)]
mod tests {
    use banking_ledger_sim::runner::SimulationRunner;
    use rstest::rstest;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a fixture and compare its outputs with the expected files
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let input_path = fixture_dir.join("input.json");
        let expected_path = fixture_dir.join("expected.json");
        let rates_path = fixture_dir.join("rates.csv");
        let expected_accounts_path = fixture_dir.join("expected_accounts.csv");

        assert!(
            input_path.exists(),
            "Input file not found: {}",
            input_path.display()
        );
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let accounts_out = NamedTempFile::new().expect("Failed to create temp file");
        let runner = SimulationRunner {
            rates_file: rates_path.exists().then(|| rates_path.clone()),
            accounts_out: Some(accounts_out.path().to_path_buf()),
        };

        let mut output = Vec::new();
        runner
            .process(&input_path, &mut output)
            .unwrap_or_else(|e| panic!("Failed to run simulation: {}", e));

        let actual: Value = serde_json::from_slice(&output)
            .unwrap_or_else(|e| panic!("Output is not valid JSON: {}", e));
        let expected: Value = serde_json::from_str(
            &fs::read_to_string(&expected_path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", expected_path.display(), e)),
        )
        .unwrap_or_else(|e| panic!("Expected file is not valid JSON: {}", e));

        assert_eq!(
            actual,
            expected,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name,
            serde_json::to_string_pretty(&actual).unwrap_or_default(),
            serde_json::to_string_pretty(&expected).unwrap_or_default()
        );

        if expected_accounts_path.exists() {
            let actual_accounts = fs::read_to_string(accounts_out.path())
                .unwrap_or_else(|e| panic!("Failed to read account snapshot: {}", e));
            let expected_accounts = fs::read_to_string(&expected_accounts_path)
                .unwrap_or_else(|e| panic!("Failed to read expected accounts: {}", e));

            assert_eq!(
                actual_accounts, expected_accounts,
                "\n\nAccount snapshot mismatch for fixture: {}\n",
                fixture_name
            );
        }
    }

    #[rstest]
    #[case("split_payment_happy_path")]
    #[case("split_insufficient_then_topped_up")]
    #[case("currency_conversion")]
    #[case("malformed_and_rejected")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }
}
