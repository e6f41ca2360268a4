//! CSV format handling for exchange-rate input and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - RateCsvRecord structure for deserialization
//! - Conversion from CSV records to rate edges
//! - Account snapshot serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::rate_graph::RateEdge;
use crate::types::{format_amount, Account, Currency};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the rate file format with columns: from, to, rate, timestamp.
/// The timestamp column may be left empty.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RateCsvRecord {
    pub from: String,
    pub to: String,
    pub rate: String,
    pub timestamp: Option<u64>,
}

/// Convert a RateCsvRecord to a RateEdge
///
/// # Returns
///
/// Result containing either:
/// - Ok(RateEdge) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_rate_record(csv_record: RateCsvRecord) -> Result<RateEdge, String> {
    let from = csv_record.from.trim();
    let to = csv_record.to.trim();
    if from.is_empty() || to.is_empty() {
        return Err(format!(
            "Rate '{}' is missing a currency ({} -> {})",
            csv_record.rate, from, to
        ));
    }

    let rate = Decimal::from_str(csv_record.rate.trim()).map_err(|_| {
        format!(
            "Invalid rate '{}' for {} -> {}",
            csv_record.rate, from, to
        )
    })?;

    Ok(RateEdge {
        from: Currency::new(from),
        to: Currency::new(to),
        rate,
        timestamp: csv_record.timestamp.unwrap_or_default(),
    })
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: iban, owner, currency, balance, type
/// Accounts are sorted by IBAN for deterministic output.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["iban", "owner", "currency", "balance", "type"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.iban.cmp(&b.iban));

    for account in sorted_accounts {
        writer
            .write_record([
                account.iban.as_str(),
                account.owner.as_str(),
                account.currency.code(),
                format_amount(account.balance).as_str(),
                account.kind.as_str(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
