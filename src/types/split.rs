//! Split payment result types
//!
//! The coordinator itself lives in `core::split_payment`; these are the values
//! it hands back to the engine.

use super::currency::{format_amount, Currency};
use super::transaction::Timestamp;
use rust_decimal::Decimal;

/// Identifier of a split payment request
///
/// Assigned by the coordinator in increasing order, starting at 1.
pub type SplitId = u64;

/// Returned by a successful `initiate`
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInitiated {
    /// Id every later `accept` must quote
    pub id: SplitId,
    /// Sum of the owed amounts, in the request currency
    pub total: Decimal,
    /// Request currency
    pub currency: Currency,
    /// Participant IBANs, in request order
    pub accounts: Vec<String>,
    /// Creation timestamp
    pub timestamp: Timestamp,
}

impl SplitInitiated {
    /// "Split payment of 100.00 RON"
    pub fn description(&self) -> String {
        format!("Split payment of {} {}", format_amount(self.total), self.currency)
    }
}

/// Returned by an `accept` that settled the request
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// The settled request
    pub id: SplitId,
    /// Every account that failed a balance check during any acceptance
    /// attempt for this request, in the order first seen
    pub ever_insufficient: Vec<String>,
}
