//! Collaborator traits for the split payment coordinator and the engine
//!
//! The coordinator only needs to look up accounts and users, move balances and
//! append history entries. These traits describe exactly that, so the
//! coordinator can be driven by the in-memory `Bank` or by a test double.

use crate::types::{Account, LedgerError, TransactionRecord, User};
use rust_decimal::Decimal;

/// Account lookup and balance mutation
pub trait AccountStore {
    /// Look up an account by IBAN
    fn account(&self, iban: &str) -> Option<&Account>;

    /// Add funds to an account
    fn credit(&mut self, iban: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Remove funds from an account, failing if the balance does not cover them
    fn withdraw(&mut self, iban: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Remove funds from an account without a balance check
    ///
    /// Used when the balance was verified earlier by the caller.
    fn debit_unchecked(&mut self, iban: &str, amount: Decimal) -> Result<(), LedgerError>;
}

/// User lookup
pub trait UserStore {
    /// Look up a user by email
    fn user(&self, email: &str) -> Option<&User>;
}

/// Append-only transaction history
pub trait TransactionLog {
    /// Append an entry to an account's history and to its owner's history
    fn record(&mut self, iban: &str, record: TransactionRecord) -> Result<(), LedgerError>;

    /// Append an entry to a user's history only
    fn record_for_user(&mut self, email: &str, record: TransactionRecord)
        -> Result<(), LedgerError>;
}
