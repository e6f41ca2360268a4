//! Account-related types for the banking ledger
//!
//! This module defines the Account structure and the account kinds a user can
//! open.

use super::currency::Currency;
use super::transaction::TransactionRecord;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Kind of account, as named in `addAccount`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Everyday account
    Classic,

    /// Interest-bearing account
    Savings,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Classic => "classic",
            AccountKind::Savings => "savings",
        }
    }
}

/// A bank account
///
/// Accounts are identified by IBAN, independently of the user that owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Account identifier
    pub iban: String,

    /// Email of the owning user
    pub owner: String,

    /// Currency every amount on this account is held in
    pub currency: Currency,

    /// Current balance
    ///
    /// Checked debits never take this below zero. Split payment settlement
    /// debits unconditionally and may.
    pub balance: Decimal,

    pub kind: AccountKind,

    /// Savings accounts only
    pub interest_rate: Option<Decimal>,

    /// History of operations on this account, oldest first
    pub transactions: Vec<TransactionRecord>,
}

impl Account {
    /// Create an empty account
    ///
    /// # Arguments
    ///
    /// * `iban` - The account identifier
    /// * `owner` - Email of the owning user
    /// * `currency` - Account currency
    /// * `kind` - Classic or savings
    pub fn new(iban: String, owner: String, currency: Currency, kind: AccountKind) -> Self {
        Account {
            iban,
            owner,
            currency,
            balance: Decimal::ZERO,
            kind,
            interest_rate: None,
            transactions: Vec::new(),
        }
    }
}
