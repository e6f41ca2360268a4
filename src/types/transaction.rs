//! Transaction history types
//!
//! Every balance-affecting (or attempted) operation appends a
//! `TransactionRecord` to the account's history and to its owner's history.

use super::currency::{format_amount, Currency};
use super::split::SplitId;
use rust_decimal::Decimal;

/// Command timestamp as supplied by the input document
pub type Timestamp = u64;

/// What a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// An account was opened
    AccountCreated,

    /// Funds were credited to an account
    FundsAdded,

    /// Outgoing side of a transfer
    TransferSent,

    /// Incoming side of a transfer
    TransferReceived,

    /// A transfer was refused for lack of funds
    InsufficientFunds,

    /// An account could not be closed because it still held funds
    AccountDeletionFailed,

    /// A participant's share of a settled split payment
    SplitPayment,
}

impl TransactionKind {
    /// Stable name used in the output document
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::AccountCreated => "accountCreated",
            TransactionKind::FundsAdded => "fundsAdded",
            TransactionKind::TransferSent => "sent",
            TransactionKind::TransferReceived => "received",
            TransactionKind::InsufficientFunds => "insufficientFunds",
            TransactionKind::AccountDeletionFailed => "accountDeletionFailed",
            TransactionKind::SplitPayment => "splitPayment",
        }
    }
}

/// A single entry in an account or user history
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub timestamp: Timestamp,
    pub description: String,
    pub kind: TransactionKind,

    /// Account the entry is filed against
    pub account: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<Currency>,
    pub sender: Option<String>,
    pub receiver: Option<String>,

    /// Split payments only: every participant, in request order
    pub involved_accounts: Vec<String>,

    /// Split payments only: owed amount per participant, positional
    pub amount_for_users: Vec<Decimal>,

    pub split_id: Option<SplitId>,
}

impl TransactionRecord {
    fn bare(timestamp: Timestamp, kind: TransactionKind, description: impl Into<String>) -> Self {
        TransactionRecord {
            timestamp,
            description: description.into(),
            kind,
            account: None,
            amount: None,
            currency: None,
            sender: None,
            receiver: None,
            involved_accounts: Vec::new(),
            amount_for_users: Vec::new(),
            split_id: None,
        }
    }

    /// "New account created"
    pub fn account_created(timestamp: Timestamp, iban: &str, currency: &Currency) -> Self {
        TransactionRecord {
            account: Some(iban.to_string()),
            currency: Some(currency.clone()),
            ..Self::bare(timestamp, TransactionKind::AccountCreated, "New account created")
        }
    }

    /// "Funds added"
    pub fn funds_added(timestamp: Timestamp, iban: &str, amount: Decimal, currency: &Currency) -> Self {
        TransactionRecord {
            account: Some(iban.to_string()),
            amount: Some(amount),
            currency: Some(currency.clone()),
            ..Self::bare(timestamp, TransactionKind::FundsAdded, "Funds added")
        }
    }

    /// One side of a completed transfer
    pub fn transfer(
        timestamp: Timestamp,
        kind: TransactionKind,
        description: &str,
        sender: &str,
        receiver: &str,
        amount: Decimal,
        currency: &Currency,
    ) -> Self {
        let account = match kind {
            TransactionKind::TransferReceived => receiver,
            _ => sender,
        };
        TransactionRecord {
            account: Some(account.to_string()),
            amount: Some(amount),
            currency: Some(currency.clone()),
            sender: Some(sender.to_string()),
            receiver: Some(receiver.to_string()),
            ..Self::bare(timestamp, kind, description)
        }
    }

    /// A transfer refused because the sender was short
    pub fn insufficient_funds(
        timestamp: Timestamp,
        sender: &str,
        receiver: &str,
        amount: Decimal,
        currency: &Currency,
    ) -> Self {
        TransactionRecord {
            account: Some(sender.to_string()),
            amount: Some(amount),
            currency: Some(currency.clone()),
            sender: Some(sender.to_string()),
            receiver: Some(receiver.to_string()),
            ..Self::bare(timestamp, TransactionKind::InsufficientFunds, "Insufficient funds")
        }
    }

    /// An account close refused because funds remain
    pub fn deletion_failed(timestamp: Timestamp, iban: &str) -> Self {
        TransactionRecord {
            account: Some(iban.to_string()),
            ..Self::bare(
                timestamp,
                TransactionKind::AccountDeletionFailed,
                "Account couldn't be deleted - there are funds remaining",
            )
        }
    }

    /// A participant's debit from a settled split payment
    pub fn split_payment(
        timestamp: Timestamp,
        split_id: SplitId,
        iban: &str,
        total: Decimal,
        currency: &Currency,
        involved_accounts: &[String],
        amount_for_users: &[Decimal],
    ) -> Self {
        TransactionRecord {
            account: Some(iban.to_string()),
            amount: Some(total),
            currency: Some(currency.clone()),
            involved_accounts: involved_accounts.to_vec(),
            amount_for_users: amount_for_users.to_vec(),
            split_id: Some(split_id),
            ..Self::bare(
                timestamp,
                TransactionKind::SplitPayment,
                format!("Split payment of {} {}", format_amount(total), currency),
            )
        }
    }
}
