//! Commands accepted by the ledger engine
//!
//! Each entry of the input document's `commands` array decodes into one
//! `Command`. The `command` field selects the variant; unknown extra fields
//! are ignored.

use super::account::AccountKind;
use super::currency::Currency;
use super::split::SplitId;
use super::transaction::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "command",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    /// Open an account for an existing user
    AddAccount {
        email: String,
        currency: Currency,
        account_type: AccountKind,
        #[serde(default)]
        interest_rate: Option<Decimal>,
        timestamp: Timestamp,
    },

    /// Credit an account
    AddFunds {
        account: String,
        amount: Decimal,
        timestamp: Timestamp,
    },

    /// Close an empty account
    DeleteAccount {
        email: String,
        account: String,
        timestamp: Timestamp,
    },

    /// Transfer between two accounts, converting currency when needed
    SendMoney {
        account: String,
        receiver: String,
        amount: Decimal,
        #[serde(default)]
        description: String,
        timestamp: Timestamp,
    },

    /// Open a split payment request
    SplitPayment {
        accounts: Vec<String>,
        amount_for_users: Vec<Decimal>,
        currency: Currency,
        timestamp: Timestamp,
    },

    /// Accept a pending split payment on behalf of a user
    AcceptSplitPayment {
        email: String,
        split_id: SplitId,
        timestamp: Timestamp,
    },

    PrintUsers {
        timestamp: Timestamp,
    },

    PrintTransactions {
        email: String,
        timestamp: Timestamp,
    },
}

impl Command {
    /// Every accepted value of the `command` field
    pub const NAMES: [&'static str; 8] = [
        "addAccount",
        "addFunds",
        "deleteAccount",
        "sendMoney",
        "splitPayment",
        "acceptSplitPayment",
        "printUsers",
        "printTransactions",
    ];

    /// Name as it appears in the `command` field
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddAccount { .. } => "addAccount",
            Command::AddFunds { .. } => "addFunds",
            Command::DeleteAccount { .. } => "deleteAccount",
            Command::SendMoney { .. } => "sendMoney",
            Command::SplitPayment { .. } => "splitPayment",
            Command::AcceptSplitPayment { .. } => "acceptSplitPayment",
            Command::PrintUsers { .. } => "printUsers",
            Command::PrintTransactions { .. } => "printTransactions",
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Command::AddAccount { timestamp, .. }
            | Command::AddFunds { timestamp, .. }
            | Command::DeleteAccount { timestamp, .. }
            | Command::SendMoney { timestamp, .. }
            | Command::SplitPayment { timestamp, .. }
            | Command::AcceptSplitPayment { timestamp, .. }
            | Command::PrintUsers { timestamp }
            | Command::PrintTransactions { timestamp, .. } => *timestamp,
        }
    }
}
