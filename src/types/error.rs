//! Error types for the banking ledger
//!
//! This module defines every error that can occur while loading the input
//! document or executing a command. Errors are designed to double as the
//! user-facing `description` of a failed command in the output document.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parsing Errors**: Malformed JSON/CSV, unknown commands
//! - **Validation Errors**: Bad amounts, unknown users or accounts, mismatched split lists
//! - **Business-Rule Blocks**: Insufficient funds, incomplete split acceptance
//! - **Conversion Errors**: No exchange-rate route between two currencies

use super::currency::Currency;
use super::split::SplitId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
///
/// Every variant is recoverable from the engine's point of view: a failed
/// command is reported and the next command runs. Only the I/O variants are
/// fatal, and only when they stop the input from being read at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Input document or rate file could not be parsed
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A command entry names no command this engine runs
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The command name, or `<unnamed>` when the entry had none
        command: String,
    },

    /// A command entry names a known command but could not be decoded
    #[error("Invalid command '{command}': {message}")]
    InvalidCommand {
        /// The command name
        command: String,
        /// Decoder message
        message: String,
    },

    /// No user is registered under the given email
    #[error("User not found")]
    UserNotFound {
        /// The email that was looked up
        email: String,
    },

    /// No account exists with the given IBAN (or it belongs to someone else)
    #[error("Account not found")]
    AccountNotFound {
        /// The IBAN that was looked up
        iban: String,
    },

    /// Transfer source account does not exist
    #[error("Sender account not found")]
    SenderNotFound {
        /// The IBAN that was looked up
        iban: String,
    },

    /// Transfer destination account does not exist
    #[error("Receiver account not found")]
    ReceiverNotFound {
        /// The IBAN that was looked up
        iban: String,
    },

    /// Amount is zero, negative, or sums to a non-positive total
    #[error("Invalid amount")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Account balance does not cover the requested debit
    #[error("Insufficient funds")]
    InsufficientFunds {
        /// Account that was short
        iban: String,
        /// Balance at the time of the check
        available: Decimal,
        /// Amount that was requested
        requested: Decimal,
    },

    /// Account still holds funds and cannot be closed
    #[error("Account couldn't be deleted - see transactions for details")]
    AccountNotEmpty {
        /// Account that was kept open
        iban: String,
        /// Remaining balance
        balance: Decimal,
    },

    /// No path in the rate graph connects the two currencies
    #[error("No exchange rate available from {from} to {to}")]
    RateUnavailable {
        /// Source currency
        from: Currency,
        /// Target currency
        to: Currency,
    },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {iban}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account involved
        iban: String,
    },

    /// Participant list and amount list differ in length
    #[error("Mismatch between accounts and amounts")]
    AmountsMismatch {
        /// Number of participant accounts
        accounts: usize,
        /// Number of owed amounts
        amounts: usize,
    },

    /// The same account was named twice in one split payment
    #[error("Account {iban} appears more than once in the split payment")]
    DuplicateParticipant {
        /// The repeated IBAN
        iban: String,
    },

    /// A split payment names an account that does not exist
    #[error("Account not found: {iban}")]
    SplitAccountNotFound {
        /// The first unresolved participant
        iban: String,
        /// Every participant named by the request
        involved_accounts: Vec<String>,
        /// Timestamp of the request
        timestamp: u64,
    },

    /// No pending split payment carries the given id
    #[error("No split payment accounts found")]
    NoPendingSplit {
        /// The id that was looked up
        split_id: SplitId,
    },

    /// The accepting user owns none of the split payment's accounts
    #[error("User {email} has no account in split payment {split_id}")]
    NotAParticipant {
        /// Accepting user
        email: String,
        /// Split payment id
        split_id: SplitId,
    },

    /// At least one participant has not accepted yet
    #[error("Not all accounts have accepted the split payment")]
    SplitNotAllAccepted {
        /// Split payment id
        split_id: SplitId,
    },

    /// A participant's balance did not cover its share during this acceptance
    #[error("One or more accounts have insufficient funds")]
    SplitInsufficientFunds {
        /// Split payment id
        split_id: SplitId,
        /// The last account found short during this acceptance
        last_account: String,
        /// Timestamp of the split payment request
        timestamp: u64,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        let line = match error.line() {
            0 => None,
            line => Some(line as u64),
        };

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a UserNotFound error
    pub fn user_not_found(email: &str) -> Self {
        LedgerError::UserNotFound {
            email: email.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(iban: &str) -> Self {
        LedgerError::AccountNotFound {
            iban: iban.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(iban: &str, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            iban: iban.to_string(),
            available,
            requested,
        }
    }

    /// Create a RateUnavailable error
    pub fn rate_unavailable(from: &Currency, to: &Currency) -> Self {
        LedgerError::RateUnavailable {
            from: from.clone(),
            to: to.clone(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, iban: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            iban: iban.to_string(),
        }
    }

    /// Create an AmountsMismatch error
    pub fn amounts_mismatch(accounts: usize, amounts: usize) -> Self {
        LedgerError::AmountsMismatch { accounts, amounts }
    }

    /// Create a SplitAccountNotFound error
    pub fn split_account_not_found(iban: &str, involved_accounts: &[String], timestamp: u64) -> Self {
        LedgerError::SplitAccountNotFound {
            iban: iban.to_string(),
            involved_accounts: involved_accounts.to_vec(),
            timestamp,
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(command: &str, message: &str) -> Self {
        LedgerError::InvalidCommand {
            command: command.to_string(),
            message: message.to_string(),
        }
    }
}
