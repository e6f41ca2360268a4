//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `currency`: Currency codes and amount formatting
//! - `account`: Account-related types
//! - `user`: Users and their input form
//! - `transaction`: Transaction history records
//! - `split`: Split payment identifiers and results
//! - `command`: Commands decoded from the input document
//! - `error`: Error types for the ledger

pub mod account;
pub mod command;
pub mod currency;
pub mod error;
pub mod split;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountKind};
pub use command::Command;
pub use currency::{format_amount, Currency};
pub use error::LedgerError;
pub use split::{SplitId, SplitInitiated, SplitOutcome};
pub use transaction::{Timestamp, TransactionKind, TransactionRecord};
pub use user::{User, UserInput};
