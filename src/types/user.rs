//! Users of the bank

use super::transaction::TransactionRecord;
use serde::Deserialize;

/// A user as listed in the input document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub first_name: String,
    pub last_name: String,

    /// Unique identifier
    pub email: String,

    /// IBANs of owned accounts, in opening order
    pub accounts: Vec<String>,

    /// History across all owned accounts, oldest first
    pub transactions: Vec<TransactionRecord>,
}

impl User {
    pub fn new(input: UserInput) -> Self {
        User {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            accounts: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Whether this user owns the account
    pub fn owns(&self, iban: &str) -> bool {
        self.accounts.iter().any(|owned| owned == iban)
    }
}
