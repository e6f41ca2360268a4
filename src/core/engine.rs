//! Command processing engine
//!
//! This module provides the LedgerEngine that executes commands by
//! coordinating between the Bank, the RateGraph and the
//! SplitPaymentCoordinator.
//!
//! The engine enforces business rules such as:
//! - Commands run strictly in input order against one owned state
//! - A failed command leaves the state as it was (split acceptance flags aside)
//! - Only read commands and split payment steps produce output

use crate::core::bank::Bank;
use crate::core::rate_graph::{RateEdge, RateGraph};
use crate::core::split_payment::SplitPaymentCoordinator;
use crate::core::traits::{AccountStore, UserStore};
use crate::types::{
    Account, Command, LedgerError, SplitInitiated, SplitOutcome, TransactionRecord, User,
    UserInput,
};
use tracing::debug;

/// A user together with the accounts they currently hold
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub user: User,
    pub accounts: Vec<Account>,
}

/// Result of a command that produces output
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// `printUsers`
    Users(Vec<UserSummary>),
    /// `printTransactions`
    Transactions(Vec<TransactionRecord>),
    /// `splitPayment`
    SplitInitiated(SplitInitiated),
    /// `acceptSplitPayment` that settled its request
    SplitCompleted(SplitOutcome),
}

/// Ledger processing engine
///
/// Owns all simulation state. Independent engines share nothing.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    bank: Bank,
    rates: RateGraph,
    splits: SplitPaymentCoordinator,
}

impl LedgerEngine {
    /// Create an engine with no users, accounts or rates
    pub fn new() -> Self {
        LedgerEngine {
            bank: Bank::new(),
            rates: RateGraph::new(),
            splits: SplitPaymentCoordinator::new(),
        }
    }

    /// Register a user
    pub fn add_user(&mut self, input: UserInput) {
        self.bank.add_user(input);
    }

    /// Replace the exchange rates with the given edges
    pub fn load_rates<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = RateEdge>,
    {
        self.rates.load(edges);
    }

    /// Execute a single command
    ///
    /// # Returns
    ///
    /// * `Ok(Some(output))` - For commands that report something on success
    /// * `Ok(None)` - For commands that only change state
    /// * `Err(LedgerError)` - If the command was rejected
    pub fn process(&mut self, command: Command) -> Result<Option<CommandOutput>, LedgerError> {
        debug!(command = command.name(), timestamp = command.timestamp(), "Processing command");

        match command {
            Command::AddAccount {
                email,
                currency,
                account_type,
                interest_rate,
                timestamp,
            } => {
                self.bank
                    .open_account(&email, currency, account_type, interest_rate, timestamp)?;
                Ok(None)
            }
            Command::AddFunds {
                account,
                amount,
                timestamp,
            } => {
                self.bank.add_funds(&account, amount, timestamp)?;
                Ok(None)
            }
            Command::DeleteAccount {
                email,
                account,
                timestamp,
            } => {
                self.bank.delete_account(&email, &account, timestamp)?;
                Ok(None)
            }
            Command::SendMoney {
                account,
                receiver,
                amount,
                description,
                timestamp,
            } => {
                self.bank.send_money(
                    &self.rates,
                    &account,
                    &receiver,
                    amount,
                    &description,
                    timestamp,
                )?;
                Ok(None)
            }
            Command::SplitPayment {
                accounts,
                amount_for_users,
                currency,
                timestamp,
            } => {
                let initiated = self.splits.initiate(
                    &self.bank,
                    accounts,
                    amount_for_users,
                    currency,
                    timestamp,
                )?;
                Ok(Some(CommandOutput::SplitInitiated(initiated)))
            }
            Command::AcceptSplitPayment {
                email,
                split_id,
                timestamp,
            } => {
                let outcome =
                    self.splits
                        .accept(&mut self.bank, &self.rates, split_id, &email, timestamp)?;
                Ok(Some(CommandOutput::SplitCompleted(outcome)))
            }
            Command::PrintUsers { .. } => Ok(Some(CommandOutput::Users(self.user_summaries()))),
            Command::PrintTransactions { email, .. } => {
                let user = self
                    .bank
                    .user(&email)
                    .ok_or_else(|| LedgerError::user_not_found(&email))?;
                Ok(Some(CommandOutput::Transactions(user.transactions.clone())))
            }
        }
    }

    /// Every user with their current accounts, in registration order
    pub fn user_summaries(&self) -> Vec<UserSummary> {
        self.bank
            .users()
            .iter()
            .map(|user| UserSummary {
                user: user.clone(),
                accounts: user
                    .accounts
                    .iter()
                    .filter_map(|iban| self.account(iban).cloned())
                    .collect(),
            })
            .collect()
    }

    /// Look up an account by IBAN
    pub fn account(&self, iban: &str) -> Option<&Account> {
        self.bank.account(iban)
    }

    /// All accounts sorted by IBAN
    pub fn accounts(&self) -> Vec<&Account> {
        self.bank.accounts_sorted()
    }

    pub fn users(&self) -> &[User] {
        self.bank.users()
    }

    pub fn rates(&self) -> &RateGraph {
        &self.rates
    }

    pub fn splits(&self) -> &SplitPaymentCoordinator {
        &self.splits
    }
}
