//! In-memory bank state
//!
//! This module provides the `Bank`, which owns every user and account of a
//! simulation run and implements the collaborator traits the split payment
//! coordinator depends on.
//!
//! The Bank is responsible for:
//! - Registering users and opening accounts under deterministic IBANs
//! - Crediting, debiting and transferring funds with checked arithmetic
//! - Closing empty accounts
//! - Filing history entries against accounts and their owners

use crate::core::rate_graph::RateGraph;
use crate::core::traits::{AccountStore, TransactionLog, UserStore};
use crate::types::{
    Account, AccountKind, Currency, LedgerError, Timestamp, TransactionKind, TransactionRecord,
    User, UserInput,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// All users and accounts of one simulation run
#[derive(Debug, Default)]
pub struct Bank {
    /// Users in registration order
    users: Vec<User>,

    /// Email to position in `users`
    user_index: HashMap<String, usize>,

    /// IBAN to account
    accounts: HashMap<String, Account>,

    /// Sequence number of the last IBAN handed out
    last_iban_seq: u64,
}

impl Bank {
    /// Create an empty bank
    pub fn new() -> Self {
        Bank {
            users: Vec::new(),
            user_index: HashMap::new(),
            accounts: HashMap::new(),
            last_iban_seq: 0,
        }
    }

    /// Register a user
    ///
    /// A second registration under the same email is ignored.
    pub fn add_user(&mut self, input: UserInput) {
        if self.user_index.contains_key(&input.email) {
            warn!(email = %input.email, "Ignoring duplicate user");
            return;
        }
        self.user_index.insert(input.email.clone(), self.users.len());
        self.users.push(User::new(input));
    }

    /// Users in registration order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All accounts sorted by IBAN
    pub fn accounts_sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.iban.cmp(&b.iban));
        accounts
    }

    fn user_mut(&mut self, email: &str) -> Option<&mut User> {
        let index = *self.user_index.get(email)?;
        self.users.get_mut(index)
    }

    fn next_iban(&mut self) -> String {
        self.last_iban_seq += 1;
        let seq = self.last_iban_seq;
        format!("RO{:02}POOB{:016}", 10 + seq % 90, seq)
    }

    /// Open an account for an existing user
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The IBAN of the new account
    /// * `Err(LedgerError::UserNotFound)` - If no user has the given email
    pub fn open_account(
        &mut self,
        email: &str,
        currency: Currency,
        kind: AccountKind,
        interest_rate: Option<Decimal>,
        timestamp: Timestamp,
    ) -> Result<String, LedgerError> {
        if !self.user_index.contains_key(email) {
            return Err(LedgerError::user_not_found(email));
        }

        let iban = self.next_iban();
        let mut account = Account::new(iban.clone(), email.to_string(), currency, kind);
        if kind == AccountKind::Savings {
            account.interest_rate = interest_rate;
        }
        let record = TransactionRecord::account_created(timestamp, &iban, &account.currency);

        self.accounts.insert(iban.clone(), account);
        if let Some(user) = self.user_mut(email) {
            user.accounts.push(iban.clone());
        }
        self.record(&iban, record)?;

        debug!(%iban, %email, "Opened account");
        Ok(iban)
    }

    /// Credit an account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - The account does not exist
    /// - The new balance would overflow
    pub fn add_funds(
        &mut self,
        iban: &str,
        amount: Decimal,
        timestamp: Timestamp,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        self.credit(iban, amount)?;

        let currency = self
            .account(iban)
            .map(|account| account.currency.clone())
            .ok_or_else(|| LedgerError::account_not_found(iban))?;
        self.record(
            iban,
            TransactionRecord::funds_added(timestamp, iban, amount, &currency),
        )
    }

    /// Close an account owned by the given user
    ///
    /// An account that still holds funds stays open; the refusal is filed in
    /// the user's history.
    pub fn delete_account(
        &mut self,
        email: &str,
        iban: &str,
        timestamp: Timestamp,
    ) -> Result<(), LedgerError> {
        let user = self
            .user(email)
            .ok_or_else(|| LedgerError::user_not_found(email))?;
        if !user.owns(iban) {
            return Err(LedgerError::account_not_found(iban));
        }

        let balance = self
            .account(iban)
            .map(|account| account.balance)
            .ok_or_else(|| LedgerError::account_not_found(iban))?;

        if !balance.is_zero() {
            self.record_for_user(email, TransactionRecord::deletion_failed(timestamp, iban))?;
            return Err(LedgerError::AccountNotEmpty {
                iban: iban.to_string(),
                balance,
            });
        }

        self.accounts.remove(iban);
        if let Some(user) = self.user_mut(email) {
            user.accounts.retain(|owned| owned != iban);
        }

        debug!(%iban, %email, "Closed account");
        Ok(())
    }

    /// Transfer funds between two accounts
    ///
    /// The amount is in the sender's currency; the receiver is credited the
    /// amount converted into its own currency.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - Either account does not exist
    /// - The sender's balance does not cover the amount (filed in the sender's history)
    /// - No exchange rate connects the two currencies
    /// - The receiver's balance would overflow (nothing is debited)
    pub fn send_money(
        &mut self,
        rates: &RateGraph,
        sender: &str,
        receiver: &str,
        amount: Decimal,
        description: &str,
        timestamp: Timestamp,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        let (sender_currency, sender_balance) = self
            .account(sender)
            .map(|account| (account.currency.clone(), account.balance))
            .ok_or_else(|| LedgerError::SenderNotFound {
                iban: sender.to_string(),
            })?;
        let (receiver_currency, receiver_balance) = self
            .account(receiver)
            .map(|account| (account.currency.clone(), account.balance))
            .ok_or_else(|| LedgerError::ReceiverNotFound {
                iban: receiver.to_string(),
            })?;

        if sender_balance < amount {
            self.record(
                sender,
                TransactionRecord::insufficient_funds(
                    timestamp,
                    sender,
                    receiver,
                    amount,
                    &sender_currency,
                ),
            )?;
            return Err(LedgerError::insufficient_funds(sender, sender_balance, amount));
        }

        let converted = rates.try_convert(&sender_currency, &receiver_currency, amount)?;

        // Both legs must succeed before either is applied
        if receiver_balance.checked_add(converted).is_none() {
            return Err(LedgerError::arithmetic_overflow("credit", receiver));
        }

        self.withdraw(sender, amount)?;
        self.credit(receiver, converted)?;

        self.record(
            sender,
            TransactionRecord::transfer(
                timestamp,
                TransactionKind::TransferSent,
                description,
                sender,
                receiver,
                amount,
                &sender_currency,
            ),
        )?;
        self.record(
            receiver,
            TransactionRecord::transfer(
                timestamp,
                TransactionKind::TransferReceived,
                description,
                sender,
                receiver,
                converted,
                &receiver_currency,
            ),
        )?;

        debug!(%sender, %receiver, %amount, %converted, "Transferred funds");
        Ok(())
    }
}

impl AccountStore for Bank {
    fn account(&self, iban: &str) -> Option<&Account> {
        self.accounts.get(iban)
    }

    fn credit(&mut self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(iban)
            .ok_or_else(|| LedgerError::account_not_found(iban))?;

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("credit", iban))?;

        Ok(())
    }

    fn withdraw(&mut self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(iban)
            .ok_or_else(|| LedgerError::account_not_found(iban))?;

        if account.balance < amount {
            return Err(LedgerError::insufficient_funds(
                iban,
                account.balance,
                amount,
            ));
        }

        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdraw", iban))?;

        Ok(())
    }

    fn debit_unchecked(&mut self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(iban)
            .ok_or_else(|| LedgerError::account_not_found(iban))?;

        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("debit", iban))?;

        Ok(())
    }
}

impl UserStore for Bank {
    fn user(&self, email: &str) -> Option<&User> {
        self.user_index
            .get(email)
            .and_then(|&index| self.users.get(index))
    }
}

impl TransactionLog for Bank {
    fn record(&mut self, iban: &str, record: TransactionRecord) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(iban)
            .ok_or_else(|| LedgerError::account_not_found(iban))?;
        account.transactions.push(record.clone());
        let owner = account.owner.clone();

        self.record_for_user(&owner, record)
    }

    fn record_for_user(
        &mut self,
        email: &str,
        record: TransactionRecord,
    ) -> Result<(), LedgerError> {
        let user = self
            .user_mut(email)
            .ok_or_else(|| LedgerError::user_not_found(email))?;
        user.transactions.push(record);
        Ok(())
    }
}
