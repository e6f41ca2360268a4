//! Split payment coordination
//!
//! A split payment divides one bill across several accounts. Each participant
//! account owes a fixed share in the request currency, and nothing moves until
//! the owner of every participant account has accepted.
//!
//! # Lifecycle
//!
//! `initiate` validates the request and registers it under a fresh `SplitId`.
//! Each `accept` call quotes that id and accepts on behalf of one user, for
//! every participant account that user owns. Once every participant has
//! accepted, the same call settles the request: each account is debited its
//! share converted into the account currency, a history entry is filed
//! against every account and owner, and the request is dropped. Any number of
//! requests may be pending at once.
//!
//! # Insufficient funds
//!
//! A participant whose balance does not cover its converted share during an
//! acceptance is not marked accepted and the call fails naming it. An
//! acceptance given in an earlier call is kept. The account is also
//! remembered in the request's ever-insufficient list, which is reported when
//! the request finally settles.
//!
//! Requests that never gather every acceptance stay pending until the
//! coordinator is dropped; there is no cancellation or expiry.

use crate::core::rate_graph::RateGraph;
use crate::core::traits::{AccountStore, TransactionLog, UserStore};
use crate::types::{
    Currency, LedgerError, SplitId, SplitInitiated, SplitOutcome, Timestamp, TransactionRecord,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// One account's share of a split payment
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub iban: String,

    /// Owed amount in the request currency
    pub amount: Decimal,

    /// Owed amount in the account currency, set once the owner has accepted
    /// with sufficient funds
    pub accepted: Option<Decimal>,
}

/// A split payment awaiting acceptance
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPaymentRequest {
    pub id: SplitId,
    pub participants: Vec<Participant>,
    pub currency: Currency,
    pub timestamp: Timestamp,

    /// Accounts that failed a balance check, in the order first seen
    pub ever_insufficient: Vec<String>,
}

impl SplitPaymentRequest {
    /// Sum of all owed amounts in the request currency
    pub fn total(&self) -> Decimal {
        self.participants.iter().map(|p| p.amount).sum()
    }

    pub fn accounts(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.iban.clone()).collect()
    }

    pub fn amounts(&self) -> Vec<Decimal> {
        self.participants.iter().map(|p| p.amount).collect()
    }

    /// Whether the given participant has accepted
    pub fn is_accepted(&self, iban: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.iban == iban && p.accepted.is_some())
    }
}

/// Balance check of one participant during an acceptance
struct ShareCheck {
    index: usize,
    iban: String,
    converted: Decimal,
    sufficient: bool,
}

/// Tracks pending split payments and settles them
#[derive(Debug, Default)]
pub struct SplitPaymentCoordinator {
    last_id: SplitId,
    pending: BTreeMap<SplitId, SplitPaymentRequest>,
}

impl SplitPaymentCoordinator {
    pub fn new() -> Self {
        SplitPaymentCoordinator {
            last_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// A pending request by id
    pub fn pending(&self, id: SplitId) -> Option<&SplitPaymentRequest> {
        self.pending.get(&id)
    }

    /// Number of requests awaiting acceptance
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Register a new split payment
    ///
    /// # Arguments
    ///
    /// * `store` - Used to check that every participant account exists
    /// * `accounts` - Participant IBANs, unique
    /// * `amounts` - Owed amount per participant, positional
    /// * `currency` - Currency the amounts are expressed in
    /// * `timestamp` - Creation time
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any amount is negative or the total is not positive
    /// - The two lists differ in length
    /// - An account is named twice
    /// - An account does not exist (the first unknown one is named)
    pub fn initiate<S: AccountStore>(
        &mut self,
        store: &S,
        accounts: Vec<String>,
        amounts: Vec<Decimal>,
        currency: Currency,
        timestamp: Timestamp,
    ) -> Result<SplitInitiated, LedgerError> {
        let mut total = Decimal::ZERO;
        for amount in &amounts {
            if amount.is_sign_negative() {
                return Err(LedgerError::invalid_amount(*amount));
            }
            total = total
                .checked_add(*amount)
                .ok_or_else(|| LedgerError::invalid_amount(*amount))?;
        }
        if total <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(total));
        }

        if accounts.len() != amounts.len() {
            return Err(LedgerError::amounts_mismatch(accounts.len(), amounts.len()));
        }

        let mut seen = HashSet::new();
        for iban in &accounts {
            if !seen.insert(iban.as_str()) {
                return Err(LedgerError::DuplicateParticipant { iban: iban.clone() });
            }
        }

        if let Some(unknown) = accounts.iter().find(|iban| store.account(iban).is_none()) {
            return Err(LedgerError::split_account_not_found(
                unknown, &accounts, timestamp,
            ));
        }

        self.last_id += 1;
        let id = self.last_id;

        let participants = accounts
            .iter()
            .zip(amounts)
            .map(|(iban, amount)| Participant {
                iban: iban.clone(),
                amount,
                accepted: None,
            })
            .collect();

        self.pending.insert(
            id,
            SplitPaymentRequest {
                id,
                participants,
                currency: currency.clone(),
                timestamp,
                ever_insufficient: Vec::new(),
            },
        );

        debug!(split_id = id, accounts = accounts.len(), %total, %currency, "Split payment initiated");

        Ok(SplitInitiated {
            id,
            total,
            currency,
            accounts,
            timestamp,
        })
    }

    /// Accept a pending split payment on behalf of one user
    ///
    /// Every participant account owned by the user is checked against its
    /// share converted into the account currency. Sufficient accounts are
    /// marked accepted; short ones keep their previous state and are
    /// remembered. When all participants have accepted, the request settles
    /// in this call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user does not exist
    /// - No pending request has the given id
    /// - The user owns no participant account
    /// - A share cannot be converted into its account currency (nothing changes)
    /// - Any of the user's accounts was short during this call
    /// - Some participant has not accepted yet
    pub fn accept<L>(
        &mut self,
        ledger: &mut L,
        rates: &RateGraph,
        split_id: SplitId,
        email: &str,
        timestamp: Timestamp,
    ) -> Result<SplitOutcome, LedgerError>
    where
        L: AccountStore + UserStore + TransactionLog,
    {
        let user = ledger
            .user(email)
            .ok_or_else(|| LedgerError::user_not_found(email))?;
        let request = self
            .pending
            .get(&split_id)
            .ok_or(LedgerError::NoPendingSplit { split_id })?;

        // Evaluate every share the user is answering for before touching state
        let mut checks = Vec::new();
        for (index, participant) in request.participants.iter().enumerate() {
            if !user.owns(&participant.iban) {
                continue;
            }
            let Some(account) = ledger.account(&participant.iban) else {
                continue;
            };
            let converted =
                rates.try_convert(&request.currency, &account.currency, participant.amount)?;
            checks.push(ShareCheck {
                index,
                iban: participant.iban.clone(),
                converted,
                sufficient: account.balance >= converted,
            });
        }

        if checks.is_empty() {
            return Err(LedgerError::NotAParticipant {
                email: email.to_string(),
                split_id,
            });
        }

        let request = self
            .pending
            .get_mut(&split_id)
            .ok_or(LedgerError::NoPendingSplit { split_id })?;

        let mut last_short = None;
        for check in checks {
            let Some(participant) = request.participants.get_mut(check.index) else {
                continue;
            };
            if check.sufficient {
                participant.accepted = Some(check.converted);
            } else {
                if !request.ever_insufficient.contains(&check.iban) {
                    request.ever_insufficient.push(check.iban.clone());
                }
                last_short = Some(check.iban);
            }
        }

        if let Some(last_account) = last_short {
            warn!(split_id, account = %last_account, %email, "Split payment share not covered");
            return Err(LedgerError::SplitInsufficientFunds {
                split_id,
                last_account,
                timestamp: request.timestamp,
            });
        }

        let debits: Option<Vec<(String, Decimal)>> = request
            .participants
            .iter()
            .map(|p| p.accepted.map(|amount| (p.iban.clone(), amount)))
            .collect();
        let Some(debits) = debits else {
            debug!(split_id, %email, timestamp, "Split payment partially accepted");
            return Err(LedgerError::SplitNotAllAccepted { split_id });
        };

        Self::check_settleable(ledger, &debits)?;

        let request = self
            .pending
            .remove(&split_id)
            .ok_or(LedgerError::NoPendingSplit { split_id })?;
        Self::settle(ledger, &request, &debits)?;

        info!(
            split_id,
            accounts = debits.len(),
            total = %request.total(),
            currency = %request.currency,
            "Split payment settled"
        );

        Ok(SplitOutcome {
            id: split_id,
            ever_insufficient: request.ever_insufficient,
        })
    }

    /// Every debit must be applicable before any is applied
    fn check_settleable<L: AccountStore>(
        ledger: &L,
        debits: &[(String, Decimal)],
    ) -> Result<(), LedgerError> {
        for (iban, amount) in debits {
            let account = ledger
                .account(iban)
                .ok_or_else(|| LedgerError::account_not_found(iban))?;
            if account.balance.checked_sub(*amount).is_none() {
                return Err(LedgerError::arithmetic_overflow("split payment", iban));
            }
        }
        Ok(())
    }

    fn settle<L>(
        ledger: &mut L,
        request: &SplitPaymentRequest,
        debits: &[(String, Decimal)],
    ) -> Result<(), LedgerError>
    where
        L: AccountStore + TransactionLog,
    {
        let total = request.total();
        let accounts = request.accounts();
        let amounts = request.amounts();

        for (iban, amount) in debits {
            // Balances were verified at acceptance time
            ledger.debit_unchecked(iban, *amount)?;
            ledger.record(
                iban,
                TransactionRecord::split_payment(
                    request.timestamp,
                    request.id,
                    iban,
                    total,
                    &request.currency,
                    &accounts,
                    &amounts,
                ),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bank::Bank;
    use crate::core::rate_graph::RateEdge;
    use crate::types::{AccountKind, TransactionKind, UserInput};

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn ron() -> Currency {
        Currency::new("RON")
    }

    fn rates() -> RateGraph {
        RateGraph::from_edges(vec![RateEdge::new("RON", "EUR", dec("0.2"))])
    }

    /// Two users, one account each; returns (bank, alice's iban, bob's iban)
    fn two_party_bank(bob_currency: &str, alice_funds: &str, bob_funds: &str) -> (Bank, String, String) {
        let mut bank = Bank::new();
        for email in ["alice@bank.ro", "bob@bank.ro"] {
            bank.add_user(UserInput {
                first_name: "First".to_string(),
                last_name: "Last".to_string(),
                email: email.to_string(),
            });
        }
        let alice = bank
            .open_account("alice@bank.ro", ron(), AccountKind::Classic, None, 0)
            .unwrap();
        let bob = bank
            .open_account("bob@bank.ro", Currency::new(bob_currency), AccountKind::Classic, None, 0)
            .unwrap();
        if alice_funds != "0" {
            bank.add_funds(&alice, dec(alice_funds), 0).unwrap();
        }
        if bob_funds != "0" {
            bank.add_funds(&bob, dec(bob_funds), 0).unwrap();
        }
        (bank, alice, bob)
    }

    fn initiate_30_70(
        coordinator: &mut SplitPaymentCoordinator,
        bank: &Bank,
        alice: &str,
        bob: &str,
    ) -> SplitId {
        coordinator
            .initiate(
                bank,
                vec![alice.to_string(), bob.to_string()],
                vec![dec("30"), dec("70")],
                ron(),
                5,
            )
            .unwrap()
            .id
    }

    fn balance(bank: &Bank, iban: &str) -> Decimal {
        bank.account(iban).unwrap().balance
    }

    #[test]
    fn test_initiate_registers_request() {
        let (bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();

        let initiated = coordinator
            .initiate(
                &bank,
                vec![alice.clone(), bob.clone()],
                vec![dec("30"), dec("70")],
                ron(),
                5,
            )
            .unwrap();

        assert_eq!(initiated.id, 1);
        assert_eq!(initiated.description(), "Split payment of 100.00 RON");
        assert_eq!(initiated.accounts, vec![alice.clone(), bob.clone()]);

        let request = coordinator.pending(1).unwrap();
        assert!(!request.is_accepted(&alice));
        assert!(!request.is_accepted(&bob));
    }

    #[test]
    fn test_requests_get_increasing_ids_and_coexist() {
        let (bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();

        let first = initiate_30_70(&mut coordinator, &bank, &alice, &bob);
        let second = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        assert_eq!((first, second), (1, 2));
        assert_eq!(coordinator.pending_count(), 2);
    }

    #[test]
    fn test_initiate_rejects_non_positive_total() {
        let (bank, alice, bob) = two_party_bank("RON", "0", "0");
        let mut coordinator = SplitPaymentCoordinator::new();

        let result = coordinator.initiate(
            &bank,
            vec![alice, bob],
            vec![Decimal::ZERO, Decimal::ZERO],
            ron(),
            1,
        );

        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert_eq!(coordinator.pending_count(), 0);
    }

    #[test]
    fn test_initiate_rejects_negative_share() {
        let (bank, alice, bob) = two_party_bank("RON", "0", "0");
        let mut coordinator = SplitPaymentCoordinator::new();

        let result = coordinator.initiate(&bank, vec![alice, bob], vec![dec("50"), dec("-1")], ron(), 1);
        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
    }

    #[test]
    fn test_initiate_rejects_length_mismatch() {
        let (bank, alice, bob) = two_party_bank("RON", "0", "0");
        let mut coordinator = SplitPaymentCoordinator::new();

        let result = coordinator.initiate(&bank, vec![alice, bob], vec![dec("50")], ron(), 1);
        assert_eq!(result, Err(LedgerError::amounts_mismatch(2, 1)));
    }

    #[test]
    fn test_initiate_rejects_repeated_account() {
        let (bank, alice, _) = two_party_bank("RON", "0", "0");
        let mut coordinator = SplitPaymentCoordinator::new();

        let result = coordinator.initiate(
            &bank,
            vec![alice.clone(), alice.clone()],
            vec![dec("1"), dec("1")],
            ron(),
            1,
        );
        assert_eq!(result, Err(LedgerError::DuplicateParticipant { iban: alice }));
    }

    #[test]
    fn test_initiate_names_first_unknown_account() {
        let (bank, alice, _) = two_party_bank("RON", "0", "0");
        let mut coordinator = SplitPaymentCoordinator::new();
        let accounts = vec![alice, "RO00MISSING1".to_string(), "RO00MISSING2".to_string()];

        let result = coordinator.initiate(
            &bank,
            accounts.clone(),
            vec![dec("1"), dec("1"), dec("1")],
            ron(),
            9,
        );

        assert_eq!(
            result,
            Err(LedgerError::SplitAccountNotFound {
                iban: "RO00MISSING1".to_string(),
                involved_accounts: accounts,
                timestamp: 9,
            })
        );
    }

    #[test]
    fn test_partial_then_full_acceptance_settles_once() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        let first = coordinator.accept(&mut bank, &rates(), id, "alice@bank.ro", 6);
        assert_eq!(first, Err(LedgerError::SplitNotAllAccepted { split_id: id }));
        assert_eq!(balance(&bank, &alice), dec("100"));

        let second = coordinator.accept(&mut bank, &rates(), id, "bob@bank.ro", 7);
        assert_eq!(
            second,
            Ok(SplitOutcome {
                id,
                ever_insufficient: vec![],
            })
        );
        assert_eq!(balance(&bank, &alice), dec("70"));
        assert_eq!(balance(&bank, &bob), dec("30"));
        assert_eq!(coordinator.pending_count(), 0);

        // A stray acceptance after settlement finds nothing and debits nothing
        let stray = coordinator.accept(&mut bank, &rates(), id, "bob@bank.ro", 8);
        assert_eq!(stray, Err(LedgerError::NoPendingSplit { split_id: id }));
        assert_eq!(balance(&bank, &alice), dec("70"));
        assert_eq!(balance(&bank, &bob), dec("30"));
    }

    #[test]
    fn test_insufficient_then_topped_up_completes() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "10");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        coordinator
            .accept(&mut bank, &rates(), id, "alice@bank.ro", 6)
            .unwrap_err();

        let short = coordinator.accept(&mut bank, &rates(), id, "bob@bank.ro", 7);
        assert_eq!(
            short,
            Err(LedgerError::SplitInsufficientFunds {
                split_id: id,
                last_account: bob.clone(),
                timestamp: 5,
            })
        );
        assert_eq!(balance(&bank, &alice), dec("100"));

        bank.add_funds(&bob, dec("60"), 8).unwrap();

        let outcome = coordinator
            .accept(&mut bank, &rates(), id, "bob@bank.ro", 9)
            .unwrap();
        assert_eq!(outcome.ever_insufficient, vec![bob.clone()]);
        assert_eq!(balance(&bank, &alice), dec("70"));
        assert_eq!(balance(&bank, &bob), Decimal::ZERO);
    }

    #[test]
    fn test_share_is_converted_into_account_currency() {
        let (mut bank, alice, bob) = two_party_bank("EUR", "100", "20");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        coordinator
            .accept(&mut bank, &rates(), id, "alice@bank.ro", 6)
            .unwrap_err();
        coordinator
            .accept(&mut bank, &rates(), id, "bob@bank.ro", 7)
            .unwrap();

        // 70 RON at 0.2 EUR/RON
        assert_eq!(balance(&bank, &bob), dec("6"));
    }

    #[test]
    fn test_share_checked_in_account_currency() {
        // 70 RON is 14 EUR, one more than the account holds
        let (mut bank, alice, bob) = two_party_bank("EUR", "100", "13");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        let result = coordinator.accept(&mut bank, &rates(), id, "bob@bank.ro", 6);
        assert!(matches!(result, Err(LedgerError::SplitInsufficientFunds { .. })));
    }

    #[test]
    fn test_missing_rate_changes_nothing() {
        let (mut bank, alice, bob) = two_party_bank("JPY", "100", "1000");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        let result = coordinator.accept(&mut bank, &rates(), id, "bob@bank.ro", 6);

        assert!(matches!(result, Err(LedgerError::RateUnavailable { .. })));
        let request = coordinator.pending(id).unwrap();
        assert!(!request.is_accepted(&bob));
        assert!(request.ever_insufficient.is_empty());
    }

    #[test]
    fn test_unknown_user() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        let result = coordinator.accept(&mut bank, &rates(), id, "eve@bank.ro", 6);
        assert!(matches!(result, Err(LedgerError::UserNotFound { .. })));
    }

    #[test]
    fn test_user_without_participant_account() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "100");
        bank.add_user(UserInput {
            first_name: "Eve".to_string(),
            last_name: "Outsider".to_string(),
            email: "eve@bank.ro".to_string(),
        });
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        let result = coordinator.accept(&mut bank, &rates(), id, "eve@bank.ro", 6);
        assert!(matches!(result, Err(LedgerError::NotAParticipant { .. })));
    }

    #[test]
    fn test_unknown_split_id() {
        let (mut bank, _, _) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();

        let result = coordinator.accept(&mut bank, &rates(), 42, "alice@bank.ro", 6);
        assert_eq!(result, Err(LedgerError::NoPendingSplit { split_id: 42 }));
    }

    #[test]
    fn test_owner_of_every_participant_settles_alone() {
        let (mut bank, alice, _) = two_party_bank("RON", "100", "0");
        let second = bank
            .open_account("alice@bank.ro", ron(), AccountKind::Classic, None, 1)
            .unwrap();
        bank.add_funds(&second, dec("50"), 1).unwrap();
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &second);

        let result = coordinator.accept(&mut bank, &rates(), id, "alice@bank.ro", 6);
        assert!(matches!(
            result,
            Err(LedgerError::SplitInsufficientFunds { ref last_account, .. }) if *last_account == second
        ));

        bank.add_funds(&second, dec("20"), 7).unwrap();
        let outcome = coordinator
            .accept(&mut bank, &rates(), id, "alice@bank.ro", 8)
            .unwrap();
        assert_eq!(outcome.ever_insufficient, vec![second.clone()]);
        assert_eq!(balance(&bank, &alice), dec("70"));
        assert_eq!(balance(&bank, &second), Decimal::ZERO);
    }

    #[test]
    fn test_later_shortfall_keeps_earlier_acceptance() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        coordinator
            .accept(&mut bank, &rates(), id, "alice@bank.ro", 6)
            .unwrap_err();
        assert!(coordinator.pending(id).unwrap().is_accepted(&alice));

        bank.withdraw(&alice, dec("80")).unwrap();
        let short = coordinator.accept(&mut bank, &rates(), id, "alice@bank.ro", 7);
        assert_eq!(
            short,
            Err(LedgerError::SplitInsufficientFunds {
                split_id: id,
                last_account: alice.clone(),
                timestamp: 5,
            })
        );
        let request = coordinator.pending(id).unwrap();
        assert!(request.is_accepted(&alice));
        assert_eq!(request.ever_insufficient, vec![alice.clone()]);

        // Bob's round has no shortfall and every flag is set, so it settles
        // with the share remembered from alice's first acceptance
        let outcome = coordinator
            .accept(&mut bank, &rates(), id, "bob@bank.ro", 8)
            .unwrap();
        assert_eq!(outcome.ever_insufficient, vec![alice.clone()]);
        assert_eq!(balance(&bank, &alice), dec("-10"));
        assert_eq!(balance(&bank, &bob), dec("30"));
    }

    #[test]
    fn test_settlement_is_filed_against_accounts_and_owners() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        coordinator
            .accept(&mut bank, &rates(), id, "alice@bank.ro", 6)
            .unwrap_err();
        coordinator
            .accept(&mut bank, &rates(), id, "bob@bank.ro", 7)
            .unwrap();

        for (iban, email) in [(&alice, "alice@bank.ro"), (&bob, "bob@bank.ro")] {
            let record = bank.account(iban).unwrap().transactions.last().unwrap().clone();
            assert_eq!(record.kind, TransactionKind::SplitPayment);
            assert_eq!(record.description, "Split payment of 100.00 RON");
            assert_eq!(record.involved_accounts, vec![alice.clone(), bob.clone()]);
            assert_eq!(record.amount_for_users, vec![dec("30"), dec("70")]);
            assert_eq!(record.split_id, Some(id));

            let user_record = bank.user(email).unwrap().transactions.last().unwrap().clone();
            assert_eq!(user_record, record);
        }
    }

    #[test]
    fn test_independent_requests_settle_independently() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "100");
        let mut coordinator = SplitPaymentCoordinator::new();
        let first = initiate_30_70(&mut coordinator, &bank, &alice, &bob);
        let second = initiate_30_70(&mut coordinator, &bank, &alice, &bob);

        coordinator
            .accept(&mut bank, &rates(), second, "alice@bank.ro", 6)
            .unwrap_err();
        coordinator
            .accept(&mut bank, &rates(), second, "bob@bank.ro", 7)
            .unwrap();

        assert!(coordinator.pending(second).is_none());
        let untouched = coordinator.pending(first).unwrap();
        assert!(!untouched.is_accepted(&alice));
        assert!(!untouched.is_accepted(&bob));
    }

    #[test]
    fn test_deleted_participant_blocks_settlement() {
        let (mut bank, alice, bob) = two_party_bank("RON", "100", "0");
        let mut coordinator = SplitPaymentCoordinator::new();
        let id = coordinator
            .initiate(
                &bank,
                vec![alice.clone(), bob.clone()],
                vec![dec("30"), Decimal::ZERO],
                ron(),
                5,
            )
            .unwrap()
            .id;

        coordinator
            .accept(&mut bank, &rates(), id, "bob@bank.ro", 6)
            .unwrap_err();
        bank.delete_account("bob@bank.ro", &bob, 7).unwrap();

        let result = coordinator.accept(&mut bank, &rates(), id, "alice@bank.ro", 8);
        assert!(matches!(result, Err(LedgerError::AccountNotFound { .. })));
        assert_eq!(balance(&bank, &alice), dec("100"));
        assert!(coordinator.pending(id).is_some());
    }
}
