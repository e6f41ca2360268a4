//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Collaborator abstractions the split payment coordinator depends on
//! - `rate_graph` - Exchange-rate graph and currency conversion
//! - `bank` - Users, accounts and balance operations
//! - `split_payment` - Split payment requests, acceptance and settlement
//! - `engine` - Command processing orchestration

pub mod bank;
pub mod engine;
pub mod rate_graph;
pub mod split_payment;
pub mod traits;

pub use bank::Bank;
pub use engine::{CommandOutput, LedgerEngine, UserSummary};
pub use rate_graph::{RateEdge, RateGraph};
pub use split_payment::{SplitPaymentCoordinator, SplitPaymentRequest};
