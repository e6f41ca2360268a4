//! Banking Ledger Simulator Library
//! # Overview
//!
//! This library replays a JSON document of banking commands against an
//! in-memory ledger and reports the outcome of each command.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, User, Command, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::rate_graph`] - Exchange-rate graph and multi-hop conversion
//!   - [`core::bank`] - Users, accounts and balance operations
//!   - [`core::split_payment`] - Multi-party split payment coordination
//!   - [`core::engine`] - Command processing orchestration
//! - [`io`] - JSON document and CSV handling
//! - [`runner`] - One complete simulation run, from input file to output
//!
//! # Exchange Rates
//!
//! Rates form a directed graph. Loading `A -> B` at rate `r > 0` also makes
//! `B -> A` available at `1 / r`, and a conversion with no direct rate follows
//! the path with the fewest hops. Unconnected currencies cannot be converted.
//!
//! # Split Payments
//!
//! A split payment divides a bill across several accounts, possibly held in
//! different currencies. It settles only once every owner has accepted with
//! enough funds to cover their share:
//!
//! - **splitPayment**: register the request and get its id
//! - **acceptSplitPayment**: accept on behalf of one user, quoting the id

pub mod cli;
pub mod core;
pub mod io;
pub mod runner;
pub mod types;

pub use crate::core::{Bank, CommandOutput, LedgerEngine, RateEdge, RateGraph, SplitPaymentCoordinator};
pub use crate::io::write_accounts_csv;
pub use runner::SimulationRunner;
pub use types::{
    Account, AccountKind, Command, Currency, LedgerError, SplitId, TransactionRecord, User,
};
