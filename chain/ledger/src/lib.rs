//! Custodial Savings Ledger
//!
//! Bookkeeping for value held on behalf of callers: deposits credit the
//! caller, withdrawals release the caller's whole balance through a settlement
//! mechanism, and transfers move value between accounts without leaving
//! custody.
//!
//! # Modules
//! - `config`: Ledger tunables
//! - `errors`: Ledger and settlement error types
//! - `events`: Events emitted after each committed operation, notification sink
//! - `ledger`: Balance state, deposit, transfer, queries, audit
//! - `settlement`: Settlement trait and the in-memory reserve pool
//! - `withdrawal`: Withdraw flow (checks, effects, then release)
//!
//! # Version
//! v0.1.0

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod settlement;
pub mod withdrawal;

pub use config::LedgerConfig;
pub use errors::{LedgerError, SettlementError};
pub use events::{LedgerEvent, NotificationSink};
pub use ledger::Ledger;
pub use settlement::{ReservePool, Settlement};

/// Ledger interface version — frozen after release
pub const LEDGER_ABI_VERSION: &str = "1.0.0";
