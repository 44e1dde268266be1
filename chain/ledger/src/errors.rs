//! Ledger error types
//!
//! Every rejected operation maps to exactly one variant, and a rejected
//! operation never leaves partial effects behind.

use ledger_types::numeric::Amount;
use thiserror::Error;

/// Errors returned by ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("No balance to withdraw")]
    NoBalance,

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Arithmetic overflow in balance calculation")]
    ArithmeticOverflow,

    #[error("Null account cannot hold or move funds")]
    ZeroAccount,

    #[error("Settlement failed: {0}")]
    Settlement(#[from] SettlementError),

    #[error("Ledger invariant violated: total held {total_held}, sum of balances {sum}")]
    InvariantViolation { total_held: Amount, sum: String },
}

/// Errors reported by a settlement mechanism when releasing value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Release rejected: {reason}")]
    Rejected { reason: String },

    #[error("Insufficient reserves: required {required}, available {available}")]
    InsufficientReserves { required: Amount, available: Amount },
}
