//! Ledger events
//!
//! Immutable records emitted after an operation commits. Rejected operations
//! emit nothing.

use ledger_types::ids::AccountId;
use ledger_types::numeric::Amount;
use serde::{Deserialize, Serialize};

/// Value credited to an account by a deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecorded {
    pub account: AccountId,
    pub amount: Amount,
}

/// Full balance released to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRecorded {
    pub account: AccountId,
    pub amount: Amount,
}

/// Internal movement between two accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecorded {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Amount,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    DepositRecorded(DepositRecorded),
    WithdrawalRecorded(WithdrawalRecorded),
    TransferRecorded(TransferRecorded),
}

impl LedgerEvent {
    /// The account that performed the operation.
    pub fn account(&self) -> AccountId {
        match self {
            Self::DepositRecorded(e) => e.account,
            Self::WithdrawalRecorded(e) => e.account,
            Self::TransferRecorded(e) => e.from,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            Self::DepositRecorded(e) => e.amount,
            Self::WithdrawalRecorded(e) => e.amount,
            Self::TransferRecorded(e) => e.amount,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DepositRecorded(_) => "deposit",
            Self::WithdrawalRecorded(_) => "withdrawal",
            Self::TransferRecorded(_) => "transfer",
        }
    }
}

/// Receiver of committed ledger events.
///
/// Events arrive in the order the ledger committed them.
pub trait NotificationSink {
    fn notify(&mut self, event: LedgerEvent);
}

impl NotificationSink for Vec<LedgerEvent> {
    fn notify(&mut self, event: LedgerEvent) {
        self.push(event);
    }
}
