//! Settlement seam — moving value across the custody boundary
//!
//! The ledger only keeps the books. Whatever actually holds the value (a
//! chain account, a bank rail, a test double) implements [`Settlement`] and is
//! told to pay out during a withdrawal.
//!
//! A release receives the ledger itself, already updated, so a settlement
//! that calls back into the ledger observes post-withdrawal balances.

use ledger_types::ids::AccountId;
use ledger_types::numeric::Amount;
use tracing::debug;

use crate::errors::SettlementError;
use crate::ledger::Ledger;

/// External mechanism that releases value to an account.
pub trait Settlement {
    /// Pay `amount` to `to`.
    ///
    /// Returning an error makes the ledger roll the whole withdrawal back,
    /// including anything done through `ledger` during this call.
    fn release(
        &mut self,
        ledger: &mut Ledger,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), SettlementError>;
}

impl<F> Settlement for F
where
    F: FnMut(&mut Ledger, AccountId, Amount) -> Result<(), SettlementError>,
{
    fn release(
        &mut self,
        ledger: &mut Ledger,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), SettlementError> {
        self(ledger, to, amount)
    }
}

/// A single completed release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub to: AccountId,
    pub amount: Amount,
}

/// In-memory settlement holding a pool of reserves.
///
/// The surrounding system calls [`ReservePool::receive`] when value arrives
/// and the ledger drains it through [`Settlement::release`].
#[derive(Debug, Default)]
pub struct ReservePool {
    reserves: Amount,
    payouts: Vec<Payout>,
    fail_next: Option<String>,
}

impl ReservePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserves(reserves: Amount) -> Self {
        Self {
            reserves,
            ..Self::default()
        }
    }

    /// Take custody of incoming value.
    pub fn receive(&mut self, amount: Amount) -> Result<(), SettlementError> {
        self.reserves = self
            .reserves
            .checked_add(amount)
            .ok_or_else(|| SettlementError::Rejected {
                reason: "reserve overflow".to_string(),
            })?;
        Ok(())
    }

    pub fn reserves(&self) -> Amount {
        self.reserves
    }

    /// Completed releases, oldest first.
    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    /// Make the next release fail with `reason`.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }
}

impl Settlement for ReservePool {
    fn release(
        &mut self,
        _ledger: &mut Ledger,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), SettlementError> {
        if let Some(reason) = self.fail_next.take() {
            return Err(SettlementError::Rejected { reason });
        }

        let remaining = self.reserves.checked_sub(amount).ok_or(
            SettlementError::InsufficientReserves {
                required: amount,
                available: self.reserves,
            },
        )?;

        self.reserves = remaining;
        self.payouts.push(Payout { to, amount });
        debug!(to = %to, amount = %amount, reserves = %remaining, "Reserves released");
        Ok(())
    }
}
