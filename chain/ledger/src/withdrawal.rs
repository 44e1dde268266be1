//! Withdrawal — release a caller's full balance through the settlement layer
//!
//! Ordering is checks, then effects, then interaction:
//! 1. Validate the caller and that it holds a positive balance
//! 2. Zero the balance and reduce `total_held`
//! 3. Ask the settlement mechanism to release the value
//!
//! The settlement runs arbitrary code and may call back into the ledger. By
//! step 3 the books already say the caller holds nothing, so a nested
//! withdraw fails with `NoBalance` instead of paying out twice. If the release
//! fails, the ledger returns to the checkpoint taken before step 2. Events
//! committed by nested calls are withheld from `drain_events` until the
//! outermost release settles.

use ledger_types::ids::AccountId;
use ledger_types::numeric::Amount;
use tracing::{debug, info, warn};

use crate::errors::LedgerError;
use crate::events::{LedgerEvent, WithdrawalRecorded};
use crate::ledger::Ledger;
use crate::settlement::Settlement;

impl Ledger {
    /// Withdraw the caller's entire balance. Returns the released amount.
    ///
    /// Emits `WithdrawalRecorded` once the release succeeds.
    pub fn withdraw<S: Settlement + ?Sized>(
        &mut self,
        caller: AccountId,
        settlement: &mut S,
    ) -> Result<Amount, LedgerError> {
        self.ensure_account(&caller)
            .map_err(|e| self.reject("withdraw", &caller, e))?;

        let amount = self.check_balance(&caller);
        if amount.is_zero() {
            return Err(self.reject("withdraw", &caller, LedgerError::NoBalance));
        }

        let total_held = self
            .state
            .total_held
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)
            .map_err(|e| self.reject("withdraw", &caller, e))?;

        let checkpoint = self.checkpoint();

        // Effects before interaction
        self.set_balance(caller, Amount::ZERO);
        self.set_total_held(total_held);

        debug!(account = %caller, amount = %amount, "Balance zeroed, requesting release");

        if let Err(err) = settlement.release(self, caller, amount) {
            self.restore(checkpoint);
            warn!(
                account = %caller,
                amount = %amount,
                error = %err,
                "Release failed, withdrawal rolled back"
            );
            return Err(LedgerError::Settlement(err));
        }
        self.accept(checkpoint);

        info!(
            account = %caller,
            amount = %amount,
            units = %self.format_units(amount),
            total_held = %self.check_total_held(),
            "Withdrawal recorded"
        );

        self.commit(LedgerEvent::WithdrawalRecorded(WithdrawalRecorded {
            account: caller,
            amount,
        }));
        Ok(amount)
    }
}
