//! Ledger — balance tracking, deposits and internal transfers
//!
//! Holds one balance per account plus the running total of value in custody:
//! - Deposit credits the caller with value the settlement layer received
//! - Transfer moves part of the caller's balance to another account
//! - Withdraw (see `withdrawal`) releases the caller's full balance
//! - Reads treat an absent account as holding zero
//!
//! Invariant: `total_held == sum(balances)`, checked on demand by [`Ledger::audit`].

use ledger_types::errors::NumericError;
use ledger_types::ids::AccountId;
use ledger_types::numeric::Amount;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::config::LedgerConfig;
use crate::errors::LedgerError;
use crate::events::{DepositRecorded, LedgerEvent, NotificationSink, TransferRecorded};

/// Bookkeeping state. Only positive balances are stored.
#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    pub(crate) balances: HashMap<AccountId, Amount>,
    pub(crate) total_held: Amount,
}

/// Prior value of a write made while a checkpoint is open.
#[derive(Debug, Clone, Copy)]
enum Undo {
    Balance { account: AccountId, prior: Amount },
    TotalHeld(Amount),
}

/// Rollback point opened before a mutation that calls out to a collaborator.
///
/// Must be handed back to [`Ledger::restore`] or [`Ledger::accept`].
#[derive(Debug)]
#[must_use]
pub(crate) struct Checkpoint {
    undo_len: usize,
    /// Absolute position in the event stream
    event_seq: usize,
}

/// Custodial balance ledger.
///
/// Every mutating operation either applies completely or returns an error
/// with no state change. Operations take `&mut self`, so they never
/// interleave.
#[derive(Debug)]
pub struct Ledger {
    pub(crate) state: LedgerState,
    config: LedgerConfig,
    /// Committed events not yet published (append-only)
    events: Vec<LedgerEvent>,
    /// Events handed out by `drain_events` so far
    drained: usize,
    /// Writes made since the outermost open checkpoint, oldest first
    undo: Vec<Undo>,
    open_checkpoints: usize,
    /// Event position of the outermost open checkpoint
    rollback_floor: Option<usize>,
}

impl Ledger {
    /// Create an empty ledger with default configuration.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger.
    pub fn with_config(config: LedgerConfig) -> Self {
        debug!(
            unit_decimals = config.unit_decimals,
            audit_on_commit = config.audit_on_commit,
            "Ledger initialized"
        );
        Self {
            state: LedgerState::default(),
            events: Vec::with_capacity(config.event_capacity),
            drained: 0,
            undo: Vec::new(),
            open_checkpoints: 0,
            rollback_floor: None,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Credit `amount` to `caller`.
    ///
    /// The settlement layer has already taken custody of the value; the ledger
    /// trusts the amount it is given. Emits `DepositRecorded`.
    pub fn deposit(
        &mut self,
        caller: AccountId,
        amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_account(&caller)
            .map_err(|e| self.reject("deposit", &caller, e))?;
        if amount.is_zero() {
            return Err(self.reject("deposit", &caller, LedgerError::InvalidAmount));
        }

        // Compute both sums before writing anything
        let balance = self
            .check_balance(&caller)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)
            .map_err(|e| self.reject("deposit", &caller, e))?;
        let total_held = self
            .state
            .total_held
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)
            .map_err(|e| self.reject("deposit", &caller, e))?;

        self.set_balance(caller, balance);
        self.set_total_held(total_held);

        info!(
            account = %caller,
            amount = %amount,
            units = %self.format_units(amount),
            balance = %balance,
            total_held = %total_held,
            "Deposit recorded"
        );

        let event = LedgerEvent::DepositRecorded(DepositRecorded {
            account: caller,
            amount,
        });
        self.commit(event.clone());
        Ok(event)
    }

    // ───────────────────────── Transfer ─────────────────────────

    /// Move `amount` from `caller` to `recipient`.
    ///
    /// `total_held` is unchanged. Transferring to oneself is accepted and
    /// leaves balances as they were. Emits `TransferRecorded`.
    pub fn transfer(
        &mut self,
        caller: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_account(&caller)
            .and_then(|_| self.ensure_account(&recipient))
            .map_err(|e| self.reject("transfer", &caller, e))?;
        if amount.is_zero() {
            return Err(self.reject("transfer", &caller, LedgerError::InvalidAmount));
        }

        let available = self.check_balance(&caller);
        if available < amount {
            return Err(self.reject(
                "transfer",
                &caller,
                LedgerError::InsufficientBalance {
                    required: amount,
                    available,
                },
            ));
        }

        if caller != recipient {
            let sender_balance = available
                .checked_sub(amount)
                .ok_or(LedgerError::ArithmeticOverflow)
                .map_err(|e| self.reject("transfer", &caller, e))?;
            let recipient_balance = self
                .check_balance(&recipient)
                .checked_add(amount)
                .ok_or(LedgerError::ArithmeticOverflow)
                .map_err(|e| self.reject("transfer", &caller, e))?;

            self.set_balance(caller, sender_balance);
            self.set_balance(recipient, recipient_balance);
        }

        info!(
            from = %caller,
            to = %recipient,
            amount = %amount,
            units = %self.format_units(amount),
            "Transfer recorded"
        );

        let event = LedgerEvent::TransferRecorded(TransferRecorded {
            from: caller,
            to: recipient,
            amount,
        });
        self.commit(event.clone());
        Ok(event)
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Balance of any account; zero if it never held funds.
    pub fn check_balance(&self, account: &AccountId) -> Amount {
        self.state
            .balances
            .get(account)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// The caller's own balance.
    pub fn check_user_balance(&self, caller: &AccountId) -> Amount {
        self.check_balance(caller)
    }

    /// Total value currently in custody.
    pub fn check_total_held(&self) -> Amount {
        self.state.total_held
    }

    /// Accounts with a positive balance, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = (AccountId, Amount)> + '_ {
        self.state.balances.iter().map(|(id, amount)| (*id, *amount))
    }

    /// Number of accounts with a positive balance.
    pub fn account_count(&self) -> usize {
        self.state.balances.len()
    }

    /// Render an amount in human units using the configured decimals.
    pub fn to_units(&self, amount: Amount) -> Result<Decimal, NumericError> {
        amount.to_units(self.config.unit_decimals)
    }

    /// Human-unit rendering for logs. Falls back to base units when the
    /// amount does not fit a `Decimal`.
    pub fn format_units(&self, amount: Amount) -> String {
        self.to_units(amount)
            .map(|units| units.to_string())
            .unwrap_or_else(|_| amount.to_string())
    }

    // ───────────────────────── Audit ─────────────────────────

    /// Recompute the sum of all balances and compare it with `total_held`.
    pub fn audit(&self) -> Result<(), LedgerError> {
        let sum = Amount::checked_sum(self.state.balances.values().copied());
        if sum == Some(self.state.total_held) {
            return Ok(());
        }

        let sum = sum.map_or_else(|| "overflow".to_string(), |s| s.to_string());
        error!(
            total_held = %self.state.total_held,
            sum = %sum,
            accounts = self.state.balances.len(),
            "Ledger invariant violated"
        );
        Err(LedgerError::InvariantViolation {
            total_held: self.state.total_held,
            sum,
        })
    }

    // ───────────────────────── Events ─────────────────────────

    /// Committed events not yet drained.
    ///
    /// While a withdrawal is waiting on its release this includes events from
    /// reentrant calls that a failed release would still discard.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain settled events (consume and clear).
    ///
    /// Called during a release, this stops at the point the outermost
    /// pending withdrawal can still roll back to.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        let settled = match self.rollback_floor {
            Some(floor) => floor - self.drained,
            None => self.events.len(),
        };
        let events: Vec<LedgerEvent> = self.events.drain(..settled).collect();
        self.drained += events.len();
        events
    }

    /// Hand every pending event to `sink` in commit order. Returns the count.
    pub fn publish<S: NotificationSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let events = self.drain_events();
        let count = events.len();
        for event in events {
            sink.notify(event);
        }
        debug!(count, "Published ledger events");
        count
    }

    // ───────────────────────── Internal ─────────────────────────

    /// Write a balance, dropping the record when it reaches zero.
    pub(crate) fn set_balance(&mut self, account: AccountId, balance: Amount) {
        let prior = self.state.write_balance(account, balance);
        if self.open_checkpoints > 0 {
            self.undo.push(Undo::Balance { account, prior });
        }
    }

    pub(crate) fn set_total_held(&mut self, total_held: Amount) {
        let prior = std::mem::replace(&mut self.state.total_held, total_held);
        if self.open_checkpoints > 0 {
            self.undo.push(Undo::TotalHeld(prior));
        }
    }

    pub(crate) fn ensure_account(&self, account: &AccountId) -> Result<(), LedgerError> {
        if account.is_nil() {
            return Err(LedgerError::ZeroAccount);
        }
        Ok(())
    }

    /// Log a rejected operation and hand the error back.
    pub(crate) fn reject(
        &self,
        operation: &'static str,
        account: &AccountId,
        err: LedgerError,
    ) -> LedgerError {
        warn!(operation, account = %account, error = %err, "Operation rejected");
        err
    }

    /// Record a committed event and optionally re-check the invariant.
    pub(crate) fn commit(&mut self, event: LedgerEvent) {
        self.events.push(event);
        if self.config.audit_on_commit {
            let audit = self.audit();
            debug_assert!(audit.is_ok(), "ledger invariant violated after commit");
        }
    }

    /// Start recording prior values so later writes can be undone.
    ///
    /// Checkpoints nest; each must be closed in reverse order of opening.
    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        let event_seq = self.drained + self.events.len();
        if self.open_checkpoints == 0 {
            self.rollback_floor = Some(event_seq);
        }
        self.open_checkpoints += 1;
        Checkpoint {
            undo_len: self.undo.len(),
            event_seq,
        }
    }

    /// Roll back to `checkpoint`, discarding state changes and events since.
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        while self.undo.len() > checkpoint.undo_len {
            match self.undo.pop() {
                Some(Undo::Balance { account, prior }) => {
                    self.state.write_balance(account, prior);
                }
                Some(Undo::TotalHeld(prior)) => self.state.total_held = prior,
                None => break,
            }
        }
        // Drains stop at the rollback floor, so the checkpoint is still buffered
        self.events
            .truncate(checkpoint.event_seq.saturating_sub(self.drained));
        self.close_checkpoint();
    }

    /// Keep everything written since `checkpoint`.
    ///
    /// An enclosing checkpoint can still undo these writes.
    pub(crate) fn accept(&mut self, checkpoint: Checkpoint) {
        debug_assert!(self.undo.len() >= checkpoint.undo_len);
        self.close_checkpoint();
    }

    fn close_checkpoint(&mut self) {
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.undo.clear();
            self.rollback_floor = None;
        }
    }
}

impl LedgerState {
    /// Returns the previous balance.
    fn write_balance(&mut self, account: AccountId, balance: Amount) -> Amount {
        let prior = if balance.is_zero() {
            self.balances.remove(&account)
        } else {
            self.balances.insert(account, balance)
        };
        prior.unwrap_or(Amount::ZERO)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHER: u128 = 1_000_000_000_000_000_000;

    fn ether(n: u128) -> Amount {
        Amount::new(n * ETHER)
    }

    // ─── Deposit tests ───

    #[test]
    fn test_deposit_success() {
        let mut ledger = Ledger::new();
        let account = AccountId::new();

        let event = ledger.deposit(account, ether(1)).unwrap();
        assert_eq!(
            event,
            LedgerEvent::DepositRecorded(DepositRecorded {
                account,
                amount: ether(1),
            })
        );
        assert_eq!(ledger.check_balance(&account), ether(1));
        assert_eq!(ledger.check_total_held(), ether(1));
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut ledger = Ledger::new();
        let account = AccountId::new();

        ledger.deposit(account, ether(1)).unwrap();
        ledger.deposit(account, ether(2)).unwrap();

        assert_eq!(ledger.check_user_balance(&account), ether(3));
    }

    #[test]
    fn test_deposit_zero_amount() {
        let mut ledger = Ledger::new();
        let account = AccountId::new();
        let result = ledger.deposit(account, Amount::ZERO);
        assert_eq!(result, Err(LedgerError::InvalidAmount));
        assert_eq!(ledger.check_total_held(), Amount::ZERO);
        assert_eq!(ledger.account_count(), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_deposit_from_null_account() {
        let mut ledger = Ledger::new();
        let result = ledger.deposit(AccountId::nil(), ether(1));
        assert_eq!(result, Err(LedgerError::ZeroAccount));
        assert_eq!(ledger.check_total_held(), Amount::ZERO);
    }

    #[test]
    fn test_deposit_overflow_leaves_state_unchanged() {
        let mut ledger = Ledger::new();
        let account = AccountId::new();
        ledger.deposit(account, Amount::MAX).unwrap();

        let result = ledger.deposit(account, Amount::new(1));
        assert_eq!(result, Err(LedgerError::ArithmeticOverflow));
        assert_eq!(ledger.check_balance(&account), Amount::MAX);
        assert_eq!(ledger.check_total_held(), Amount::MAX);
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_deposit_total_overflow_from_other_account() {
        let mut ledger = Ledger::new();
        let whale = AccountId::new();
        let other = AccountId::new();
        ledger.deposit(whale, Amount::MAX).unwrap();

        // Balance of `other` would fit, total_held would not
        let result = ledger.deposit(other, Amount::new(1));
        assert_eq!(result, Err(LedgerError::ArithmeticOverflow));
        assert_eq!(ledger.check_balance(&other), Amount::ZERO);
        assert_eq!(ledger.account_count(), 1);
    }

    // ─── Transfer tests ───

    #[test]
    fn test_transfer_success() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(2)).unwrap();

        let event = ledger.transfer(alice, bob, ether(1)).unwrap();
        assert!(matches!(event, LedgerEvent::TransferRecorded(_)));
        assert_eq!(ledger.check_balance(&alice), ether(1));
        assert_eq!(ledger.check_balance(&bob), ether(1));
        assert_eq!(ledger.check_total_held(), ether(2));
    }

    #[test]
    fn test_transfer_entire_balance_drops_record() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(2)).unwrap();

        ledger.transfer(alice, bob, ether(2)).unwrap();
        assert_eq!(ledger.check_balance(&alice), Amount::ZERO);
        assert_eq!(ledger.account_count(), 1);
    }

    #[test]
    fn test_transfer_zero_amount() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(2)).unwrap();

        let result = ledger.transfer(alice, bob, Amount::ZERO);
        assert_eq!(result, Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn test_transfer_zero_amount_checked_before_balance() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();

        // Alice has nothing, but the amount check comes first
        let result = ledger.transfer(alice, bob, Amount::ZERO);
        assert_eq!(result, Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn test_transfer_insufficient() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(2)).unwrap();

        let result = ledger.transfer(alice, bob, ether(4));
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                required: ether(4),
                available: ether(2),
            })
        );
        assert_eq!(ledger.check_balance(&alice), ether(2));
        assert_eq!(ledger.check_balance(&bob), Amount::ZERO);
    }

    #[test]
    fn test_transfer_to_self_is_neutral() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(3)).unwrap();

        let event = ledger.transfer(alice, alice, ether(2)).unwrap();
        assert_eq!(event.account(), alice);
        assert_eq!(ledger.check_balance(&alice), ether(3));
        assert_eq!(ledger.check_total_held(), ether(3));
    }

    #[test]
    fn test_transfer_to_self_still_needs_balance() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(1)).unwrap();

        let result = ledger.transfer(alice, alice, ether(5));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_transfer_to_null_account() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(1)).unwrap();

        let result = ledger.transfer(alice, AccountId::nil(), ether(1));
        assert_eq!(result, Err(LedgerError::ZeroAccount));
        assert_eq!(ledger.check_balance(&alice), ether(1));
    }

    // ─── Balance query tests ───

    #[test]
    fn test_check_balance_unknown_account() {
        let mut ledger = Ledger::new();
        ledger.deposit(AccountId::new(), ether(2)).unwrap();
        assert_eq!(ledger.check_balance(&AccountId::new()), Amount::ZERO);
    }

    #[test]
    fn test_accounts_lists_positive_balances() {
        let mut ledger = Ledger::new();
        let acc1 = AccountId::new();
        let acc2 = AccountId::new();
        ledger.deposit(acc1, ether(10)).unwrap();
        ledger.deposit(acc2, ether(5)).unwrap();

        let mut accounts: Vec<_> = ledger.accounts().collect();
        accounts.sort();
        let mut expected = vec![(acc1, ether(10)), (acc2, ether(5))];
        expected.sort();
        assert_eq!(accounts, expected);
    }

    #[test]
    fn test_to_units_uses_configured_decimals() {
        let ledger = Ledger::with_config(LedgerConfig {
            unit_decimals: 6,
            ..LedgerConfig::default()
        });
        assert_eq!(
            ledger.to_units(Amount::new(2_500_000)).unwrap(),
            Decimal::new(25, 1)
        );
    }

    // ─── Audit tests ───

    #[test]
    fn test_audit_passes_on_consistent_state() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(3)).unwrap();
        ledger.transfer(alice, bob, ether(1)).unwrap();
        assert_eq!(ledger.audit(), Ok(()));
    }

    #[test]
    fn test_audit_detects_drift() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(3)).unwrap();

        ledger.state.total_held = ether(4);
        assert_eq!(
            ledger.audit(),
            Err(LedgerError::InvariantViolation {
                total_held: ether(4),
                sum: ether(3).to_string(),
            })
        );
    }

    // ─── Events tests ───

    #[test]
    fn test_events_emitted_in_order() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(2)).unwrap();
        ledger.transfer(alice, bob, ether(1)).unwrap();

        let kinds: Vec<_> = ledger.events().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["deposit", "transfer"]);
    }

    #[test]
    fn test_rejected_operations_emit_nothing() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let _ = ledger.deposit(alice, Amount::ZERO);
        let _ = ledger.transfer(alice, AccountId::new(), ether(1));
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_publish_drains_into_sink() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(1)).unwrap();
        ledger.deposit(alice, ether(2)).unwrap();

        let mut sink: Vec<LedgerEvent> = Vec::new();
        assert_eq!(ledger.publish(&mut sink), 2);
        assert_eq!(sink[1].amount(), ether(2));
        assert!(ledger.events().is_empty());
        assert_eq!(ledger.publish(&mut sink), 0);
    }

    // ─── Checkpoint tests ───

    #[test]
    fn test_restore_discards_later_changes() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(1)).unwrap();

        let checkpoint = ledger.checkpoint();
        ledger.deposit(alice, ether(5)).unwrap();
        ledger.restore(checkpoint);

        assert_eq!(ledger.check_balance(&alice), ether(1));
        assert_eq!(ledger.check_total_held(), ether(1));
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_restore_recreates_dropped_record() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.deposit(alice, ether(2)).unwrap();

        let checkpoint = ledger.checkpoint();
        ledger.transfer(alice, bob, ether(2)).unwrap();
        assert_eq!(ledger.account_count(), 1);
        ledger.restore(checkpoint);

        assert_eq!(ledger.check_balance(&alice), ether(2));
        assert_eq!(ledger.check_balance(&bob), Amount::ZERO);
        assert_eq!(ledger.account_count(), 1);
    }

    #[test]
    fn test_journal_records_only_touched_accounts() {
        let mut ledger = Ledger::new();
        for _ in 0..50 {
            ledger.deposit(AccountId::new(), ether(1)).unwrap();
        }
        let alice = AccountId::new();

        let checkpoint = ledger.checkpoint();
        ledger.deposit(alice, ether(1)).unwrap();
        // One balance write plus one total write
        assert_eq!(ledger.undo.len(), 2);
        ledger.accept(checkpoint);

        assert!(ledger.undo.is_empty());
        assert_eq!(ledger.check_balance(&alice), ether(1));
        assert_eq!(ledger.check_total_held(), ether(51));
    }

    #[test]
    fn test_no_journal_without_checkpoint() {
        let mut ledger = Ledger::new();
        ledger.deposit(AccountId::new(), ether(1)).unwrap();
        assert!(ledger.undo.is_empty());
    }

    #[test]
    fn test_outer_restore_undoes_accepted_inner() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(1)).unwrap();

        let outer = ledger.checkpoint();
        ledger.deposit(alice, ether(2)).unwrap();
        let inner = ledger.checkpoint();
        ledger.deposit(alice, ether(3)).unwrap();
        ledger.accept(inner);
        ledger.restore(outer);

        assert_eq!(ledger.check_balance(&alice), ether(1));
        assert_eq!(ledger.check_total_held(), ether(1));
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_inner_restore_keeps_outer_writes() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();

        let outer = ledger.checkpoint();
        ledger.deposit(alice, ether(2)).unwrap();
        let inner = ledger.checkpoint();
        ledger.deposit(alice, ether(3)).unwrap();
        ledger.restore(inner);

        assert_eq!(ledger.check_balance(&alice), ether(2));
        assert_eq!(ledger.events().len(), 1);
        ledger.accept(outer);
        assert_eq!(ledger.check_total_held(), ether(2));
    }

    #[test]
    fn test_drain_withholds_events_past_open_checkpoint() {
        let mut ledger = Ledger::new();
        let alice = AccountId::new();
        ledger.deposit(alice, ether(1)).unwrap();

        let checkpoint = ledger.checkpoint();
        ledger.deposit(alice, ether(2)).unwrap();

        let drained = ledger.drain_events();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].amount(), ether(1));
        assert_eq!(ledger.events().len(), 1);

        ledger.restore(checkpoint);
        assert!(ledger.events().is_empty());
        assert_eq!(ledger.check_balance(&alice), ether(1));

        // Floor lifted once the checkpoint closes
        ledger.deposit(alice, ether(4)).unwrap();
        assert_eq!(ledger.drain_events().len(), 1);
    }

    #[test]
    fn test_format_units() {
        let ledger = Ledger::with_config(LedgerConfig {
            unit_decimals: 6,
            ..LedgerConfig::default()
        });
        assert_eq!(ledger.format_units(Amount::new(2_500_000)), "2.5");
        assert_eq!(ledger.format_units(Amount::new(7)), "0.000007");
        // Beyond Decimal's range: base units
        assert_eq!(ledger.format_units(Amount::MAX), u128::MAX.to_string());
    }
}
