//! Persisted ledger state and the staged all-or-nothing overlay.
//!
//! Every mutating entry point builds a [`Stage`]: a copy-on-first-touch
//! overlay over the committed [`LedgerState`]. Accounts, relationship
//! records, pending withdrawals, and deposit values are copied into the
//! overlay the first time the operation touches them and mutated there.
//! Only after every validation passed — including the end-of-call batch
//! signature check — is the overlay converted into a [`StageDelta`] and
//! applied. Dropping the stage on any error leaves the committed state
//! byte-for-byte untouched.

use std::collections::HashMap;

use opensettle_types::{
    Account, PartyId, PendingWithdrawal, RelationshipRecord, Result, SettleError,
};

use crate::slashing::SecurityDeposits;

/// Compute `now + buffer` on the 32-bit protocol clock.
///
/// # Errors
/// [`SettleError::ArithmeticOverflow`] past the protocol horizon.
pub(crate) fn deadline(now: u32, buffer: u32) -> Result<u32> {
    now.checked_add(buffer)
        .ok_or(SettleError::ArithmeticOverflow)
}

/// The committed state of one ledger instance.
#[derive(Debug, Default)]
pub struct LedgerState {
    accounts: HashMap<PartyId, Account>,
    records: HashMap<(PartyId, PartyId), RelationshipRecord>,
    pending: HashMap<PartyId, PendingWithdrawal>,
    pub(crate) deposits: SecurityDeposits,
}

impl LedgerState {
    /// Committed account of `party`; the zero account when never touched.
    #[must_use]
    pub fn account_of(&self, party: PartyId) -> Account {
        self.accounts.get(&party).copied().unwrap_or_default()
    }

    /// Committed record of the ordered `(payer, payee)` relationship;
    /// the zero record when the pair never settled.
    #[must_use]
    pub fn record_of(&self, payer: PartyId, payee: PartyId) -> RelationshipRecord {
        self.records
            .get(&(payer, payee))
            .copied()
            .unwrap_or_default()
    }

    /// The pending withdrawal of `party`, if one is initiated.
    #[must_use]
    pub fn pending_withdrawal_of(&self, party: PartyId) -> Option<PendingWithdrawal> {
        self.pending.get(&party).copied()
    }

    pub(crate) fn set_account(&mut self, party: PartyId, account: Account) {
        self.accounts.insert(party, account);
    }

    /// Apply a fully validated overlay.
    pub(crate) fn apply(&mut self, delta: StageDelta) {
        for (party, account) in delta.accounts {
            self.accounts.insert(party, account);
        }
        for (pair, record) in delta.records {
            self.records.insert(pair, record);
        }
        for (party, pending) in delta.pending {
            match pending {
                Some(entry) => self.pending.insert(party, entry),
                None => self.pending.remove(&party),
            };
        }
        for (party, amount) in delta.deposits {
            self.deposits.set_deposit(party, amount);
        }
        for (party, forfeited) in delta.slashes {
            self.deposits.record_slash(party, forfeited);
        }
    }
}

/// Copy-on-first-touch overlay over a [`LedgerState`].
pub(crate) struct Stage<'a> {
    base: &'a LedgerState,
    accounts: HashMap<PartyId, Account>,
    records: HashMap<(PartyId, PartyId), RelationshipRecord>,
    pending: HashMap<PartyId, Option<PendingWithdrawal>>,
    deposits: HashMap<PartyId, u128>,
    slashes: Vec<(PartyId, u128)>,
}

/// The owned outcome of a validated stage, free of the base borrow.
pub(crate) struct StageDelta {
    accounts: HashMap<PartyId, Account>,
    records: HashMap<(PartyId, PartyId), RelationshipRecord>,
    pending: HashMap<PartyId, Option<PendingWithdrawal>>,
    deposits: HashMap<PartyId, u128>,
    slashes: Vec<(PartyId, u128)>,
}

impl<'a> Stage<'a> {
    pub(crate) fn new(base: &'a LedgerState) -> Self {
        Self {
            base,
            accounts: HashMap::new(),
            records: HashMap::new(),
            pending: HashMap::new(),
            deposits: HashMap::new(),
            slashes: Vec::new(),
        }
    }

    /// Staged account of `party`, copied from the base on first touch.
    pub(crate) fn account(&mut self, party: PartyId) -> &mut Account {
        self.accounts
            .entry(party)
            .or_insert_with(|| self.base.account_of(party))
    }

    /// Staged record of the ordered pair, copied on first touch.
    pub(crate) fn record(&mut self, payer: PartyId, payee: PartyId) -> &mut RelationshipRecord {
        self.records
            .entry((payer, payee))
            .or_insert_with(|| self.base.record_of(payer, payee))
    }

    /// The pending withdrawal visible through the overlay.
    pub(crate) fn pending(&self, party: PartyId) -> Option<PendingWithdrawal> {
        match self.pending.get(&party) {
            Some(staged) => *staged,
            None => self.base.pending_withdrawal_of(party),
        }
    }

    pub(crate) fn set_pending(&mut self, party: PartyId, entry: PendingWithdrawal) {
        self.pending.insert(party, Some(entry));
    }

    pub(crate) fn clear_pending(&mut self, party: PartyId) {
        self.pending.insert(party, None);
    }

    /// Forfeit the entire staged deposit of `party` and return it.
    ///
    /// A second slash of the same party within one stage forfeits zero
    /// but still counts as an event.
    pub(crate) fn slash(&mut self, party: PartyId) -> u128 {
        let current = self
            .deposits
            .get(&party)
            .copied()
            .unwrap_or_else(|| self.base.deposits.deposit_of(party));
        self.deposits.insert(party, 0);
        self.slashes.push((party, current));
        current
    }

    /// Consume the stage, releasing the base borrow.
    pub(crate) fn into_delta(self) -> StageDelta {
        StageDelta {
            accounts: self.accounts,
            records: self.records,
            pending: self.pending,
            deposits: self.deposits,
            slashes: self.slashes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_state() -> LedgerState {
        let mut state = LedgerState::default();
        state.set_account(
            PartyId(1),
            Account {
                balance: 1_000,
                withdraw_after: 0,
                nonce: 3,
            },
        );
        state.deposits.fund(PartyId(1), 500).unwrap();
        state
    }

    #[test]
    fn dropped_stage_leaves_state_untouched() {
        let state = seeded_state();
        {
            let mut stage = Stage::new(&state);
            stage.account(PartyId(1)).balance = 0;
            stage.record(PartyId(1), PartyId(2)).seq_no = 9;
            stage.slash(PartyId(1));
            stage.set_pending(
                PartyId(1),
                PendingWithdrawal {
                    amount: 1,
                    valid_after: 1,
                },
            );
        }
        assert_eq!(state.account_of(PartyId(1)).balance, 1_000);
        assert_eq!(state.record_of(PartyId(1), PartyId(2)).seq_no, 0);
        assert_eq!(state.deposits.deposit_of(PartyId(1)), 500);
        assert!(state.pending_withdrawal_of(PartyId(1)).is_none());
    }

    #[test]
    fn committed_stage_applies_everything() {
        let mut state = seeded_state();
        let delta = {
            let mut stage = Stage::new(&state);
            stage.account(PartyId(1)).balance = 250;
            stage.record(PartyId(1), PartyId(2)).seq_no = 1;
            let forfeited = stage.slash(PartyId(1));
            assert_eq!(forfeited, 500);
            stage.into_delta()
        };
        state.apply(delta);

        assert_eq!(state.account_of(PartyId(1)).balance, 250);
        assert_eq!(state.record_of(PartyId(1), PartyId(2)).seq_no, 1);
        assert_eq!(state.deposits.deposit_of(PartyId(1)), 0);
        assert_eq!(state.deposits.slash_count_of(PartyId(1)), 1);
        assert_eq!(state.deposits.total_forfeited(), 500);
    }

    #[test]
    fn second_slash_in_one_stage_forfeits_zero() {
        let mut state = seeded_state();
        let delta = {
            let mut stage = Stage::new(&state);
            assert_eq!(stage.slash(PartyId(1)), 500);
            assert_eq!(stage.slash(PartyId(1)), 0);
            stage.into_delta()
        };
        state.apply(delta);
        assert_eq!(state.deposits.slash_count_of(PartyId(1)), 2);
        assert_eq!(state.deposits.total_forfeited(), 500);
    }

    #[test]
    fn cleared_pending_survives_commit() {
        let mut state = LedgerState::default();
        let delta = {
            let mut stage = Stage::new(&state);
            stage.set_pending(
                PartyId(3),
                PendingWithdrawal {
                    amount: 10,
                    valid_after: 20,
                },
            );
            stage.into_delta()
        };
        state.apply(delta);
        assert!(state.pending_withdrawal_of(PartyId(3)).is_some());

        let delta = {
            let mut stage = Stage::new(&state);
            stage.clear_pending(PartyId(3));
            assert!(stage.pending(PartyId(3)).is_none());
            stage.into_delta()
        };
        state.apply(delta);
        assert!(state.pending_withdrawal_of(PartyId(3)).is_none());
    }

    #[test]
    fn deadline_overflow_detected() {
        assert_eq!(deadline(10, 5).unwrap(), 15);
        assert!(matches!(
            deadline(u32::MAX, 1),
            Err(SettleError::ArithmeticOverflow)
        ));
    }
}
