//! Security deposit and slashing bookkeeping.
//!
//! Each party posts at most one deposit as collateral against
//! overcommitting beyond its balance. A slash forfeits the entire
//! deposit. Slash eligibility (at most once per relationship and
//! sequence number) is enforced upstream by the relationship record;
//! this store only accounts for amounts and counts.

use std::collections::HashMap;

use opensettle_types::{PartyId, Result, SettleError};

/// Per-party collateral plus slash statistics for off-chain dispute
/// resolution.
#[derive(Debug, Default)]
pub struct SecurityDeposits {
    deposits: HashMap<PartyId, u128>,
    slash_counts: HashMap<PartyId, u32>,
    total_forfeited: u128,
}

impl SecurityDeposits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add collateral to a party's deposit.
    ///
    /// # Errors
    /// [`SettleError::ArithmeticOverflow`] if the deposit would exceed
    /// the 128-bit range.
    pub fn fund(&mut self, party: PartyId, amount: u128) -> Result<()> {
        let entry = self.deposits.entry(party).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(SettleError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Current deposit of `party`; zero when never funded.
    #[must_use]
    pub fn deposit_of(&self, party: PartyId) -> u128 {
        self.deposits.get(&party).copied().unwrap_or(0)
    }

    /// How many times `party` has been slashed.
    #[must_use]
    pub fn slash_count_of(&self, party: PartyId) -> u32 {
        self.slash_counts.get(&party).copied().unwrap_or(0)
    }

    /// Total collateral forfeited across all parties.
    #[must_use]
    pub fn total_forfeited(&self) -> u128 {
        self.total_forfeited
    }

    /// Overwrite a party's deposit with its post-commit value.
    pub(crate) fn set_deposit(&mut self, party: PartyId, amount: u128) {
        self.deposits.insert(party, amount);
    }

    /// Account for one committed slash event of `forfeited` collateral.
    pub(crate) fn record_slash(&mut self, party: PartyId, forfeited: u128) {
        *self.slash_counts.entry(party).or_insert(0) += 1;
        self.total_forfeited = self.total_forfeited.saturating_add(forfeited);
    }
}
