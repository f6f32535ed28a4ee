//! Boundary to the external value-transfer collaborator.
//!
//! The ledger never moves real value itself. Deposits into an account or
//! a security deposit are pulled through a [`FundingSource`], which
//! reports the externally confirmed amount; a collaborator failure
//! aborts the calling operation with no ledger effect.

use std::collections::HashMap;

use opensettle_types::{PartyId, Result, SettleError};

/// External value-transfer collaborator.
pub trait FundingSource {
    /// Confirm an inbound transfer for `party` and return its amount.
    ///
    /// # Errors
    /// [`SettleError::FundingFailed`] when no confirmed transfer exists
    /// or the external rail reports a failure.
    fn confirm_transfer(&mut self, party: PartyId) -> Result<u128>;
}

/// In-memory funding source holding pre-confirmed transfer amounts.
/// Each confirmation is consumed exactly once.
#[derive(Debug, Default)]
pub struct ConfirmedTransfers {
    amounts: HashMap<PartyId, u128>,
}

impl ConfirmedTransfers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a confirmed inbound transfer for `party`. A second call for
    /// the same party replaces the first.
    pub fn expect(&mut self, party: PartyId, amount: u128) {
        self.amounts.insert(party, amount);
    }
}

impl FundingSource for ConfirmedTransfers {
    fn confirm_transfer(&mut self, party: PartyId) -> Result<u128> {
        self.amounts
            .remove(&party)
            .ok_or_else(|| SettleError::FundingFailed {
                reason: format!("no confirmed transfer for {party}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_is_consumed_once() {
        let mut source = ConfirmedTransfers::new();
        source.expect(PartyId(1), 500);
        assert_eq!(source.confirm_transfer(PartyId(1)).unwrap(), 500);
        let err = source.confirm_transfer(PartyId(1)).unwrap_err();
        assert!(matches!(err, SettleError::FundingFailed { .. }));
    }

    #[test]
    fn unknown_party_fails() {
        let mut source = ConfirmedTransfers::new();
        let err = source.confirm_transfer(PartyId(9)).unwrap_err();
        assert!(matches!(err, SettleError::FundingFailed { .. }));
    }
}
