//! The two-phase withdrawal state machine.
//!
//! Leaving the ledger is deliberately slow: an authorized initiation
//! records a pending entry, and processing is gated by both the
//! entry's own buffer deadline and the account-level lock that every
//! settlement against the party refreshes. The gap gives counter-parties
//! time to post a fresher receipt or dispute before value exits.

use opensettle_types::{PartyId, PendingWithdrawal, Result, SettleError, withdraw_payload};

use crate::ledger::SettlementLedger;
use crate::state::{Stage, deadline};

impl SettlementLedger {
    /// Initiate a withdrawal of `amount`, authorized by the party's
    /// signature over the amount and a fresh nonce.
    ///
    /// Overwrites any prior pending entry and consumes the nonce, so a
    /// captured authorization cannot be replayed.
    ///
    /// # Errors
    /// `UnregisteredParty`, `StaleOrReplayedSequence` when the nonce
    /// does not advance the account counter, or `InvalidSignature`.
    pub fn init_withdraw(
        &mut self,
        party: PartyId,
        amount: u128,
        nonce: u64,
        signature: &[u8],
    ) -> Result<()> {
        let now = self.clock.now();
        let key = self.registry.key_of(party)?;

        let mut stage = Stage::new(&self.state);
        let stored_nonce = stage.account(party).nonce;
        if nonce <= stored_nonce {
            return Err(SettleError::stale(format!(
                "withdrawal nonce {nonce} does not advance stored nonce {stored_nonce}"
            )));
        }
        self.verifier
            .verify_single(&withdraw_payload(party, nonce, amount), signature, key)?;

        let valid_after = deadline(now, self.config.buffer_period)?;
        stage.account(party).nonce = nonce;
        stage.set_pending(party, PendingWithdrawal { amount, valid_after });
        self.state.apply(stage.into_delta());

        tracing::info!(party = %party, amount, valid_after, nonce, "Withdrawal initiated");
        Ok(())
    }

    /// Process the party's pending withdrawal and return the amount paid
    /// out.
    ///
    /// # Errors
    /// `NoPendingWithdrawal` with nothing initiated,
    /// `DisputeWindowNotYetElapsed` before both the entry's deadline and
    /// the account lock have passed, `ExcessiveWithdrawalAmount` when
    /// settlements have since drained the balance below the initiated
    /// amount. Failure leaves the pending entry in place.
    pub fn process_withdrawal(&mut self, party: PartyId) -> Result<u128> {
        let now = self.clock.now();
        self.registry.key_of(party)?;

        let mut stage = Stage::new(&self.state);
        let pending = stage
            .pending(party)
            .ok_or(SettleError::NoPendingWithdrawal(party))?;

        let locked_until = pending.valid_after.max(stage.account(party).withdraw_after);
        if now < locked_until {
            return Err(SettleError::DisputeWindowNotYetElapsed { now, locked_until });
        }

        {
            let account = stage.account(party);
            account.debit_exact(pending.amount)?;
            account.nonce = account.next_nonce()?;
        }
        stage.clear_pending(party);
        self.state.apply(stage.into_delta());

        tracing::info!(party = %party, amount = pending.amount, "Withdrawal processed");
        Ok(pending.amount)
    }
}
