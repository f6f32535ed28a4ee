//! Dispute correction: the `correct_update` entry point.
//!
//! While the dispute window of a settled sequence number is open, either
//! side may present a fresher receipt for the **same** sequence number
//! with a strictly higher cumulative amount, co-signed by both parties.
//! The ledger settles the difference and extends the window. A payee
//! already slashed for this sequence number is not slashed again.

use opensettle_types::{Result, SettleError};
use opensettle_wire::CorrectionEntry;

use crate::ledger::SettlementLedger;
use crate::state::{Stage, deadline};

/// Committed effect of one `correct_update` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectionOutcome {
    /// Difference actually moved from payee to payer after clipping.
    pub debited: u128,
    /// Whether this correction slashed the payee.
    pub slashed: bool,
}

impl SettlementLedger {
    /// Apply one encoded correction.
    ///
    /// # Errors
    /// `StaleOrReplayedSequence` when the sequence number does not match
    /// the settled record or the amount does not increase,
    /// `DisputeWindowClosed` past `fixed_after`, plus the shared wire,
    /// registration, expiry, and authenticity failures. Every error
    /// leaves the state untouched.
    pub fn correct_update(&mut self, encoded: &[u8]) -> Result<CorrectionOutcome> {
        let now = self.clock.now();
        let buffer = self.config.buffer_period;
        let widths = self.config.strategy.proof_widths();
        let correction = CorrectionEntry::decode(encoded, &widths)?;
        let receipt = correction.receipt;

        let payer_key = self.registry.key_of(receipt.payer)?;
        let payee_key = self.registry.key_of(receipt.payee)?;

        let mut stage = Stage::new(&self.state);
        let record = *stage.record(receipt.payer, receipt.payee);
        if !record.is_settled() || record.seq_no != receipt.seq_no {
            return Err(SettleError::stale(format!(
                "correction targets seq {} but settled seq is {}",
                receipt.seq_no, record.seq_no
            )));
        }
        if !record.window_open(now) {
            return Err(SettleError::DisputeWindowClosed {
                now,
                fixed_after: record.fixed_after,
            });
        }
        if receipt.amount <= record.amount {
            return Err(SettleError::stale(format!(
                "corrected amount {} does not exceed settled amount {}",
                receipt.amount, record.amount
            )));
        }
        if receipt.is_expired(now) {
            return Err(SettleError::ExpiredReceipt {
                expires_by: receipt.expires_by,
                now,
            });
        }

        let payload = receipt.signing_payload();
        self.verifier
            .verify_single(&payload, &correction.payer_sig, payer_key)?;
        self.verifier
            .verify_single(&payload, &correction.payee_sig, payee_key)?;

        let diff = receipt.amount - record.amount;
        let debited = stage.account(receipt.payee).debit_clipped(diff);
        let mut slashed = false;
        if debited < diff && !record.slashed {
            let forfeited = stage.slash(receipt.payee);
            slashed = true;
            tracing::warn!(
                payer = %receipt.payer,
                payee = %receipt.payee,
                seq_no = receipt.seq_no,
                shortfall = diff - debited,
                forfeited,
                "Correction shortfall, deposit slashed"
            );
        }

        let fixed_after = deadline(now, buffer)?;
        {
            let staged = stage.record(receipt.payer, receipt.payee);
            staged.amount = receipt.amount;
            staged.fixed_after = fixed_after;
            if slashed {
                staged.slashed = true;
            }
        }
        stage.account(receipt.payer).credit(debited)?;
        self.state.apply(stage.into_delta());

        tracing::info!(
            payer = %receipt.payer,
            payee = %receipt.payee,
            seq_no = receipt.seq_no,
            amount = receipt.amount,
            debited,
            slashed,
            "Settlement corrected"
        );
        Ok(CorrectionOutcome { debited, slashed })
    }
}
