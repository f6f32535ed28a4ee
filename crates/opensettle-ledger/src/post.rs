//! Batch settlement: the `post` entry point.
//!
//! A posting provider submits the latest receipt per counter-party in
//! one encoded batch. Processing stages every effect, verifies the whole
//! batch's authenticity exactly once at the end, and commits atomically;
//! any failure discards the stage.
//!
//! Per entry, in submitted order:
//! 1. resolve the payee and reject expired receipts
//! 2. advance the relationship record (`seq_no + 1`, new amount, fresh
//!    dispute window, slash flag reset)
//! 3. accumulate the canonical claim for end-of-call verification
//! 4. debit the payee clipped at its balance; a clip forfeits the
//!    payee's entire security deposit and marks the record slashed
//! 5. push the payee's withdrawal lock past the buffer period
//!
//! The freshness proof is the payer's signature over its next operation
//! nonce; every successful post, including an empty batch, consumes it.

use opensettle_crypto::ReceiptClaim;
use opensettle_types::{
    PartyId, Receipt, RelationshipRecord, Result, SettleError, post_nonce_payload,
};
use opensettle_wire::PostBatch;

use crate::ledger::SettlementLedger;
use crate::state::{Stage, deadline};

/// Committed effect of one `post` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    /// The posting provider.
    pub payer: PartyId,
    /// Number of entries settled.
    pub entries: usize,
    /// Sum actually credited to the payer after clipping.
    pub collected: u128,
    /// Payees slashed during this batch, in entry order.
    pub slashed: Vec<PartyId>,
}

impl SettlementLedger {
    /// Settle one encoded batch of receipts.
    ///
    /// # Errors
    /// Any wire, registration, expiry, sequence, arithmetic, or
    /// authenticity failure aborts the whole call with no state change.
    pub fn post(&mut self, encoded: &[u8]) -> Result<PostOutcome> {
        let now = self.clock.now();
        let buffer = self.config.buffer_period;
        let widths = self.config.strategy.proof_widths();
        let batch = PostBatch::decode(encoded, &widths)?;

        let payer_key = self.registry.key_of(batch.payer)?;
        let mut stage = Stage::new(&self.state);

        let next_nonce = stage.account(batch.payer).next_nonce()?;
        self.verifier.verify_single(
            &post_nonce_payload(batch.payer, next_nonce),
            &batch.freshness_proof,
            payer_key,
        )?;

        let mut collected: u128 = 0;
        let mut slashed = Vec::new();
        let mut claims = Vec::with_capacity(batch.entries.len());
        for entry in &batch.entries {
            let payee_key = self.registry.key_of(entry.payee)?;
            if entry.expires_by <= now {
                return Err(SettleError::ExpiredReceipt {
                    expires_by: entry.expires_by,
                    now,
                });
            }

            let fixed_after = deadline(now, buffer)?;
            let record = stage.record(batch.payer, entry.payee);
            let seq_no = record.next_seq()?;
            *record = RelationshipRecord {
                amount: entry.amount,
                seq_no,
                fixed_after,
                slashed: false,
            };

            let receipt = Receipt {
                payer: batch.payer,
                payee: entry.payee,
                amount: entry.amount,
                expires_by: entry.expires_by,
                seq_no,
            };
            claims.push(ReceiptClaim {
                payload: receipt.signing_payload(),
                payer: payer_key,
                payee: payee_key,
                proof: &entry.proof,
            });

            let account = stage.account(entry.payee);
            let debited = account.debit_clipped(entry.amount);
            account.lock_withdrawal(fixed_after);
            collected = collected
                .checked_add(debited)
                .ok_or(SettleError::ArithmeticOverflow)?;

            if debited < entry.amount {
                let forfeited = stage.slash(entry.payee);
                stage.record(batch.payer, entry.payee).slashed = true;
                tracing::warn!(
                    payer = %batch.payer,
                    payee = %entry.payee,
                    seq_no,
                    shortfall = entry.amount - debited,
                    forfeited,
                    "Payee overcommitted, deposit slashed"
                );
                slashed.push(entry.payee);
            }
        }

        // One authenticity check for the whole batch, after staging.
        self.verifier.verify_batch(&batch.batch_proof, &claims)?;
        drop(claims);

        {
            let account = stage.account(batch.payer);
            account.credit(collected)?;
            account.nonce = next_nonce;
        }
        let entries = batch.entries.len();
        self.state.apply(stage.into_delta());

        tracing::info!(
            payer = %batch.payer,
            entries,
            collected,
            slashed = slashed.len(),
            nonce = next_nonce,
            "Batch settled"
        );
        Ok(PostOutcome {
            payer: batch.payer,
            entries,
            collected,
            slashed,
        })
    }
}
