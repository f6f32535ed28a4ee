//! Settlement batch and correction payload codecs.
//!
//! Decoders take the [`ProofWidths`] of the active verification strategy
//! and validate the exact total length; encoders are the mirror image and
//! are what off-chain callers (and the test suites) use to assemble
//! payloads.

use opensettle_types::{PartyId, ProofWidths, Receipt, Result, SettleError};

use crate::cursor::WireCursor;

/// One partial update entry of a `post` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    /// The paying counter-party this entry settles against.
    pub payee: PartyId,
    /// Cumulative amount claimed.
    pub amount: u128,
    /// Receipt expiry timestamp.
    pub expires_by: u32,
    /// Per-entry proof material; empty under the aggregate strategy.
    pub proof: Vec<u8>,
}

/// A decoded `post` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBatch {
    /// The posting provider (value-collecting side).
    pub payer: PartyId,
    /// Signature over the provider's next operation nonce.
    pub freshness_proof: Vec<u8>,
    /// Batch-level proof; empty under the recovery strategy.
    pub batch_proof: Vec<u8>,
    /// Entries in submitted order.
    pub entries: Vec<PostEntry>,
}

impl PostBatch {
    /// Decode a `post` payload, validating the exact total length.
    ///
    /// # Errors
    /// `MalformedInput` on any length or framing mismatch.
    pub fn decode(buf: &[u8], widths: &ProofWidths) -> Result<Self> {
        let mut cur = WireCursor::new(buf);
        let payer = PartyId(cur.read_u64()?);
        let count = cur.read_u16()?;
        let freshness_proof = cur.read_bytes(widths.signature)?.to_vec();
        let batch_proof = cur.read_bytes(widths.batch_proof)?.to_vec();

        let mut entries = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let payee = PartyId(cur.read_u64()?);
            let amount = cur.read_u128()?;
            let expires_by = cur.read_u32()?;
            let proof = cur.read_bytes(widths.entry_proof)?.to_vec();
            entries.push(PostEntry {
                payee,
                amount,
                expires_by,
                proof,
            });
        }
        cur.finish()?;

        Ok(Self {
            payer,
            freshness_proof,
            batch_proof,
            entries,
        })
    }

    /// Encode this batch back to wire form.
    ///
    /// # Errors
    /// `MalformedInput` if the entry count exceeds the 16-bit wire field
    /// or any proof has the wrong width for the strategy.
    pub fn encode(&self, widths: &ProofWidths) -> Result<Vec<u8>> {
        let count = u16::try_from(self.entries.len())
            .map_err(|_| SettleError::malformed("more than 65535 batch entries"))?;
        check_width("freshness proof", &self.freshness_proof, widths.signature)?;
        check_width("batch proof", &self.batch_proof, widths.batch_proof)?;

        let mut buf = Vec::with_capacity(
            10 + widths.signature
                + widths.batch_proof
                + self.entries.len() * (28 + widths.entry_proof),
        );
        buf.extend_from_slice(&self.payer.to_wire());
        buf.extend_from_slice(&count.to_be_bytes());
        buf.extend_from_slice(&self.freshness_proof);
        buf.extend_from_slice(&self.batch_proof);
        for entry in &self.entries {
            check_width("entry proof", &entry.proof, widths.entry_proof)?;
            buf.extend_from_slice(&entry.payee.to_wire());
            buf.extend_from_slice(&entry.amount.to_be_bytes());
            buf.extend_from_slice(&entry.expires_by.to_be_bytes());
            buf.extend_from_slice(&entry.proof);
        }
        Ok(buf)
    }
}

/// A decoded `correct_update` payload: the corrected receipt plus both
/// parties' fresh signatures over its canonical payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEntry {
    /// The corrected receipt (same `seq_no`, strictly higher amount).
    pub receipt: Receipt,
    /// The collecting provider's signature.
    pub payer_sig: Vec<u8>,
    /// The paying counter-party's signature.
    pub payee_sig: Vec<u8>,
}

impl CorrectionEntry {
    /// Decode a `correct_update` payload, validating the exact length.
    ///
    /// # Errors
    /// `MalformedInput` on any length or framing mismatch.
    pub fn decode(buf: &[u8], widths: &ProofWidths) -> Result<Self> {
        let mut cur = WireCursor::new(buf);
        let payer = PartyId(cur.read_u64()?);
        let payee = PartyId(cur.read_u64()?);
        let amount = cur.read_u128()?;
        let expires_by = cur.read_u32()?;
        let seq_no = cur.read_u16()?;
        let payer_sig = cur.read_bytes(widths.signature)?.to_vec();
        let payee_sig = cur.read_bytes(widths.signature)?.to_vec();
        cur.finish()?;

        Ok(Self {
            receipt: Receipt {
                payer,
                payee,
                amount,
                expires_by,
                seq_no,
            },
            payer_sig,
            payee_sig,
        })
    }

    /// Encode this correction back to wire form.
    ///
    /// # Errors
    /// `MalformedInput` if either signature has the wrong width.
    pub fn encode(&self, widths: &ProofWidths) -> Result<Vec<u8>> {
        check_width("payer signature", &self.payer_sig, widths.signature)?;
        check_width("payee signature", &self.payee_sig, widths.signature)?;

        let mut buf = Vec::with_capacity(38 + 2 * widths.signature);
        buf.extend_from_slice(&self.receipt.payer.to_wire());
        buf.extend_from_slice(&self.receipt.payee.to_wire());
        buf.extend_from_slice(&self.receipt.amount.to_be_bytes());
        buf.extend_from_slice(&self.receipt.expires_by.to_be_bytes());
        buf.extend_from_slice(&self.receipt.seq_no.to_be_bytes());
        buf.extend_from_slice(&self.payer_sig);
        buf.extend_from_slice(&self.payee_sig);
        Ok(buf)
    }
}

fn check_width(field: &str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(SettleError::malformed(format!(
            "{field} must be {expected} bytes, got {}",
            bytes.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use opensettle_types::VerifyStrategy;

    use super::*;

    fn recovery_widths() -> ProofWidths {
        VerifyStrategy::Recovery.proof_widths()
    }

    fn aggregate_widths() -> ProofWidths {
        VerifyStrategy::Aggregate.proof_widths()
    }

    fn sample_batch(widths: &ProofWidths, entries: usize) -> PostBatch {
        PostBatch {
            payer: PartyId(1),
            freshness_proof: vec![0xAA; widths.signature],
            batch_proof: vec![0xBB; widths.batch_proof],
            entries: (0..entries)
                .map(|i| PostEntry {
                    payee: PartyId(100 + i as u64),
                    amount: 1_000 * (i as u128 + 1),
                    expires_by: 5_000,
                    proof: vec![0xCC; widths.entry_proof],
                })
                .collect(),
        }
    }

    #[test]
    fn post_roundtrip_recovery() {
        let widths = recovery_widths();
        let batch = sample_batch(&widths, 3);
        let wire = batch.encode(&widths).unwrap();
        let back = PostBatch::decode(&wire, &widths).unwrap();
        assert_eq!(batch, back);
    }

    #[test]
    fn post_roundtrip_aggregate() {
        let widths = aggregate_widths();
        let batch = sample_batch(&widths, 2);
        let wire = batch.encode(&widths).unwrap();
        let back = PostBatch::decode(&wire, &widths).unwrap();
        assert_eq!(batch, back);
        assert!(back.entries.iter().all(|e| e.proof.is_empty()));
    }

    #[test]
    fn empty_batch_roundtrip() {
        let widths = aggregate_widths();
        let batch = sample_batch(&widths, 0);
        let wire = batch.encode(&widths).unwrap();
        let back = PostBatch::decode(&wire, &widths).unwrap();
        assert!(back.entries.is_empty());
    }

    #[test]
    fn truncated_post_rejected() {
        let widths = recovery_widths();
        let wire = sample_batch(&widths, 2).encode(&widths).unwrap();
        let err = PostBatch::decode(&wire[..wire.len() - 1], &widths).unwrap_err();
        assert!(matches!(err, SettleError::MalformedInput { .. }));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let widths = recovery_widths();
        let mut wire = sample_batch(&widths, 1).encode(&widths).unwrap();
        wire.push(0);
        let err = PostBatch::decode(&wire, &widths).unwrap_err();
        assert!(matches!(err, SettleError::MalformedInput { .. }));
    }

    #[test]
    fn count_must_match_entry_bytes() {
        let widths = aggregate_widths();
        let mut wire = sample_batch(&widths, 2).encode(&widths).unwrap();
        // Claim three entries while carrying two.
        wire[8..10].copy_from_slice(&3u16.to_be_bytes());
        let err = PostBatch::decode(&wire, &widths).unwrap_err();
        assert!(matches!(err, SettleError::MalformedInput { .. }));
    }

    #[test]
    fn wrong_proof_width_rejected_on_encode() {
        let widths = recovery_widths();
        let mut batch = sample_batch(&widths, 1);
        batch.freshness_proof.pop();
        let err = batch.encode(&widths).unwrap_err();
        assert!(matches!(err, SettleError::MalformedInput { .. }));
    }

    #[test]
    fn correction_roundtrip() {
        let widths = recovery_widths();
        let correction = CorrectionEntry {
            receipt: Receipt {
                payer: PartyId(1),
                payee: PartyId(2),
                amount: u128::MAX,
                expires_by: 9_999,
                seq_no: 4,
            },
            payer_sig: vec![0x11; widths.signature],
            payee_sig: vec![0x22; widths.signature],
        };
        let wire = correction.encode(&widths).unwrap();
        let back = CorrectionEntry::decode(&wire, &widths).unwrap();
        assert_eq!(correction, back);
    }

    #[test]
    fn correction_length_is_exact() {
        let widths = aggregate_widths();
        let correction = CorrectionEntry {
            receipt: Receipt {
                payer: PartyId(1),
                payee: PartyId(2),
                amount: 10,
                expires_by: 100,
                seq_no: 1,
            },
            payer_sig: vec![0; widths.signature],
            payee_sig: vec![0; widths.signature],
        };
        let mut wire = correction.encode(&widths).unwrap();
        wire.push(0xFF);
        let err = CorrectionEntry::decode(&wire, &widths).unwrap_err();
        assert!(matches!(err, SettleError::MalformedInput { .. }));
    }
}
