//! The pluggable authenticity contract consumed by the settlement core.

use opensettle_types::{PartyKey, Result, VerifyStrategy};

/// One receipt awaiting authentication inside a settlement batch.
///
/// Carries the canonical signing payload, both parties' registered key
/// material, and the entry's proof slice from the wire (empty under the
/// aggregate strategy, where the batch-level proof covers every entry).
#[derive(Debug)]
pub struct ReceiptClaim<'a> {
    /// Canonical signing payload of the receipt.
    pub payload: Vec<u8>,
    /// The collecting provider's registered key.
    pub payer: &'a PartyKey,
    /// The paying counter-party's registered key.
    pub payee: &'a PartyKey,
    /// Per-entry proof bytes from the wire.
    pub proof: &'a [u8],
}

/// Batch authenticity check behind one contract, two strategies.
///
/// Callers must treat `verify_batch` as all-or-nothing: a failure means
/// at least one claim was not authentic, and there is no way (and no
/// permission) to tell which.
pub trait SignatureVerifier: Send + Sync {
    /// The strategy this verifier implements. Used only for wire framing
    /// (proof widths) and registration-time key checks.
    fn strategy(&self) -> VerifyStrategy;

    /// Verify a whole settlement batch in one call.
    ///
    /// # Errors
    /// `InvalidSignature` if any claim fails; `MalformedInput` if proof
    /// material has the wrong shape for this strategy.
    fn verify_batch(&self, batch_proof: &[u8], claims: &[ReceiptClaim<'_>]) -> Result<()>;

    /// Verify one party's signature over a single payload (freshness
    /// proofs, corrections, withdrawal authorizations).
    ///
    /// # Errors
    /// `InvalidSignature` on any mismatch, including a key variant that
    /// does not belong to this strategy.
    fn verify_single(&self, payload: &[u8], signature: &[u8], signer: &PartyKey) -> Result<()>;
}
