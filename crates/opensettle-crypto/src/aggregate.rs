//! BLS aggregate verification strategy (min-pubkey convention).
//!
//! Public keys are compressed G1 points (48 bytes); signatures live in
//! G2 (96 bytes compressed). Every payload is hashed to a G2 point with
//! `ExpandMsgXmd<Sha256>` under the configured domain-separation tag,
//! and a batch is authenticated by the single check
//!
//! ```text
//! e(g1, sigma) == prod_i e(pk_i, H(m_i))
//! ```
//!
//! evaluated as one multi-Miller loop with the generator negated on the
//! signature term. Identity public keys are rejected outright.

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{multi_miller_loop, G1Affine, G2Affine, G2Prepared, G2Projective, Gt};
use group::Curve;
use sha2::Sha256;

use opensettle_types::{constants, PartyKey, Result, SettleError, VerifyStrategy};

use crate::verifier::{ReceiptClaim, SignatureVerifier};

/// Verifier for the aggregate strategy.
pub struct AggregateVerifier {
    domain_tag: Vec<u8>,
}

impl AggregateVerifier {
    /// Create a verifier hashing messages under `domain_tag`.
    #[must_use]
    pub fn new(domain_tag: Vec<u8>) -> Self {
        Self { domain_tag }
    }

    fn hash_to_g2(&self, payload: &[u8]) -> G2Affine {
        <G2Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(
            payload,
            &self.domain_tag,
        )
        .to_affine()
    }

    fn decode_key(key: &PartyKey) -> Result<G1Affine> {
        let PartyKey::Aggregate(bytes) = key else {
            return Err(SettleError::InvalidSignature);
        };
        let point: Option<G1Affine> = G1Affine::from_compressed(bytes).into();
        let point = point.ok_or(SettleError::InvalidSignature)?;
        if bool::from(point.is_identity()) {
            return Err(SettleError::InvalidSignature);
        }
        Ok(point)
    }

    fn decode_signature(signature: &[u8]) -> Result<G2Affine> {
        let bytes: [u8; constants::AGGREGATE_SIG_WIDTH] = signature
            .try_into()
            .map_err(|_| SettleError::InvalidSignature)?;
        let point: Option<G2Affine> = G2Affine::from_compressed(&bytes).into();
        point.ok_or(SettleError::InvalidSignature)
    }

    /// The core pairing check over already-decoded terms.
    fn pairing_check(signature: &G2Affine, terms: &[(G1Affine, G2Affine)]) -> Result<()> {
        let neg_generator = -G1Affine::generator();
        let sig_prepared = G2Prepared::from(*signature);
        let prepared: Vec<(G1Affine, G2Prepared)> = terms
            .iter()
            .map(|(pk, hash)| (*pk, G2Prepared::from(*hash)))
            .collect();

        let mut pairs: Vec<(&G1Affine, &G2Prepared)> = Vec::with_capacity(prepared.len() + 1);
        pairs.push((&neg_generator, &sig_prepared));
        for (pk, hash) in &prepared {
            pairs.push((pk, hash));
        }

        if multi_miller_loop(&pairs).final_exponentiation() == Gt::identity() {
            Ok(())
        } else {
            Err(SettleError::InvalidSignature)
        }
    }
}

impl SignatureVerifier for AggregateVerifier {
    fn strategy(&self) -> VerifyStrategy {
        VerifyStrategy::Aggregate
    }

    fn verify_batch(&self, batch_proof: &[u8], claims: &[ReceiptClaim<'_>]) -> Result<()> {
        let signature = Self::decode_signature(batch_proof)?;
        let mut terms = Vec::with_capacity(claims.len());
        for claim in claims {
            if !claim.proof.is_empty() {
                return Err(SettleError::malformed(
                    "aggregate strategy carries no per-entry proof",
                ));
            }
            // Only the paying side attests each receipt; the payer's
            // participation is the freshness proof over its counter.
            let pk = Self::decode_key(claim.payee)?;
            terms.push((pk, self.hash_to_g2(&claim.payload)));
        }
        Self::pairing_check(&signature, &terms)
    }

    fn verify_single(&self, payload: &[u8], signature: &[u8], signer: &PartyKey) -> Result<()> {
        let signature = Self::decode_signature(signature)?;
        let pk = Self::decode_key(signer)?;
        Self::pairing_check(&signature, &[(pk, self.hash_to_g2(payload))])
    }
}
