//! Deterministic signing helpers for tests. **Never use in production** —
//! real parties sign off-chain with their own custody; the ledger only
//! ever verifies.

use bls12_381::{G1Projective, G2Projective, Scalar};
use group::{Curve, Group};
use secp256k1::ecdsa::RecoverableSignature;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use opensettle_types::PartyKey;

/// A deterministic secp256k1 signer for the recovery strategy.
pub struct RecoverySigner {
    secp: Secp256k1<All>,
    secret: SecretKey,
}

impl RecoverySigner {
    /// Build a signer from a small non-zero seed.
    #[must_use]
    pub fn from_seed(seed: u8) -> Self {
        assert!(seed != 0, "seed must be non-zero");
        let mut bytes = [0u8; 32];
        bytes[31] = seed;
        let secret = SecretKey::from_slice(&bytes).expect("small seeds are valid scalars");
        Self {
            secp: Secp256k1::new(),
            secret,
        }
    }

    /// The key material this signer registers with.
    #[must_use]
    pub fn party_key(&self) -> PartyKey {
        PartyKey::Recovery(PublicKey::from_secret_key(&self.secp, &self.secret).serialize())
    }

    /// Produce the 65-byte wire signature (compact form + recovery id).
    #[must_use]
    pub fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let message = Message::from_digest(digest);
        let signature: RecoverableSignature = self.secp.sign_ecdsa_recoverable(&message, &self.secret);
        let (rec_id, compact) = signature.serialize_compact();
        let mut wire = compact.to_vec();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        wire.push(rec_id.to_i32() as u8);
        wire
    }
}

/// A deterministic BLS signer for the aggregate strategy.
pub struct AggregateSigner {
    secret: Scalar,
    domain_tag: Vec<u8>,
}

impl AggregateSigner {
    /// Build a signer from a small non-zero seed, hashing under
    /// `domain_tag`.
    #[must_use]
    pub fn from_seed(seed: u64, domain_tag: &[u8]) -> Self {
        assert!(seed != 0, "seed must be non-zero");
        Self {
            secret: Scalar::from(seed),
            domain_tag: domain_tag.to_vec(),
        }
    }

    /// The key material this signer registers with (compressed G1).
    #[must_use]
    pub fn party_key(&self) -> PartyKey {
        let pk = (G1Projective::generator() * self.secret).to_affine();
        PartyKey::Aggregate(pk.to_compressed())
    }

    /// Sign one payload, returning the G2 point for later aggregation.
    #[must_use]
    pub fn sign(&self, payload: &[u8]) -> G2Projective {
        let hash = <G2Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(
            payload,
            &self.domain_tag,
        );
        hash * self.secret
    }

    /// Sign one payload and compress to the 96-byte wire form.
    #[must_use]
    pub fn sign_single(&self, payload: &[u8]) -> Vec<u8> {
        self.sign(payload).to_affine().to_compressed().to_vec()
    }
}

/// Aggregate individual G2 signatures into the 96-byte wire proof.
/// An empty slice aggregates to the identity point, which is what an
/// empty batch verifies against.
#[must_use]
pub fn aggregate_signatures(signatures: &[G2Projective]) -> Vec<u8> {
    let sum = signatures
        .iter()
        .fold(G2Projective::identity(), |acc, sig| acc + sig);
    sum.to_affine().to_compressed().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_signer_is_deterministic() {
        let a = RecoverySigner::from_seed(5);
        let b = RecoverySigner::from_seed(5);
        assert_eq!(a.party_key(), b.party_key());
        assert_eq!(a.sign(b"payload"), b.sign(b"payload"));
    }

    #[test]
    fn distinct_seeds_distinct_keys() {
        let a = RecoverySigner::from_seed(1);
        let b = RecoverySigner::from_seed(2);
        assert_ne!(a.party_key(), b.party_key());

        let tag = b"tag";
        let c = AggregateSigner::from_seed(1, tag);
        let d = AggregateSigner::from_seed(2, tag);
        assert_ne!(c.party_key(), d.party_key());
    }

    #[test]
    fn aggregate_of_nothing_is_identity() {
        let proof = aggregate_signatures(&[]);
        assert_eq!(proof.len(), 96);
        // Compressed identity: infinity bit set, rest zero.
        assert_eq!(proof[0], 0xC0);
        assert!(proof[1..].iter().all(|&b| b == 0));
    }
}
