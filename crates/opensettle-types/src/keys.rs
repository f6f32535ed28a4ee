//! Registered key material for parties.
//!
//! A party registers exactly one key, and its variant must match the
//! ledger's configured verification strategy: a compressed secp256k1
//! point for the recovery strategy, or a compressed BLS12-381 G1 point
//! for the aggregate strategy. Registration is write-once.

use std::fmt;

use crate::{PartyId, VerifyStrategy};

/// Public key material registered for a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyKey {
    /// Compressed secp256k1 public key, checked against ECDSA recovery.
    Recovery([u8; 33]),
    /// Compressed BLS12-381 G1 public key, paired in aggregate checks.
    Aggregate([u8; 48]),
}

impl PartyKey {
    /// Whether this key variant is usable under the given strategy.
    #[must_use]
    pub fn matches(&self, strategy: VerifyStrategy) -> bool {
        matches!(
            (self, strategy),
            (Self::Recovery(_), VerifyStrategy::Recovery)
                | (Self::Aggregate(_), VerifyStrategy::Aggregate)
        )
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Recovery(bytes) => bytes,
            Self::Aggregate(bytes) => bytes,
        }
    }

    /// Short hex form for logs.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.as_bytes()[..4])
    }
}

impl fmt::Display for PartyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recovery(_) => write!(f, "secp256k1:{}", self.short()),
            Self::Aggregate(_) => write!(f, "bls12381:{}", self.short()),
        }
    }
}

/// A registered party: stable identity plus its immutable key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Party {
    /// Stable numeric identity, assigned at registration.
    pub id: PartyId,
    /// Key material matching the configured strategy.
    pub key: PartyKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_matches_strategy() {
        let recovery = PartyKey::Recovery([2u8; 33]);
        let aggregate = PartyKey::Aggregate([3u8; 48]);

        assert!(recovery.matches(VerifyStrategy::Recovery));
        assert!(!recovery.matches(VerifyStrategy::Aggregate));
        assert!(aggregate.matches(VerifyStrategy::Aggregate));
        assert!(!aggregate.matches(VerifyStrategy::Recovery));
    }

    #[test]
    fn display_names_scheme() {
        let key = PartyKey::Recovery([0xAB; 33]);
        let shown = key.to_string();
        assert!(shown.starts_with("secp256k1:"));
        assert!(shown.contains("abababab"));
    }

    #[test]
    fn short_is_four_bytes_of_hex() {
        let key = PartyKey::Aggregate([0x01; 48]);
        assert_eq!(key.short(), "01010101");
    }
}
