//! Configuration for a settlement ledger instance.
//!
//! The dispute/withdrawal buffer period and the cryptographic domain tag
//! are externally supplied protocol parameters, not compiled-in
//! constants. Defaults match the production fixture: a 7-day buffer and
//! the versioned OpenSettle domain tag.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Which signature verification strategy the ledger runs with.
///
/// Selected once at construction time; registered key material must
/// match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerifyStrategy {
    /// Per-entry ECDSA signatures checked by public-key recovery.
    Recovery,
    /// One BLS aggregate signature checked for the whole batch.
    Aggregate,
}

/// Byte widths of the proof material a strategy places on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofWidths {
    /// Width of one party's signature (freshness proofs, corrections,
    /// withdrawal authorizations).
    pub signature: usize,
    /// Width of the batch-level proof section of a `post` payload.
    pub batch_proof: usize,
    /// Width of the per-entry proof material of a `post` entry.
    pub entry_proof: usize,
}

impl VerifyStrategy {
    /// Proof widths for this strategy.
    #[must_use]
    pub fn proof_widths(self) -> ProofWidths {
        match self {
            Self::Recovery => ProofWidths {
                signature: constants::RECOVERY_SIG_WIDTH,
                batch_proof: 0,
                entry_proof: 2 * constants::RECOVERY_SIG_WIDTH,
            },
            Self::Aggregate => ProofWidths {
                signature: constants::AGGREGATE_SIG_WIDTH,
                batch_proof: constants::AGGREGATE_SIG_WIDTH,
                entry_proof: 0,
            },
        }
    }
}

impl std::fmt::Display for VerifyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recovery => write!(f, "RECOVERY"),
            Self::Aggregate => write!(f, "AGGREGATE"),
        }
    }
}

/// Configuration for one ledger instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Signature verification strategy.
    pub strategy: VerifyStrategy,
    /// Buffer period in seconds applied to dispute windows and
    /// withdrawal locks.
    pub buffer_period: u32,
    /// Domain-separation tag for hash-to-curve under the aggregate
    /// strategy.
    pub domain_tag: Vec<u8>,
}

impl LedgerConfig {
    /// Default configuration for the recovery strategy.
    #[must_use]
    pub fn recovery() -> Self {
        Self {
            strategy: VerifyStrategy::Recovery,
            buffer_period: constants::DEFAULT_BUFFER_PERIOD_SECS,
            domain_tag: constants::DEFAULT_DOMAIN_TAG.to_vec(),
        }
    }

    /// Default configuration for the aggregate strategy.
    #[must_use]
    pub fn aggregate() -> Self {
        Self {
            strategy: VerifyStrategy::Aggregate,
            ..Self::recovery()
        }
    }

    /// Override the buffer period (builder style).
    #[must_use]
    pub fn with_buffer_period(mut self, seconds: u32) -> Self {
        self.buffer_period = seconds;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::recovery()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_seven_days() {
        let cfg = LedgerConfig::default();
        assert_eq!(cfg.buffer_period, 7 * 86_400);
        assert_eq!(cfg.strategy, VerifyStrategy::Recovery);
        assert_eq!(cfg.domain_tag, constants::DEFAULT_DOMAIN_TAG);
    }

    #[test]
    fn buffer_period_is_configurable() {
        let cfg = LedgerConfig::aggregate().with_buffer_period(86_400);
        assert_eq!(cfg.buffer_period, 86_400);
        assert_eq!(cfg.strategy, VerifyStrategy::Aggregate);
    }

    #[test]
    fn recovery_widths() {
        let w = VerifyStrategy::Recovery.proof_widths();
        assert_eq!(w.signature, 65);
        assert_eq!(w.batch_proof, 0);
        assert_eq!(w.entry_proof, 130);
    }

    #[test]
    fn aggregate_widths() {
        let w = VerifyStrategy::Aggregate.proof_widths();
        assert_eq!(w.signature, 96);
        assert_eq!(w.batch_proof, 96);
        assert_eq!(w.entry_proof, 0);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = LedgerConfig::aggregate().with_buffer_period(3_600);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.strategy, back.strategy);
        assert_eq!(cfg.buffer_period, back.buffer_period);
        assert_eq!(cfg.domain_tag, back.domain_tag);
    }
}
