//! Relationship records: the latest settled state per ordered party pair.
//!
//! A record is keyed by the ordered pair `(payer, payee)` — the pair
//! `(A, B)` is a different relationship than `(B, A)`. The record tracks
//! the cumulative settled amount, the sequence number disambiguating
//! successive receipts, the end of the dispute window, and whether the
//! paying side has already been slashed for the current sequence number.
//!
//! Invariants:
//! - `seq_no` increments by exactly one per settlement and never decreases.
//! - `amount` only increases while correcting the same `seq_no`.
//! - `slashed` transitions false → true at most once per `seq_no` and is
//!   reset when `seq_no` advances.

use serde::{Deserialize, Serialize};

use crate::{Result, SettleError};

/// Latest settled state for one ordered `(payer, payee)` relationship.
///
/// A relationship that has never settled is represented by the default
/// zero record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    /// Latest cumulative settled amount.
    pub amount: u128,
    /// Sequence number of the latest settlement. Zero means unsettled.
    pub seq_no: u16,
    /// End of the dispute window for `seq_no`. Corrections are accepted
    /// strictly before this timestamp.
    pub fixed_after: u32,
    /// Whether the paying side was slashed for the current `seq_no`.
    pub slashed: bool,
}

impl RelationshipRecord {
    /// The sequence number the next settlement of this relationship uses.
    ///
    /// # Errors
    /// [`SettleError::ArithmeticOverflow`] once the 16-bit counter is
    /// exhausted.
    pub fn next_seq(&self) -> Result<u16> {
        self.seq_no
            .checked_add(1)
            .ok_or(SettleError::ArithmeticOverflow)
    }

    /// Whether the dispute window for the current `seq_no` is still open.
    #[must_use]
    pub fn window_open(&self, now: u32) -> bool {
        now < self.fixed_after
    }

    /// Whether this relationship has ever settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.seq_no > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_unsettled() {
        let rec = RelationshipRecord::default();
        assert!(!rec.is_settled());
        assert_eq!(rec.amount, 0);
        assert_eq!(rec.next_seq().unwrap(), 1);
    }

    #[test]
    fn window_threshold_is_strict() {
        let rec = RelationshipRecord {
            fixed_after: 100,
            ..RelationshipRecord::default()
        };
        assert!(rec.window_open(99));
        assert!(!rec.window_open(100), "window closes exactly at fixed_after");
        assert!(!rec.window_open(101));
    }

    #[test]
    fn seq_counter_exhaustion() {
        let rec = RelationshipRecord {
            seq_no: u16::MAX,
            ..RelationshipRecord::default()
        };
        assert!(matches!(
            rec.next_seq(),
            Err(SettleError::ArithmeticOverflow)
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let rec = RelationshipRecord {
            amount: 1_234_567,
            seq_no: 3,
            fixed_after: 1_700_000_000,
            slashed: true,
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: RelationshipRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
