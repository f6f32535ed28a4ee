//! Identifiers used throughout OpenSettle.
//!
//! Parties are identified by the stable numeric index assigned at
//! registration — the same 8-byte big-endian value that appears on the
//! wire. Identities are never recycled.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable numeric identity of a registered party.
///
/// Travels on the wire as 8 bytes big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PartyId(pub u64);

impl PartyId {
    /// Big-endian wire encoding of this identity.
    #[must_use]
    pub fn to_wire(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Decode an identity from its big-endian wire form.
    #[must_use]
    pub fn from_wire(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "party:{}", self.0)
    }
}

impl From<u64> for PartyId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip() {
        let id = PartyId(0x0102_0304_0506_0708);
        assert_eq!(id.to_wire(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(PartyId::from_wire(id.to_wire()), id);
    }

    #[test]
    fn display_format() {
        assert_eq!(PartyId(7).to_string(), "party:7");
    }

    #[test]
    fn ordering_follows_index() {
        assert!(PartyId(1) < PartyId(2));
    }

    #[test]
    fn serde_roundtrip() {
        let id = PartyId(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
