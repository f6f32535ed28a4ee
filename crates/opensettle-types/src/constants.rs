//! System-wide constants for the OpenSettle settlement ledger.

/// Default withdrawal / dispute buffer period in seconds (7 days).
pub const DEFAULT_BUFFER_PERIOD_SECS: u32 = 7 * 86_400;

/// Default domain-separation tag for hashing batch messages to curve
/// points under the aggregate verification strategy.
pub const DEFAULT_DOMAIN_TAG: &[u8] = b"OPENSETTLE_BLS12381G2_XMD:SHA-256_SSWU_RO_V1_";

/// Versioned prefix of the canonical receipt signing payload.
pub const RECEIPT_PAYLOAD_PREFIX: &[u8] = b"opensettle:receipt:v1:";

/// Versioned prefix of the post freshness-proof payload.
pub const POST_NONCE_PAYLOAD_PREFIX: &[u8] = b"opensettle:post-nonce:v1:";

/// Versioned prefix of the withdrawal authorization payload.
pub const WITHDRAW_PAYLOAD_PREFIX: &[u8] = b"opensettle:withdraw:v1:";

// --- Wire field widths (big-endian, no padding) ---

/// Width of a party identity on the wire.
pub const PARTY_ID_WIDTH: usize = 8;

/// Width of a settlement amount on the wire.
pub const AMOUNT_WIDTH: usize = 16;

/// Width of an expiry timestamp on the wire.
pub const EXPIRY_WIDTH: usize = 4;

/// Width of a relationship sequence number on the wire.
pub const SEQ_NO_WIDTH: usize = 2;

/// Width of the batch entry count on the wire.
pub const ENTRY_COUNT_WIDTH: usize = 2;

// --- Proof material widths ---

/// A recoverable ECDSA signature: 64-byte compact form + 1 recovery id byte.
pub const RECOVERY_SIG_WIDTH: usize = 65;

/// A compressed secp256k1 public key.
pub const RECOVERY_KEY_WIDTH: usize = 33;

/// A compressed BLS12-381 G2 signature (single or aggregate).
pub const AGGREGATE_SIG_WIDTH: usize = 96;

/// A compressed BLS12-381 G1 public key.
pub const AGGREGATE_KEY_WIDTH: usize = 48;
