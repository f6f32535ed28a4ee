//! # opensettle-crypto
//!
//! The [`SignatureVerifier`] contract and its two interchangeable
//! strategies:
//!
//! - [`RecoveryVerifier`] — per-entry secp256k1 ECDSA signatures checked
//!   by public-key recovery: each 65-byte signature is recovered over the
//!   SHA-256 digest of the canonical payload and the recovered key must
//!   equal the registered one.
//! - [`AggregateVerifier`] — BLS12-381 min-pubkey aggregate verification:
//!   every payload is hashed to G2 under the configured domain tag and
//!   the whole batch is authenticated by a single multi-Miller-loop
//!   pairing check. One bad entry fails the entire batch, with no
//!   indication which entry it was.
//!
//! The settlement processor only ever talks to the trait; which strategy
//! is active is a construction-time configuration decision.

pub mod aggregate;
pub mod recovery;
pub mod verifier;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testkit;

pub use aggregate::AggregateVerifier;
pub use recovery::RecoveryVerifier;
pub use verifier::{ReceiptClaim, SignatureVerifier};
