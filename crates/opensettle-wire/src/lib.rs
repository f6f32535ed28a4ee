//! # opensettle-wire
//!
//! Fixed-offset binary codec for OpenSettle settlement payloads.
//!
//! All fields are fixed-width big-endian with no padding. Decoders
//! validate the total payload length before extracting anything and
//! reject any mismatch as `OS_ERR_500 MalformedInput` — trailing bytes
//! are an error, not ignored.
//!
//! Layouts (proof widths depend on the configured verification strategy;
//! see [`opensettle_types::ProofWidths`]):
//!
//! ```text
//! post:
//!   payer(8) | count(2) | freshness proof(S) | batch proof(B)
//!   | count x [ payee(8) | amount(16) | expires_by(4) | entry proof(E) ]
//!
//! correct_update:
//!   payer(8) | payee(8) | amount(16) | expires_by(4) | seq_no(2)
//!   | payer sig(S) | payee sig(S)
//! ```

pub mod batch;
pub mod cursor;

pub use batch::*;
pub use cursor::WireCursor;
