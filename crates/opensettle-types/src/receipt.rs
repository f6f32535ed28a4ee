//! Off-chain receipts and the canonical signing payloads.
//!
//! A receipt is a claim of cumulative amount owed between an ordered
//! party pair, tagged with a sequence number and an expiry. Receipts are
//! never stored by the ledger — only their effect is persisted into the
//! relationship record.
//!
//! All signing payloads are deterministic fixed-width big-endian
//! encodings behind a versioned ASCII prefix, so both verification
//! strategies (digest-and-recover, hash-to-curve) operate on identical
//! bytes.

use serde::{Deserialize, Serialize};

use crate::{constants, PartyId};

/// An off-chain claim of cumulative amount owed from `payee` to `payer`.
///
/// Naming follows the wire format: the `payer` is the posting provider
/// that collects value; the `payee` is the counter-party whose balance
/// is debited when the receipt settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The collecting provider (the party that posts the batch).
    pub payer: PartyId,
    /// The paying counter-party.
    pub payee: PartyId,
    /// Cumulative amount owed as of `seq_no`.
    pub amount: u128,
    /// The receipt must settle strictly before this timestamp.
    pub expires_by: u32,
    /// Sequence number disambiguating successive receipts.
    pub seq_no: u16,
}

impl Receipt {
    /// Canonical signing payload:
    /// `"opensettle:receipt:v1:" || payer(8) || payee(8) || amount(16) || expires_by(4) || seq_no(2)`.
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(constants::RECEIPT_PAYLOAD_PREFIX.len() + 38);
        payload.extend_from_slice(constants::RECEIPT_PAYLOAD_PREFIX);
        payload.extend_from_slice(&self.payer.to_wire());
        payload.extend_from_slice(&self.payee.to_wire());
        payload.extend_from_slice(&self.amount.to_be_bytes());
        payload.extend_from_slice(&self.expires_by.to_be_bytes());
        payload.extend_from_slice(&self.seq_no.to_be_bytes());
        payload
    }

    /// Whether the receipt is expired at ledger time `now`.
    /// Expiry is inclusive: a receipt expiring exactly now is rejected.
    #[must_use]
    pub fn is_expired(&self, now: u32) -> bool {
        self.expires_by <= now
    }
}

/// Freshness-proof payload for a `post` call:
/// `"opensettle:post-nonce:v1:" || payer(8) || nonce(8)`.
#[must_use]
pub fn post_nonce_payload(payer: PartyId, nonce: u64) -> Vec<u8> {
    let mut payload = Vec::with_capacity(constants::POST_NONCE_PAYLOAD_PREFIX.len() + 16);
    payload.extend_from_slice(constants::POST_NONCE_PAYLOAD_PREFIX);
    payload.extend_from_slice(&payer.to_wire());
    payload.extend_from_slice(&nonce.to_be_bytes());
    payload
}

/// Withdrawal authorization payload:
/// `"opensettle:withdraw:v1:" || party(8) || nonce(8) || amount(16)`.
#[must_use]
pub fn withdraw_payload(party: PartyId, nonce: u64, amount: u128) -> Vec<u8> {
    let mut payload = Vec::with_capacity(constants::WITHDRAW_PAYLOAD_PREFIX.len() + 32);
    payload.extend_from_slice(constants::WITHDRAW_PAYLOAD_PREFIX);
    payload.extend_from_slice(&party.to_wire());
    payload.extend_from_slice(&nonce.to_be_bytes());
    payload.extend_from_slice(&amount.to_be_bytes());
    payload
}
