//! Error types for the OpenSettle settlement ledger.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Party / registration errors
//! - 2xx: Balance / withdrawal errors
//! - 3xx: Receipt / sequence errors
//! - 4xx: Dispute errors
//! - 5xx: Wire format errors
//! - 6xx: Authenticity errors
//! - 9xx: Arithmetic / external collaborator errors
//!
//! Every error aborts the entire entry-point call: no partial mutation is
//! ever persisted, and retries are strictly an off-chain concern.

use thiserror::Error;

use crate::PartyId;

/// Central error enum for all OpenSettle operations.
#[derive(Debug, Error)]
pub enum SettleError {
    // =================================================================
    // Party / Registration Errors (1xx)
    // =================================================================
    /// The referenced identity does not resolve to a registered party.
    #[error("OS_ERR_100: Unregistered party: {0}")]
    UnregisteredParty(PartyId),

    /// Registration is write-once; the identity is already taken.
    #[error("OS_ERR_101: Party already registered: {0}")]
    PartyAlreadyRegistered(PartyId),

    // =================================================================
    // Balance / Withdrawal Errors (2xx)
    // =================================================================
    /// A withdrawal asked for more than the account currently holds.
    #[error("OS_ERR_200: Excessive withdrawal amount: requested {requested}, available {available}")]
    ExcessiveWithdrawalAmount { requested: u128, available: u128 },

    /// `process_withdrawal` was called with nothing pending.
    #[error("OS_ERR_201: No pending withdrawal for {0}")]
    NoPendingWithdrawal(PartyId),

    /// The withdrawal buffer period has not fully elapsed.
    #[error("OS_ERR_202: Dispute window not yet elapsed: now {now}, locked until {locked_until}")]
    DisputeWindowNotYetElapsed { now: u32, locked_until: u32 },

    // =================================================================
    // Receipt / Sequence Errors (3xx)
    // =================================================================
    /// The receipt expired at or before the current ledger time.
    #[error("OS_ERR_300: Expired receipt: expires_by {expires_by}, now {now}")]
    ExpiredReceipt { expires_by: u32, now: u32 },

    /// A sequence number or claimed amount does not advance the stored state.
    #[error("OS_ERR_301: Stale or replayed sequence: {reason}")]
    StaleOrReplayedSequence { reason: String },

    // =================================================================
    // Dispute Errors (4xx)
    // =================================================================
    /// The dispute window for the settled sequence number has closed.
    #[error("OS_ERR_400: Dispute window closed: now {now}, fixed_after {fixed_after}")]
    DisputeWindowClosed { now: u32, fixed_after: u32 },

    // =================================================================
    // Wire Format Errors (5xx)
    // =================================================================
    /// The input buffer has the wrong length, encoding, or field range.
    #[error("OS_ERR_500: Malformed input: {reason}")]
    MalformedInput { reason: String },

    // =================================================================
    // Authenticity Errors (6xx)
    // =================================================================
    /// Signature verification failed. For an aggregate batch this means
    /// at least one entry was not authentic — callers must not interpret
    /// which one.
    #[error("OS_ERR_600: Invalid signature")]
    InvalidSignature,

    // =================================================================
    // Arithmetic / External (9xx)
    // =================================================================
    /// Checked arithmetic on a protocol-width field overflowed.
    #[error("OS_ERR_900: Arithmetic overflow")]
    ArithmeticOverflow,

    /// The external value-transfer collaborator failed; the calling
    /// operation aborts with no effect.
    #[error("OS_ERR_901: Funding collaborator failed: {reason}")]
    FundingFailed { reason: String },
}

impl SettleError {
    /// Build a [`SettleError::MalformedInput`] from anything displayable.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Build a [`SettleError::StaleOrReplayedSequence`] from anything displayable.
    #[must_use]
    pub fn stale(reason: impl Into<String>) -> Self {
        Self::StaleOrReplayedSequence {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SettleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SettleError::UnregisteredParty(PartyId(9));
        let msg = format!("{err}");
        assert!(msg.starts_with("OS_ERR_100"), "Got: {msg}");
        assert!(msg.contains("party:9"));
    }

    #[test]
    fn excessive_withdrawal_display() {
        let err = SettleError::ExcessiveWithdrawalAmount {
            requested: 100,
            available: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_200"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn all_errors_have_os_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SettleError::PartyAlreadyRegistered(PartyId(1))),
            Box::new(SettleError::NoPendingWithdrawal(PartyId(2))),
            Box::new(SettleError::ExpiredReceipt {
                expires_by: 10,
                now: 20,
            }),
            Box::new(SettleError::stale("test")),
            Box::new(SettleError::DisputeWindowClosed {
                now: 5,
                fixed_after: 3,
            }),
            Box::new(SettleError::malformed("short buffer")),
            Box::new(SettleError::InvalidSignature),
            Box::new(SettleError::ArithmeticOverflow),
            Box::new(SettleError::FundingFailed {
                reason: "rail down".into(),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OS_ERR_"),
                "Error missing OS_ERR_ prefix: {msg}"
            );
        }
    }
}
