//! Pairwise ECDSA recovery strategy.
//!
//! Each signed payload carries an independent 65-byte recoverable
//! signature: the 64-byte compact ECDSA form followed by one recovery id
//! byte. Verification recovers the signer's public key from the
//! signature over the SHA-256 digest of the payload and requires it to
//! equal the registered key — there is no separate "verify" step, which
//! is what binds the wire identity to the key material.
//!
//! A batch entry carries two such signatures back to back: the payer's,
//! then the payee's.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use sha2::{Digest, Sha256};

use opensettle_types::{constants, PartyKey, Result, SettleError, VerifyStrategy};

use crate::verifier::{ReceiptClaim, SignatureVerifier};

/// Verifier for the pairwise recovery strategy.
pub struct RecoveryVerifier {
    secp: Secp256k1<All>,
}

impl RecoveryVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Recover the signer of `signature` over `payload` and require it
    /// to be `expected`.
    fn recover_check(&self, payload: &[u8], signature: &[u8], expected: &[u8; 33]) -> Result<()> {
        if signature.len() != constants::RECOVERY_SIG_WIDTH {
            return Err(SettleError::InvalidSignature);
        }
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let message = Message::from_digest(digest);
        let rec_id = RecoveryId::from_i32(i32::from(signature[64]))
            .map_err(|_| SettleError::InvalidSignature)?;
        let sig = RecoverableSignature::from_compact(&signature[..64], rec_id)
            .map_err(|_| SettleError::InvalidSignature)?;
        let recovered = self
            .secp
            .recover_ecdsa(&message, &sig)
            .map_err(|_| SettleError::InvalidSignature)?;
        if recovered.serialize() == *expected {
            Ok(())
        } else {
            Err(SettleError::InvalidSignature)
        }
    }
}

impl Default for RecoveryVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier for RecoveryVerifier {
    fn strategy(&self) -> VerifyStrategy {
        VerifyStrategy::Recovery
    }

    fn verify_batch(&self, batch_proof: &[u8], claims: &[ReceiptClaim<'_>]) -> Result<()> {
        if !batch_proof.is_empty() {
            return Err(SettleError::malformed(
                "recovery strategy carries no batch-level proof",
            ));
        }
        for claim in claims {
            if claim.proof.len() != 2 * constants::RECOVERY_SIG_WIDTH {
                return Err(SettleError::InvalidSignature);
            }
            let (payer_sig, payee_sig) = claim.proof.split_at(constants::RECOVERY_SIG_WIDTH);
            self.verify_single(&claim.payload, payer_sig, claim.payer)?;
            self.verify_single(&claim.payload, payee_sig, claim.payee)?;
        }
        Ok(())
    }

    fn verify_single(&self, payload: &[u8], signature: &[u8], signer: &PartyKey) -> Result<()> {
        match signer {
            PartyKey::Recovery(expected) => self.recover_check(payload, signature, expected),
            PartyKey::Aggregate(_) => Err(SettleError::InvalidSignature),
        }
    }
}

#[cfg(test)]
mod tests {
    use opensettle_types::{post_nonce_payload, PartyId};

    use super::*;
    use crate::testkit::RecoverySigner;

    #[test]
    fn valid_signature_recovers() {
        let signer = RecoverySigner::from_seed(1);
        let verifier = RecoveryVerifier::new();
        let payload = post_nonce_payload(PartyId(1), 1);
        let sig = signer.sign(&payload);
        verifier
            .verify_single(&payload, &sig, &signer.party_key())
            .unwrap();
    }

    #[test]
    fn wrong_payload_rejected() {
        let signer = RecoverySigner::from_seed(1);
        let verifier = RecoveryVerifier::new();
        let sig = signer.sign(b"signed payload");
        let err = verifier
            .verify_single(b"other payload", &sig, &signer.party_key())
            .unwrap_err();
        assert!(matches!(err, SettleError::InvalidSignature));
    }

    #[test]
    fn wrong_signer_rejected() {
        let signer = RecoverySigner::from_seed(1);
        let other = RecoverySigner::from_seed(2);
        let verifier = RecoveryVerifier::new();
        let sig = signer.sign(b"payload");
        let err = verifier
            .verify_single(b"payload", &sig, &other.party_key())
            .unwrap_err();
        assert!(matches!(err, SettleError::InvalidSignature));
    }

    #[test]
    fn truncated_signature_rejected() {
        let signer = RecoverySigner::from_seed(1);
        let verifier = RecoveryVerifier::new();
        let mut sig = signer.sign(b"payload");
        sig.pop();
        let err = verifier
            .verify_single(b"payload", &sig, &signer.party_key())
            .unwrap_err();
        assert!(matches!(err, SettleError::InvalidSignature));
    }

    #[test]
    fn aggregate_key_rejected_under_recovery() {
        let verifier = RecoveryVerifier::new();
        let key = PartyKey::Aggregate([0u8; 48]);
        let err = verifier.verify_single(b"p", &[0u8; 65], &key).unwrap_err();
        assert!(matches!(err, SettleError::InvalidSignature));
    }

    #[test]
    fn batch_of_two_signers_verifies() {
        let payer = RecoverySigner::from_seed(3);
        let payee = RecoverySigner::from_seed(4);
        let verifier = RecoveryVerifier::new();
        let payer_key = payer.party_key();
        let payee_key = payee.party_key();

        let payload = b"receipt payload".to_vec();
        let mut proof = payer.sign(&payload);
        proof.extend_from_slice(&payee.sign(&payload));

        let claims = [ReceiptClaim {
            payload,
            payer: &payer_key,
            payee: &payee_key,
            proof: &proof,
        }];
        verifier.verify_batch(&[], &claims).unwrap();
    }

    #[test]
    fn batch_fails_if_one_signature_missing() {
        let payer = RecoverySigner::from_seed(3);
        let payee = RecoverySigner::from_seed(4);
        let verifier = RecoveryVerifier::new();
        let payer_key = payer.party_key();
        let payee_key = payee.party_key();

        let payload = b"receipt payload".to_vec();
        // Payer's signature doubled; payee never signed.
        let mut proof = payer.sign(&payload);
        proof.extend_from_slice(&payer.sign(&payload));

        let claims = [ReceiptClaim {
            payload,
            payer: &payer_key,
            payee: &payee_key,
            proof: &proof,
        }];
        let err = verifier.verify_batch(&[], &claims).unwrap_err();
        assert!(matches!(err, SettleError::InvalidSignature));
    }

    #[test]
    fn unexpected_batch_proof_rejected() {
        let verifier = RecoveryVerifier::new();
        let err = verifier.verify_batch(&[0u8; 96], &[]).unwrap_err();
        assert!(matches!(err, SettleError::MalformedInput { .. }));
    }
}
