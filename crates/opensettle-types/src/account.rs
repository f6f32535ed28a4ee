//! Per-party account state: balance, withdrawal lock, operation nonce.
//!
//! An account is owned exclusively by its party and mutated only by the
//! batch settlement processor, the dispute corrector, and the withdrawal
//! state machine. The balance is an unsigned 128-bit value and can never
//! go negative: debits beyond the available balance are clipped and the
//! shortfall is reported to the caller, which decides whether to slash.

use serde::{Deserialize, Serialize};

use crate::{Result, SettleError};

/// Ledger account for a single party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Current balance. Never negative; arithmetic is checked.
    pub balance: u128,
    /// Withdrawals may not be processed before this timestamp. Refreshed
    /// every time the party is the paying side of a settlement.
    pub withdraw_after: u32,
    /// Strictly increasing operation counter shared by `post` freshness
    /// proofs and withdrawal authorizations.
    pub nonce: u64,
}

impl Account {
    /// Add funds to the balance.
    ///
    /// # Errors
    /// [`SettleError::ArithmeticOverflow`] if the balance would exceed
    /// the 128-bit range.
    pub fn credit(&mut self, amount: u128) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(SettleError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Remove up to `amount` from the balance, clipping at zero.
    ///
    /// Returns the amount actually removed; the caller computes the
    /// shortfall (`amount - returned`) and triggers slashing when it is
    /// non-zero.
    pub fn debit_clipped(&mut self, amount: u128) -> u128 {
        let debited = self.balance.min(amount);
        self.balance -= debited;
        debited
    }

    /// Remove exactly `amount` from the balance.
    ///
    /// # Errors
    /// [`SettleError::ExcessiveWithdrawalAmount`] if the balance cannot
    /// cover the full amount; the balance is left unchanged.
    pub fn debit_exact(&mut self, amount: u128) -> Result<()> {
        if amount > self.balance {
            return Err(SettleError::ExcessiveWithdrawalAmount {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Extend the withdrawal lock. The lock is monotone: an earlier
    /// deadline never shortens a later one.
    pub fn lock_withdrawal(&mut self, until: u32) {
        self.withdraw_after = self.withdraw_after.max(until);
    }

    /// The nonce the next settling operation must prove freshness over.
    ///
    /// # Errors
    /// [`SettleError::ArithmeticOverflow`] if the counter is exhausted.
    pub fn next_nonce(&self) -> Result<u64> {
        self.nonce
            .checked_add(1)
            .ok_or(SettleError::ArithmeticOverflow)
    }
}

/// An initiated, not-yet-processed withdrawal. At most one per party;
/// re-initiating overwrites the previous entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWithdrawal {
    /// Amount requested at initiation time.
    pub amount: u128,
    /// Processing is allowed at or after this timestamp.
    pub valid_after: u32,
}
