//! Write-once party registry.
//!
//! A party registers a stable numeric identity and one piece of key
//! material, whose variant must match the ledger's configured
//! verification strategy. Neither can ever be changed afterwards.

use std::collections::HashMap;

use opensettle_types::{Party, PartyId, PartyKey, Result, SettleError, VerifyStrategy};

/// Registry of parties known to one ledger instance.
#[derive(Debug)]
pub struct PartyRegistry {
    strategy: VerifyStrategy,
    parties: HashMap<PartyId, Party>,
}

impl PartyRegistry {
    #[must_use]
    pub fn new(strategy: VerifyStrategy) -> Self {
        Self {
            strategy,
            parties: HashMap::new(),
        }
    }

    /// Register `id` with its key material.
    ///
    /// # Errors
    /// [`SettleError::PartyAlreadyRegistered`] on a repeated identity;
    /// [`SettleError::MalformedInput`] when the key variant does not
    /// belong to the configured strategy.
    pub fn register(&mut self, id: PartyId, key: PartyKey) -> Result<()> {
        if !key.matches(self.strategy) {
            return Err(SettleError::malformed(format!(
                "key {key} does not match the {} strategy",
                self.strategy
            )));
        }
        if self.parties.contains_key(&id) {
            return Err(SettleError::PartyAlreadyRegistered(id));
        }
        self.parties.insert(id, Party { id, key });
        Ok(())
    }

    /// Resolve the registered key of `id`.
    ///
    /// # Errors
    /// [`SettleError::UnregisteredParty`] when absent.
    pub fn key_of(&self, id: PartyId) -> Result<&PartyKey> {
        self.parties
            .get(&id)
            .map(|party| &party.key)
            .ok_or(SettleError::UnregisteredParty(id))
    }

    #[must_use]
    pub fn is_registered(&self, id: PartyId) -> bool {
        self.parties.contains_key(&id)
    }
}
