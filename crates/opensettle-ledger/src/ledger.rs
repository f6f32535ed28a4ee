//! The entry-point facade owning registry, state, verifier, and clock.

use opensettle_crypto::{AggregateVerifier, RecoveryVerifier, SignatureVerifier};
use opensettle_types::{
    Account, LedgerConfig, PartyId, PartyKey, PendingWithdrawal, RelationshipRecord, Result,
    VerifyStrategy,
};

use crate::clock::{Clock, SystemClock};
use crate::funding::FundingSource;
use crate::registry::PartyRegistry;
use crate::state::LedgerState;

/// One settlement ledger instance.
///
/// All entry points take `&mut self`: calls are strictly serialized and
/// each one either commits completely or leaves no trace.
pub struct SettlementLedger {
    pub(crate) config: LedgerConfig,
    pub(crate) registry: PartyRegistry,
    pub(crate) state: LedgerState,
    pub(crate) verifier: Box<dyn SignatureVerifier>,
    pub(crate) clock: Box<dyn Clock>,
}

impl SettlementLedger {
    /// Build a ledger on the system clock.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Build a ledger on an externally supplied clock.
    #[must_use]
    pub fn with_clock(config: LedgerConfig, clock: Box<dyn Clock>) -> Self {
        let verifier: Box<dyn SignatureVerifier> = match config.strategy {
            VerifyStrategy::Recovery => Box::new(RecoveryVerifier::new()),
            VerifyStrategy::Aggregate => {
                Box::new(AggregateVerifier::new(config.domain_tag.clone()))
            }
        };
        let registry = PartyRegistry::new(config.strategy);
        Self {
            config,
            registry,
            state: LedgerState::default(),
            verifier,
            clock,
        }
    }

    /// Register a party. Write-once; the key variant must match the
    /// configured verification strategy.
    ///
    /// # Errors
    /// `PartyAlreadyRegistered` on a repeated identity, `MalformedInput`
    /// on a key of the wrong variant.
    pub fn register(&mut self, id: PartyId, key: PartyKey) -> Result<()> {
        self.registry.register(id, key)?;
        tracing::info!(party = %id, key = %key, "Party registered");
        Ok(())
    }

    /// Credit a party's balance with an externally confirmed transfer.
    ///
    /// # Errors
    /// `UnregisteredParty`, `FundingFailed` from the collaborator, or
    /// `ArithmeticOverflow`; in every case the balance is unchanged.
    pub fn fund(&mut self, party: PartyId, source: &mut dyn FundingSource) -> Result<u128> {
        self.registry.key_of(party)?;
        let amount = source.confirm_transfer(party)?;
        let mut account = self.state.account_of(party);
        account.credit(amount)?;
        self.state.set_account(party, account);
        tracing::info!(party = %party, amount, "Balance funded");
        Ok(amount)
    }

    /// Add externally confirmed collateral to a party's security deposit.
    ///
    /// # Errors
    /// Same failure surface as [`Self::fund`].
    pub fn fund_deposit(&mut self, party: PartyId, source: &mut dyn FundingSource) -> Result<u128> {
        self.registry.key_of(party)?;
        let amount = source.confirm_transfer(party)?;
        self.state.deposits.fund(party, amount)?;
        tracing::info!(party = %party, amount, "Security deposit funded");
        Ok(amount)
    }

    // --- Read-only surface ---

    #[must_use]
    pub fn balance_of(&self, party: PartyId) -> u128 {
        self.state.account_of(party).balance
    }

    #[must_use]
    pub fn account_of(&self, party: PartyId) -> Account {
        self.state.account_of(party)
    }

    #[must_use]
    pub fn record_of(&self, payer: PartyId, payee: PartyId) -> RelationshipRecord {
        self.state.record_of(payer, payee)
    }

    #[must_use]
    pub fn pending_withdrawal_of(&self, party: PartyId) -> Option<PendingWithdrawal> {
        self.state.pending_withdrawal_of(party)
    }

    #[must_use]
    pub fn deposit_of(&self, party: PartyId) -> u128 {
        self.state.deposits.deposit_of(party)
    }

    #[must_use]
    pub fn slash_count_of(&self, party: PartyId) -> u32 {
        self.state.deposits.slash_count_of(party)
    }

    #[must_use]
    pub fn total_forfeited(&self) -> u128 {
        self.state.deposits.total_forfeited()
    }

    #[must_use]
    pub fn is_registered(&self, party: PartyId) -> bool {
        self.registry.is_registered(party)
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current ledger time in unix seconds.
    #[must_use]
    pub fn now(&self) -> u32 {
        self.clock.now()
    }
}
