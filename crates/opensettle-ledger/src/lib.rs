//! # opensettle-ledger
//!
//! The OpenSettle settlement core: a strictly serialized ledger for
//! two-party off-chain payment channels.
//!
//! Pairs of registered parties exchange signed receipts off-chain, each
//! claiming a cumulative amount owed. This crate finalizes those claims:
//!
//! - [`SettlementLedger::post`] settles a batch of latest receipts,
//!   crediting the posting provider and debiting each counter-party,
//!   with slashing when a party overcommitted beyond its balance.
//! - [`SettlementLedger::correct_update`] replaces a settled amount with
//!   a fresher co-signed receipt while the dispute window is open.
//! - [`SettlementLedger::init_withdraw`] /
//!   [`SettlementLedger::process_withdrawal`] run the two-phase exit,
//!   buffered so disputes can land first.
//!
//! Every entry point is all-or-nothing: effects are staged against the
//! committed state and applied only after every validation passed.
//! External value transfer stays behind the [`FundingSource`] trait;
//! time stays behind [`Clock`].

pub mod clock;
pub mod dispute;
pub mod funding;
pub mod ledger;
pub mod post;
pub mod registry;
pub mod slashing;
pub mod state;
pub mod withdraw;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispute::CorrectionOutcome;
pub use funding::{ConfirmedTransfers, FundingSource};
pub use ledger::SettlementLedger;
pub use post::PostOutcome;
pub use registry::PartyRegistry;
pub use slashing::SecurityDeposits;
pub use state::LedgerState;
