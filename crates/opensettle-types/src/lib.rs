//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle**
//! settlement ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PartyId`]
//! - **Key material**: [`PartyKey`], [`Party`]
//! - **Account model**: [`Account`], [`PendingWithdrawal`]
//! - **Relationship model**: [`RelationshipRecord`]
//! - **Receipt model**: [`Receipt`] and the canonical signing payloads
//! - **Configuration**: [`LedgerConfig`], [`VerifyStrategy`], [`ProofWidths`]
//! - **Errors**: [`SettleError`] with `OS_ERR_` prefix codes
//! - **Constants**: wire widths, payload prefixes, protocol defaults

pub mod account;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod keys;
pub mod receipt;
pub mod record;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{PartyId, Account, Receipt, SettleError, ...};

pub use account::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use keys::*;
pub use receipt::*;
pub use record::*;

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).
