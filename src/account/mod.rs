//! Account System Module for the Meridian ledger
//!
//! This module implements the account-based state model with:
//! - Human-readable account identifiers
//! - Per-account sponsor assignment
//! - Spendable vs. seized (locked) balance tracking
//! - Replay-guarding authorization nonces

pub mod store;
pub mod types;

pub use store::AccountStore;
pub use types::{Account, AccountId, SponsorId};
