//! Sponsor registry: the set of identities legally empowered to sign
//! transfer authorizations, their verification keys, and the recipient
//! groups that group-scoped authorizations resolve against.
//!
//! Removing a sponsor does not cascade to accounts pointing at it. A
//! dangling assignment makes every future authorization for that account
//! fail at signature verification until reassigned (fail-closed).

use crate::account::{AccountId, SponsorId};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SponsorRegistry {
    /// Legal-sponsor set: sponsor id -> ed25519 public key (hex).
    sponsors: HashMap<SponsorId, String>,

    /// Recipient groups: tag -> member account ids.
    groups: HashMap<String, HashSet<AccountId>>,
}

impl SponsorRegistry {
    pub fn new() -> Self {
        Self {
            sponsors: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    /// Add an identity to the legal-sponsor set. Re-adding replaces the
    /// registered key (key rotation for an existing sponsor).
    pub fn add_sponsor(&mut self, id: SponsorId, pubkey_hex: String) {
        self.sponsors.insert(id, pubkey_hex);
    }

    /// Remove an identity from the legal-sponsor set. Returns whether the
    /// sponsor was present. Already-consumed authorizations are unaffected;
    /// future ones signed by this identity stop verifying.
    pub fn remove_sponsor(&mut self, id: &str) -> bool {
        self.sponsors.remove(id).is_some()
    }

    pub fn is_legal(&self, id: &str) -> bool {
        self.sponsors.contains_key(id)
    }

    /// Verification key of a sponsor, if it is currently legal.
    pub fn pubkey_of(&self, id: &str) -> Option<&str> {
        self.sponsors.get(id).map(|s| s.as_str())
    }

    pub fn sponsor_ids(&self) -> Vec<SponsorId> {
        self.sponsors.keys().cloned().collect()
    }

    /// Require `id` to be legal, for operations that assign it to accounts.
    pub fn require_legal(&self, id: &str) -> Result<(), LedgerError> {
        if self.is_legal(id) {
            Ok(())
        } else {
            Err(LedgerError::UnknownSponsor(id.to_string()))
        }
    }

    // --- Recipient groups ---

    pub fn add_group_member(&mut self, tag: &str, account: AccountId) {
        self.groups.entry(tag.to_string()).or_default().insert(account);
    }

    pub fn remove_group_member(&mut self, tag: &str, account: &str) -> bool {
        match self.groups.get_mut(tag) {
            Some(members) => members.remove(account),
            None => false,
        }
    }

    pub fn group_contains(&self, tag: &str, account: &str) -> bool {
        self.groups
            .get(tag)
            .map(|members| members.contains(account))
            .unwrap_or(false)
    }
}
