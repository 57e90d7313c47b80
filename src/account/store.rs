//! Account storage and management
//!
//! Pure state: the store holds and hands out account records but applies
//! no transfer or admin logic itself. The ledger engine stages modified
//! copies of records, persists them, and writes them back with [`put`];
//! external callers never mutate balance/nonce/frozen/locked fields
//! directly.
//!
//! [`put`]: AccountStore::put

use super::types::{Account, AccountId};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Durable mapping of identity -> account record.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<AccountId, Account>,
}

impl AccountStore {
    /// Create a new empty account store
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Rebuild a store from previously persisted records.
    pub fn from_records(accounts: HashMap<AccountId, Account>) -> Self {
        Self { accounts }
    }

    pub fn get(&self, id: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::NotRegistered(id.to_string()))
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// Write a staged record back into the store, creating or replacing
    /// the entry. Only the ledger engine calls this, and only after the
    /// record has been made durable.
    pub(crate) fn put(&mut self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    /// Get all accounts
    pub fn all_accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut store = AccountStore::new();
        store.put(Account::new("alice".to_string(), "bank_a".to_string(), 0));

        let account = store.get("alice").unwrap();
        assert_eq!(account.id, "alice");
        assert_eq!(account.balance, 0);
        assert_eq!(account.locked_balance, 0);
        assert_eq!(account.nonce, 0);
        assert!(!account.is_frozen);
        assert!(store.is_registered("alice"));
    }

    #[test]
    fn test_put_replaces_existing_record() {
        let mut store = AccountStore::new();
        store.put(Account::new("alice".to_string(), "bank_a".to_string(), 0));

        let mut staged = store.get("alice").unwrap().clone();
        staged.balance = 50;
        staged.nonce = 1;
        store.put(staged);

        assert_eq!(store.get("alice").unwrap().balance, 50);
        assert_eq!(store.get("alice").unwrap().nonce, 1);
        assert_eq!(store.all_accounts().len(), 1);
    }

    #[test]
    fn test_get_unregistered_fails() {
        let store = AccountStore::new();
        assert_eq!(
            store.get("ghost").unwrap_err(),
            LedgerError::NotRegistered("ghost".to_string())
        );
        assert!(!store.is_registered("ghost"));
    }
}
