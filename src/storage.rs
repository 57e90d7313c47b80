//! Sled-backed persistence for ledger state.
//!
//! The in-memory ledger is authoritative; storage is write-through and
//! only read back when a ledger is reopened. Values are bincode blobs
//! under string keys: `account:<id>`, `sponsors`, `meta:supply`,
//! `event:<seq>`. One ledger operation becomes one sled batch, so a
//! reopened store never exposes a half-applied operation.

use crate::account::{Account, AccountId};
use crate::error::LedgerError;
use crate::events::AuditEvent;
use crate::sponsor::SponsorRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

pub struct Storage {
    db: sled::Db,
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    bincode::serialize(value).map_err(|e| LedgerError::StorageError(e.to_string()))
}

impl Storage {
    pub fn open(path: &str) -> Result<Self, LedgerError> {
        let db = sled::open(path).map_err(|e| LedgerError::StorageError(e.to_string()))?;
        Ok(Storage { db })
    }

    // Generic Helper: Put
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), LedgerError> {
        self.db
            .insert(key.as_bytes(), encode(value)?)
            .map_err(|e| LedgerError::StorageError(e.to_string()))?;
        Ok(())
    }

    // Generic Helper: Get
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LedgerError> {
        match self.db.get(key.as_bytes()) {
            Ok(Some(data)) => {
                let deserialized = bincode::deserialize(&data)
                    .map_err(|e| LedgerError::StorageError(e.to_string()))?;
                Ok(Some(deserialized))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(LedgerError::StorageError(e.to_string())),
        }
    }

    pub fn flush(&self) -> Result<(), LedgerError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| LedgerError::StorageError(e.to_string()))
    }

    /// Persist the outcome of one ledger operation as a single atomic
    /// batch: the touched account records, the new supply (when the
    /// operation changed it), the sponsor registry (likewise) and the
    /// audit event describing it. Either the whole operation becomes
    /// durable or none of it does.
    pub fn commit_op(
        &self,
        accounts: &[Account],
        supply: Option<u128>,
        sponsors: Option<&SponsorRegistry>,
        event: &AuditEvent,
    ) -> Result<(), LedgerError> {
        let mut batch = sled::Batch::default();
        for account in accounts {
            batch.insert(
                format!("account:{}", account.id).into_bytes(),
                encode(account)?,
            );
        }
        if let Some(supply) = supply {
            batch.insert(&b"meta:supply"[..], encode(&supply)?);
        }
        if let Some(sponsors) = sponsors {
            batch.insert(&b"sponsors"[..], encode(sponsors)?);
        }
        // Zero-padded so sled iterates events in sequence order
        batch.insert(format!("event:{:016}", event.seq).into_bytes(), encode(event)?);

        self.db
            .apply_batch(batch)
            .map_err(|e| LedgerError::StorageError(e.to_string()))
    }

    // --- Specific Accessors ---

    pub fn save_sponsors(&self, registry: &SponsorRegistry) -> Result<(), LedgerError> {
        self.put("sponsors", registry)
    }

    pub fn load_accounts(&self) -> Result<HashMap<AccountId, Account>, LedgerError> {
        let mut accounts = HashMap::new();
        for entry in self.db.scan_prefix(b"account:") {
            let (_, value) = entry.map_err(|e| LedgerError::StorageError(e.to_string()))?;
            let account: Account = bincode::deserialize(&value)
                .map_err(|e| LedgerError::StorageError(e.to_string()))?;
            accounts.insert(account.id.clone(), account);
        }
        Ok(accounts)
    }

    pub fn load_sponsors(&self) -> Result<Option<SponsorRegistry>, LedgerError> {
        self.get("sponsors")
    }

    pub fn load_supply(&self) -> Result<u128, LedgerError> {
        Ok(self.get("meta:supply")?.unwrap_or(0))
    }

    pub fn load_events(&self) -> Result<Vec<AuditEvent>, LedgerError> {
        let mut events = Vec::new();
        for entry in self.db.scan_prefix(b"event:") {
            let (_, value) = entry.map_err(|e| LedgerError::StorageError(e.to_string()))?;
            let event: AuditEvent = bincode::deserialize(&value)
                .map_err(|e| LedgerError::StorageError(e.to_string()))?;
            events.push(event);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AuditKind, AuditLog};

    fn temp_storage(name: &str) -> Storage {
        let path = std::env::temp_dir().join(format!("meridian_storage_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&path);
        Storage::open(path.to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_commit_op_roundtrip() {
        let storage = temp_storage("commit");
        let mut log = AuditLog::new();

        let mut alice = Account::new("alice".to_string(), "bank_a".to_string(), 42);
        alice.balance = 100;
        let event = log.stage(
            AuditKind::Mint {
                to: "alice".to_string(),
                amount: 100,
            },
            0,
        );
        let mut sponsors = SponsorRegistry::new();
        sponsors.add_sponsor("bank_a".to_string(), "aa11".to_string());

        storage
            .commit_op(&[alice.clone()], Some(100), Some(&sponsors), &event)
            .unwrap();

        // Every piece of the operation is durable together.
        let accounts = storage.load_accounts().unwrap();
        assert_eq!(accounts["alice"], alice);
        assert_eq!(storage.load_supply().unwrap(), 100);
        assert!(storage.load_sponsors().unwrap().unwrap().is_legal("bank_a"));
        assert_eq!(storage.load_events().unwrap(), vec![event]);
    }

    #[test]
    fn test_commit_op_two_accounts() {
        let storage = temp_storage("transfer");
        let log = AuditLog::new();

        let mut alice = Account::new("alice".to_string(), "bank_a".to_string(), 0);
        alice.balance = 70;
        let mut bob = Account::new("bob".to_string(), "bank_a".to_string(), 0);
        bob.balance = 30;
        let event = log.stage(
            AuditKind::Transfer {
                from: "alice".to_string(),
                to: "bob".to_string(),
                amount: 30,
                authorization: None,
            },
            0,
        );

        storage
            .commit_op(&[alice, bob], None, None, &event)
            .unwrap();

        let accounts = storage.load_accounts().unwrap();
        assert_eq!(accounts["alice"].balance, 70);
        assert_eq!(accounts["bob"].balance, 30);
        assert_eq!(storage.load_events().unwrap().len(), 1);
    }

    #[test]
    fn test_supply_defaults_to_zero() {
        let storage = temp_storage("supply");
        assert_eq!(storage.load_supply().unwrap(), 0);
    }

    #[test]
    fn test_events_reload_in_sequence_order() {
        let storage = temp_storage("events");
        let mut log = AuditLog::new();
        for i in 0..20u128 {
            let event = log
                .record(
                    AuditKind::Mint {
                        to: "alice".to_string(),
                        amount: i,
                    },
                    0,
                )
                .clone();
            storage.commit_op(&[], None, None, &event).unwrap();
        }

        let loaded = storage.load_events().unwrap();
        assert_eq!(loaded.len(), 20);
        for (i, event) in loaded.iter().enumerate() {
            assert_eq!(event.seq, i as u64);
        }
    }
}
