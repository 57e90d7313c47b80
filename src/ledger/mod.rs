//! The ledger aggregate: account store, sponsor registry, supply counter,
//! policy config and audit log behind one owner.
//!
//! Every operation takes `&mut self`, so read-verify-write is atomic per
//! call by construction; share a ledger across threads behind a mutex.
//! Submodules split the two mutation surfaces: `transfer` for the
//! value-movement paths, `admin` for the regulatory overrides.

pub mod admin;
pub mod transfer;

use crate::account::{Account, AccountStore, SponsorId};
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::events::{AuditEvent, AuditKind, AuditLog};
use crate::sponsor::SponsorRegistry;
use crate::storage::Storage;
use chrono::Utc;
use std::sync::Arc;

pub struct Ledger {
    accounts: AccountStore,
    sponsors: SponsorRegistry,
    total_supply: u128,
    config: LedgerConfig,
    audit: AuditLog,
    storage: Option<Arc<Storage>>,
}

impl Ledger {
    /// In-memory ledger, no persistence. Fixture path for tests and tooling.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            accounts: AccountStore::new(),
            sponsors: SponsorRegistry::new(),
            total_supply: 0,
            config,
            audit: AuditLog::new(),
            storage: None,
        }
    }

    /// Reopen a ledger from its write-through store.
    pub fn open(config: LedgerConfig, storage: Arc<Storage>) -> Result<Self, LedgerError> {
        let accounts = AccountStore::from_records(storage.load_accounts()?);
        let sponsors = storage.load_sponsors()?.unwrap_or_default();
        let total_supply = storage.load_supply()?;
        let audit = AuditLog::from_events(storage.load_events()?);

        Ok(Self {
            accounts,
            sponsors,
            total_supply,
            config,
            audit,
            storage: Some(storage),
        })
    }

    pub(crate) fn now() -> i64 {
        Utc::now().timestamp()
    }

    // --- Read-only queries ---

    pub fn balance_of(&self, id: &str) -> Result<u128, LedgerError> {
        Ok(self.accounts.get(id)?.balance)
    }

    pub fn locked_balance_of(&self, id: &str) -> Result<u128, LedgerError> {
        Ok(self.accounts.get(id)?.locked_balance)
    }

    pub fn nonce_of(&self, id: &str) -> Result<u64, LedgerError> {
        Ok(self.accounts.get(id)?.nonce)
    }

    pub fn is_frozen(&self, id: &str) -> Result<bool, LedgerError> {
        Ok(self.accounts.get(id)?.is_frozen)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.accounts.is_registered(id)
    }

    pub fn sponsor_of(&self, id: &str) -> Result<SponsorId, LedgerError> {
        Ok(self.accounts.get(id)?.sponsor.clone())
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn sponsors(&self) -> &SponsorRegistry {
        &self.sponsors
    }

    pub fn audit_events(&self) -> &[AuditEvent] {
        self.audit.events()
    }

    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.all_accounts()
    }

    /// Block until all committed operations are durable on disk.
    pub fn flush(&self) -> Result<(), LedgerError> {
        if let Some(storage) = &self.storage {
            storage.flush()?;
        }
        Ok(())
    }

    // --- Commit ---

    /// Apply one fully checked operation: persist the staged account
    /// records, supply, registry and audit event as a single atomic batch,
    /// then fold them into memory. Persistence happens first, so a storage
    /// failure rejects the call with every state - durable and in-memory -
    /// unchanged; the in-memory writes after a successful batch cannot
    /// fail.
    pub(crate) fn commit(
        &mut self,
        accounts: Vec<Account>,
        supply: Option<u128>,
        sponsors: Option<SponsorRegistry>,
        kind: AuditKind,
    ) -> Result<(), LedgerError> {
        let event = self.audit.stage(kind, Self::now());
        if let Some(storage) = &self.storage {
            storage.commit_op(&accounts, supply, sponsors.as_ref(), &event)?;
        }

        for account in accounts {
            self.accounts.put(account);
        }
        if let Some(supply) = supply {
            self.total_supply = supply;
        }
        if let Some(sponsors) = sponsors {
            self.sponsors = sponsors;
        }
        self.audit.append(event);
        Ok(())
    }
}
