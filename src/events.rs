//! Audit trail: the durable, externally observable log of applied ledger
//! operations. Only operations that actually mutated state produce events;
//! rejected calls leave the log untouched.

use crate::account::{AccountId, SponsorId};
use crate::authorization::SignedAuthorization;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened. Field sets match the producing operation exactly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum AuditKind {
    Register {
        account: AccountId,
        sponsor: SponsorId,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: u128,
        /// Present on the authorization-gated path: the consumed payload,
        /// recorded verbatim for the external audit trail.
        authorization: Option<SignedAuthorization>,
    },
    Mint {
        to: AccountId,
        amount: u128,
    },
    Redeem {
        from: AccountId,
        amount: u128,
    },
    SupplyBurn {
        amount: u128,
    },
    Freeze {
        account: AccountId,
    },
    Unfreeze {
        account: AccountId,
    },
    Seize {
        account: AccountId,
        amount: u128,
    },
    Release {
        account: AccountId,
        amount: u128,
    },
    SponsorAdded {
        sponsor: SponsorId,
    },
    SponsorRemoved {
        sponsor: SponsorId,
    },
    SponsorAssigned {
        account: AccountId,
        sponsor: SponsorId,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuditEvent {
    pub id: String,
    pub seq: u64,
    pub timestamp: i64,
    pub kind: AuditKind,
}

/// Append-only in-memory event log. The ledger write-through persists each
/// appended event; reopening replays them back in sequence order.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn from_events(events: Vec<AuditEvent>) -> Self {
        Self { events }
    }

    /// Build the next event without appending it. The ledger persists the
    /// staged event atomically with the state it describes and appends it
    /// only once the durable write has succeeded.
    pub fn stage(&self, kind: AuditKind, timestamp: i64) -> AuditEvent {
        AuditEvent {
            id: Uuid::new_v4().to_string(),
            seq: self.events.len() as u64,
            timestamp,
            kind,
        }
    }

    pub fn append(&mut self, event: AuditEvent) {
        self.events.push(event);
    }

    pub fn record(&mut self, kind: AuditKind, timestamp: i64) -> &AuditEvent {
        let event = self.stage(kind, timestamp);
        self.append(event);
        self.events.last().expect("just pushed")
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
