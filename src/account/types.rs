//! Account record definitions for the Meridian ledger

use serde::{Deserialize, Serialize};

/// Account identifier - human-readable name
pub type AccountId = String;

/// Sponsor identifier - the identity legally empowered to sign transfer
/// authorizations for accounts assigned to it
pub type SponsorId = String;

/// One ledger account per registered identity. Registration is represented
/// by presence in the [`AccountStore`](super::AccountStore) map; an absent
/// id *is* the unregistered state. Accounts are never deleted - freeze is
/// the terminal deactivation state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Account {
    pub id: AccountId,

    /// Spendable funds. Never negative (unsigned domain, checked arithmetic).
    pub balance: u128,

    /// Funds seized by admin action; excluded from spendable computations
    /// but still part of total accounted supply.
    pub locked_balance: u128,

    /// Strictly increasing; consumed exactly once per successful
    /// authorization-gated transfer from this account.
    pub nonce: u64,

    /// Weak reference into the sponsor registry. May dangle after sponsor
    /// removal, which fails all future authorizations closed until reassigned.
    pub sponsor: SponsorId,

    /// When true the account may not send; whether it may still receive is
    /// a ledger-level policy switch.
    pub is_frozen: bool,

    pub created_at: i64,
}

impl Account {
    pub fn new(id: AccountId, sponsor: SponsorId, created_at: i64) -> Self {
        Self {
            id,
            balance: 0,
            locked_balance: 0,
            nonce: 0,
            sponsor,
            is_frozen: false,
            created_at,
        }
    }

    /// Total funds attributable to this account, spendable or not.
    pub fn total_holdings(&self) -> u128 {
        // Both sides are bounded by total supply, which is itself checked
        // on mint, so this cannot overflow in a consistent ledger.
        self.balance + self.locked_balance
    }
}
