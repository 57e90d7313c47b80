//! Admin control module: the regulator's overrides.
//!
//! These operations bypass the authorization verifier entirely but still
//! require registered targets, and every one of them applies as a whole or
//! not at all. Authority over this surface is enforced by the caller
//! (operator tooling holds the ledger exclusively); the core models the
//! state machine, not admin identity.

use super::Ledger;
use crate::account::{Account, AccountId, SponsorId};
use crate::error::LedgerError;
use crate::events::AuditKind;
use crate::sponsor::SponsorRegistry;
use tracing::info;

impl Ledger {
    /// Create an account with zero balances and nonce 0, assigned to a
    /// legal sponsor.
    pub fn register_account(
        &mut self,
        id: AccountId,
        sponsor: SponsorId,
    ) -> Result<(), LedgerError> {
        self.sponsors.require_legal(&sponsor)?;
        if self.accounts.is_registered(&id) {
            return Err(LedgerError::AlreadyRegistered(id));
        }

        let account = Account::new(id.clone(), sponsor.clone(), Self::now());
        self.commit(
            vec![account],
            None,
            None,
            AuditKind::Register {
                account: id.clone(),
                sponsor,
            },
        )?;
        info!("registered account {}", id);
        Ok(())
    }

    /// Admit an identity to the legal-sponsor set with its verification key.
    pub fn add_sponsor(&mut self, id: SponsorId, pubkey_hex: String) -> Result<(), LedgerError> {
        let mut sponsors = self.sponsors.clone();
        sponsors.add_sponsor(id.clone(), pubkey_hex);

        self.commit(
            Vec::new(),
            None,
            Some(sponsors),
            AuditKind::SponsorAdded {
                sponsor: id.clone(),
            },
        )?;
        info!("sponsor {} added to legal set", id);
        Ok(())
    }

    /// Expel an identity from the legal-sponsor set. Accounts still
    /// pointing at it keep the dangling assignment and fail closed at
    /// verification until reassigned. Returns whether the sponsor was
    /// present.
    pub fn remove_sponsor(&mut self, id: &str) -> Result<bool, LedgerError> {
        let mut sponsors = self.sponsors.clone();
        if !sponsors.remove_sponsor(id) {
            return Ok(false);
        }

        self.commit(
            Vec::new(),
            None,
            Some(sponsors),
            AuditKind::SponsorRemoved {
                sponsor: id.to_string(),
            },
        )?;
        info!("sponsor {} removed from legal set", id);
        Ok(true)
    }

    /// Reassign an account's authorizer.
    pub fn set_sponsor(&mut self, id: &str, sponsor: SponsorId) -> Result<(), LedgerError> {
        self.sponsors.require_legal(&sponsor)?;
        let mut account = self.accounts.get(id)?.clone();
        account.sponsor = sponsor.clone();

        self.commit(
            vec![account],
            None,
            None,
            AuditKind::SponsorAssigned {
                account: id.to_string(),
                sponsor,
            },
        )?;
        Ok(())
    }

    /// Add an account to a named recipient group (for group-scoped
    /// authorizations). Registry config, not a ledger state change, so no
    /// audit event; still persisted before the in-memory swap.
    pub fn add_group_member(&mut self, tag: &str, account: AccountId) -> Result<(), LedgerError> {
        let mut sponsors = self.sponsors.clone();
        sponsors.add_group_member(tag, account);
        self.swap_sponsors(sponsors)
    }

    pub fn remove_group_member(&mut self, tag: &str, account: &str) -> Result<bool, LedgerError> {
        let mut sponsors = self.sponsors.clone();
        if !sponsors.remove_group_member(tag, account) {
            return Ok(false);
        }
        self.swap_sponsors(sponsors)?;
        Ok(true)
    }

    fn swap_sponsors(&mut self, sponsors: crate::sponsor::SponsorRegistry) -> Result<(), LedgerError> {
        if let Some(storage) = &self.storage {
            storage.save_sponsors(&sponsors)?;
        }
        self.sponsors = sponsors;
        Ok(())
    }

    /// Issue new supply to a registered account.
    pub fn mint(&mut self, to: &str, amount: u128) -> Result<(), LedgerError> {
        let mut account = self.accounts.get(to)?.clone();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.commit(
            vec![account],
            Some(new_supply),
            None,
            AuditKind::Mint {
                to: to.to_string(),
                amount,
            },
        )?;
        info!("minted {} to {}", amount, to);
        Ok(())
    }

    /// Retire supply against an account balance, modeling off-ledger
    /// settlement.
    pub fn redeem(&mut self, from: &str, amount: u128) -> Result<(), LedgerError> {
        let mut account = self.accounts.get(from)?.clone();
        if amount > account.balance {
            return Err(LedgerError::InsufficientBalance);
        }
        account.balance -= amount;
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientSupply)?;

        self.commit(
            vec![account],
            Some(new_supply),
            None,
            AuditKind::Redeem {
                from: from.to_string(),
                amount,
            },
        )?;
        info!("redeemed {} from {}", amount, from);
        Ok(())
    }

    /// Reduce total accounted supply without touching any account, for
    /// reconciling off-ledger destruction.
    pub fn supply_burn(&mut self, amount: u128) -> Result<(), LedgerError> {
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientSupply)?;

        self.commit(
            Vec::new(),
            Some(new_supply),
            None,
            AuditKind::SupplyBurn { amount },
        )?;
        info!("supply burn of {}", amount);
        Ok(())
    }

    /// Freeze an account. Idempotent: freezing a frozen account succeeds
    /// and returns `false` (no-op); `true` means the state changed.
    pub fn freeze(&mut self, id: &str) -> Result<bool, LedgerError> {
        let mut account = self.accounts.get(id)?.clone();
        if account.is_frozen {
            return Ok(false);
        }
        account.is_frozen = true;

        self.commit(
            vec![account],
            None,
            None,
            AuditKind::Freeze {
                account: id.to_string(),
            },
        )?;
        info!("froze account {}", id);
        Ok(true)
    }

    /// Unfreeze an account; same no-op reporting as [`Ledger::freeze`].
    pub fn unfreeze(&mut self, id: &str) -> Result<bool, LedgerError> {
        let mut account = self.accounts.get(id)?.clone();
        if !account.is_frozen {
            return Ok(false);
        }
        account.is_frozen = false;

        self.commit(
            vec![account],
            None,
            None,
            AuditKind::Unfreeze {
                account: id.to_string(),
            },
        )?;
        info!("unfroze account {}", id);
        Ok(true)
    }

    /// Move funds from spendable to locked. Seized funds remain in total
    /// supply but are unspendable by the account.
    pub fn seize(&mut self, id: &str, amount: u128) -> Result<(), LedgerError> {
        let mut account = self.accounts.get(id)?.clone();
        if amount > account.balance {
            return Err(LedgerError::InsufficientBalance);
        }
        account.locked_balance = account
            .locked_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        account.balance -= amount;

        self.commit(
            vec![account],
            None,
            None,
            AuditKind::Seize {
                account: id.to_string(),
                amount,
            },
        )?;
        info!("seized {} from {}", amount, id);
        Ok(())
    }

    /// Return seized funds to the spendable balance.
    pub fn release_locked_balance(&mut self, id: &str, amount: u128) -> Result<(), LedgerError> {
        let mut account = self.accounts.get(id)?.clone();
        if amount > account.locked_balance {
            return Err(LedgerError::InsufficientLockedBalance);
        }
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        account.locked_balance -= amount;

        self.commit(
            vec![account],
            None,
            None,
            AuditKind::Release {
                account: id.to_string(),
                amount,
            },
        )?;
        info!("released {} to {}", amount, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::crypto::KeyPair;

    fn ledger_with_alice() -> Ledger {
        let mut ledger = Ledger::new(LedgerConfig::default());
        let kp = KeyPair::new();
        ledger
            .add_sponsor("bank_a".to_string(), kp.public_key_hex())
            .unwrap();
        ledger
            .register_account("alice".to_string(), "bank_a".to_string())
            .unwrap();
        ledger
    }

    #[test]
    fn test_register_requires_legal_sponsor() {
        let mut ledger = Ledger::new(LedgerConfig::default());
        let err = ledger
            .register_account("alice".to_string(), "nobody".to_string())
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownSponsor("nobody".to_string()));
        assert!(!ledger.is_registered("alice"));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut ledger = ledger_with_alice();
        let err = ledger
            .register_account("alice".to_string(), "bank_a".to_string())
            .unwrap_err();
        assert_eq!(err, LedgerError::AlreadyRegistered("alice".to_string()));
    }

    #[test]
    fn test_set_sponsor_requires_legal_sponsor() {
        let mut ledger = ledger_with_alice();
        let err = ledger
            .set_sponsor("alice", "nobody".to_string())
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownSponsor("nobody".to_string()));
        assert_eq!(ledger.sponsor_of("alice").unwrap(), "bank_a");

        let kp = KeyPair::new();
        ledger
            .add_sponsor("bank_b".to_string(), kp.public_key_hex())
            .unwrap();
        ledger.set_sponsor("alice", "bank_b".to_string()).unwrap();
        assert_eq!(ledger.sponsor_of("alice").unwrap(), "bank_b");
    }

    #[test]
    fn test_mint_and_redeem_track_supply() {
        let mut ledger = ledger_with_alice();
        ledger.mint("alice", 100).unwrap();
        assert_eq!(ledger.balance_of("alice").unwrap(), 100);
        assert_eq!(ledger.total_supply(), 100);

        ledger.redeem("alice", 40).unwrap();
        assert_eq!(ledger.balance_of("alice").unwrap(), 60);
        assert_eq!(ledger.total_supply(), 60);

        assert_eq!(
            ledger.redeem("alice", 61).unwrap_err(),
            LedgerError::InsufficientBalance
        );
    }

    #[test]
    fn test_mint_to_unregistered_fails() {
        let mut ledger = ledger_with_alice();
        assert_eq!(
            ledger.mint("ghost", 1).unwrap_err(),
            LedgerError::NotRegistered("ghost".to_string())
        );
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_supply_burn_never_goes_negative() {
        let mut ledger = ledger_with_alice();
        ledger.mint("alice", 100).unwrap();

        ledger.supply_burn(30).unwrap();
        assert_eq!(ledger.total_supply(), 70);
        // No account was touched.
        assert_eq!(ledger.balance_of("alice").unwrap(), 100);

        assert_eq!(
            ledger.supply_burn(71).unwrap_err(),
            LedgerError::InsufficientSupply
        );
        assert_eq!(ledger.total_supply(), 70);
    }

    #[test]
    fn test_freeze_unfreeze_idempotent() {
        let mut ledger = ledger_with_alice();

        assert!(ledger.freeze("alice").unwrap());
        assert!(!ledger.freeze("alice").unwrap());
        assert!(ledger.is_frozen("alice").unwrap());

        assert!(ledger.unfreeze("alice").unwrap());
        assert!(!ledger.unfreeze("alice").unwrap());
        assert!(!ledger.is_frozen("alice").unwrap());

        // No-op repeats leave no extra audit entries.
        let freezes = ledger
            .audit_events()
            .iter()
            .filter(|e| matches!(e.kind, AuditKind::Freeze { .. }))
            .count();
        assert_eq!(freezes, 1);
    }

    #[test]
    fn test_seize_release_roundtrip() {
        let mut ledger = ledger_with_alice();
        ledger.mint("alice", 70).unwrap();

        ledger.seize("alice", 30).unwrap();
        assert_eq!(ledger.balance_of("alice").unwrap(), 40);
        assert_eq!(ledger.locked_balance_of("alice").unwrap(), 30);
        // Seized funds stay in total supply.
        assert_eq!(ledger.total_supply(), 70);

        ledger.release_locked_balance("alice", 30).unwrap();
        assert_eq!(ledger.balance_of("alice").unwrap(), 70);
        assert_eq!(ledger.locked_balance_of("alice").unwrap(), 0);
    }

    #[test]
    fn test_seize_beyond_balance_leaves_state_unchanged() {
        let mut ledger = ledger_with_alice();
        ledger.mint("alice", 70).unwrap();

        let err = ledger.seize("alice", 1_000).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientBalance);
        assert_eq!(ledger.balance_of("alice").unwrap(), 70);
        assert_eq!(ledger.locked_balance_of("alice").unwrap(), 0);
    }

    #[test]
    fn test_release_beyond_locked_fails() {
        let mut ledger = ledger_with_alice();
        ledger.mint("alice", 70).unwrap();
        ledger.seize("alice", 20).unwrap();

        let err = ledger.release_locked_balance("alice", 21).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientLockedBalance);
        assert_eq!(ledger.locked_balance_of("alice").unwrap(), 20);
    }

    #[test]
    fn test_seized_funds_are_unspendable() {
        let mut ledger = ledger_with_alice();
        let kp = KeyPair::new();
        ledger
            .add_sponsor("bank_b".to_string(), kp.public_key_hex())
            .unwrap();
        ledger
            .register_account("bob".to_string(), "bank_b".to_string())
            .unwrap();
        ledger.mint("alice", 100).unwrap();
        ledger.seize("alice", 80).unwrap();

        // Only the 20 spendable units can move.
        assert_eq!(
            ledger.transfer("alice", "bob", 21).unwrap_err(),
            LedgerError::InsufficientBalance
        );
        ledger.transfer("alice", "bob", 20).unwrap();
    }

    #[test]
    fn test_admin_ops_require_registered_target() {
        let mut ledger = ledger_with_alice();
        let ghost_err = LedgerError::NotRegistered("ghost".to_string());

        assert_eq!(ledger.freeze("ghost").unwrap_err(), ghost_err);
        assert_eq!(ledger.unfreeze("ghost").unwrap_err(), ghost_err);
        assert_eq!(ledger.seize("ghost", 1).unwrap_err(), ghost_err);
        assert_eq!(
            ledger.release_locked_balance("ghost", 1).unwrap_err(),
            ghost_err
        );
        assert_eq!(ledger.redeem("ghost", 1).unwrap_err(), ghost_err);
    }
}
