//! Transfer engine: the two value-movement paths.
//!
//! `transfer` is the owner-initiated path without third-party approval;
//! `transfer_with_authorization` is the primary regulated path, which runs
//! the stateless verifier and then applies debit, credit and nonce
//! consumption as one non-interleaved step. All checks precede all writes,
//! so a failure discovered after verification (insufficient balance) leaves
//! the nonce unadvanced and balances untouched.

use super::Ledger;
use crate::account::Account;
use crate::authorization::{self, SignedAuthorization};
use crate::error::LedgerError;
use crate::events::AuditKind;
use tracing::{info, warn};

impl Ledger {
    /// Owner-initiated transfer. Same registration and freeze gates as the
    /// regulated path, no authorization requirement.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        let staged = match self.stage_transfer(from, to, amount) {
            Ok(staged) => staged,
            Err(e) => {
                warn!("transfer {} -> {} rejected: {}", from, to, e);
                return Err(e);
            }
        };

        self.commit(
            staged,
            None,
            None,
            AuditKind::Transfer {
                from: from.to_string(),
                to: to.to_string(),
                amount,
                authorization: None,
            },
        )?;
        info!("transfer {} -> {} amount {}", from, to, amount);
        Ok(())
    }

    /// Authorization-gated transfer at the current wall-clock time.
    pub fn transfer_with_authorization(
        &mut self,
        from: &str,
        to: &str,
        amount: u128,
        auth: &SignedAuthorization,
    ) -> Result<(), LedgerError> {
        self.transfer_with_authorization_at(from, to, amount, auth, Self::now())
    }

    /// Authorization-gated transfer with an explicit verification instant.
    /// Expiration is a data check, not a scheduling concern; callers that
    /// replay or test supply their own clock.
    pub fn transfer_with_authorization_at(
        &mut self,
        from: &str,
        to: &str,
        amount: u128,
        auth: &SignedAuthorization,
        now: i64,
    ) -> Result<(), LedgerError> {
        let staged = match self.stage_authorized_transfer(from, to, amount, auth, now) {
            Ok(staged) => staged,
            Err(e) => {
                warn!("authorized transfer {} -> {} rejected: {}", from, to, e);
                return Err(e);
            }
        };

        self.commit(
            staged,
            None,
            None,
            AuditKind::Transfer {
                from: from.to_string(),
                to: to.to_string(),
                amount,
                authorization: Some(auth.clone()),
            },
        )?;
        info!(
            "authorized transfer {} -> {} amount {} nonce {}",
            from, to, amount, auth.nonce
        );
        Ok(())
    }

    fn stage_transfer(
        &self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<Vec<Account>, LedgerError> {
        self.transfer_gates(from, to)?;
        self.stage_movement(from, to, amount)
    }

    /// Verification plus the debit/credit/nonce staging. Verification and
    /// consumption are logically one transaction: nothing is committed
    /// until every check has passed, so a failure discovered here leaves
    /// the nonce unadvanced.
    fn stage_authorized_transfer(
        &self,
        from: &str,
        to: &str,
        amount: u128,
        auth: &SignedAuthorization,
        now: i64,
    ) -> Result<Vec<Account>, LedgerError> {
        self.transfer_gates(from, to)?;

        let sender = self.accounts.get(from)?;
        authorization::verify(
            auth,
            from,
            to,
            amount,
            sender.nonce,
            &sender.sponsor,
            &self.sponsors,
            now,
        )?;

        let mut staged = self.stage_movement(from, to, amount)?;
        // The sender record is always first in the staged set.
        staged[0].nonce += 1;
        Ok(staged)
    }

    /// Registration and freeze gates shared by both paths. A frozen sender
    /// is always blocked; a frozen recipient is blocked unless deployment
    /// policy allows frozen accounts to receive.
    fn transfer_gates(&self, from: &str, to: &str) -> Result<(), LedgerError> {
        let sender = self.accounts.get(from)?;
        let recipient = self.accounts.get(to)?;

        if sender.is_frozen {
            return Err(LedgerError::AccountFrozen(from.to_string()));
        }
        if recipient.is_frozen && !self.config.policy.frozen_accounts_can_receive {
            return Err(LedgerError::AccountFrozen(to.to_string()));
        }
        Ok(())
    }

    /// Stage the balance movement on cloned records, sender first. All
    /// checks happen here; the clones are only written back once the
    /// commit batch has been made durable.
    fn stage_movement(
        &self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<Vec<Account>, LedgerError> {
        let sender = self.accounts.get(from)?;
        if amount > sender.balance {
            return Err(LedgerError::InsufficientBalance);
        }
        let mut sender = sender.clone();

        if from == to {
            // Net no-op on balances; the authorized path still consumes
            // the nonce afterwards.
            return Ok(vec![sender]);
        }

        let mut recipient = self.accounts.get(to)?.clone();
        recipient.balance = recipient
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        sender.balance -= amount;
        Ok(vec![sender, recipient])
    }
}
