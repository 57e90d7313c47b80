//! Command handlers operating on a locally opened ledger. This tool is the
//! administrative caller of the ledger core; the authorization-issuing
//! service and wallet live elsewhere and only meet it through signed
//! authorization files.

use super::SponsorCommands;
use crate::authorization::SignedAuthorization;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::storage::Storage;
use std::sync::Arc;

fn open_ledger(config_path: &str) -> Result<Ledger, LedgerError> {
    let config = LedgerConfig::load_or_default(config_path);
    let storage = Arc::new(Storage::open(&config.node.db_path)?);
    Ledger::open(config, storage)
}

fn with_ledger<F>(config_path: &str, f: F)
where
    F: FnOnce(&mut Ledger) -> Result<String, LedgerError>,
{
    let mut ledger = match open_ledger(config_path) {
        Ok(l) => l,
        Err(e) => {
            println!("Error opening ledger: {}", e);
            return;
        }
    };
    match f(&mut ledger).and_then(|msg| {
        ledger.flush()?;
        Ok(msg)
    }) {
        Ok(msg) => println!("{}", msg),
        Err(e) => println!("Error: {}", e),
    }
}

pub fn handle_sponsor_command(config_path: &str, cmd: SponsorCommands) {
    match cmd {
        SponsorCommands::Add { id, pubkey } => with_ledger(config_path, |ledger| {
            ledger.add_sponsor(id.clone(), pubkey)?;
            Ok(format!("Sponsor '{}' admitted to the legal set", id))
        }),
        SponsorCommands::Remove { id } => with_ledger(config_path, |ledger| {
            if ledger.remove_sponsor(&id)? {
                Ok(format!("Sponsor '{}' removed", id))
            } else {
                Ok(format!("Sponsor '{}' was not in the legal set", id))
            }
        }),
        SponsorCommands::List => with_ledger(config_path, |ledger| {
            let mut ids = ledger.sponsors().sponsor_ids();
            ids.sort();
            Ok(ids.join("\n"))
        }),
    }
}

pub fn handle_register_command(config_path: &str, account: String, sponsor: String) {
    with_ledger(config_path, |ledger| {
        ledger.register_account(account.clone(), sponsor.clone())?;
        Ok(format!("Registered '{}' with sponsor '{}'", account, sponsor))
    });
}

pub fn handle_set_sponsor_command(config_path: &str, account: String, sponsor: String) {
    with_ledger(config_path, |ledger| {
        ledger.set_sponsor(&account, sponsor.clone())?;
        Ok(format!("'{}' now sponsored by '{}'", account, sponsor))
    });
}

pub fn handle_mint_command(config_path: &str, to: String, amount: u128) {
    with_ledger(config_path, |ledger| {
        ledger.mint(&to, amount)?;
        Ok(format!(
            "Minted {} to '{}'. Total supply: {}",
            amount,
            to,
            ledger.total_supply()
        ))
    });
}

pub fn handle_redeem_command(config_path: &str, from: String, amount: u128) {
    with_ledger(config_path, |ledger| {
        ledger.redeem(&from, amount)?;
        Ok(format!(
            "Redeemed {} from '{}'. Total supply: {}",
            amount,
            from,
            ledger.total_supply()
        ))
    });
}

pub fn handle_supply_burn_command(config_path: &str, amount: u128) {
    with_ledger(config_path, |ledger| {
        ledger.supply_burn(amount)?;
        Ok(format!(
            "Burned {} from supply. Total supply: {}",
            amount,
            ledger.total_supply()
        ))
    });
}

pub fn handle_freeze_command(config_path: &str, account: String, freeze: bool) {
    with_ledger(config_path, |ledger| {
        let changed = if freeze {
            ledger.freeze(&account)?
        } else {
            ledger.unfreeze(&account)?
        };
        let verb = if freeze { "frozen" } else { "unfrozen" };
        if changed {
            Ok(format!("Account '{}' {}", account, verb))
        } else {
            Ok(format!("Account '{}' was already {}", account, verb))
        }
    });
}

pub fn handle_seize_command(config_path: &str, account: String, amount: u128) {
    with_ledger(config_path, |ledger| {
        ledger.seize(&account, amount)?;
        Ok(format!(
            "Seized {} from '{}' (locked: {})",
            amount,
            account,
            ledger.locked_balance_of(&account)?
        ))
    });
}

pub fn handle_release_command(config_path: &str, account: String, amount: u128) {
    with_ledger(config_path, |ledger| {
        ledger.release_locked_balance(&account, amount)?;
        Ok(format!(
            "Released {} to '{}' (locked: {})",
            amount,
            account,
            ledger.locked_balance_of(&account)?
        ))
    });
}

pub fn handle_transfer_command(config_path: &str, from: String, to: String, amount: u128) {
    with_ledger(config_path, |ledger| {
        ledger.transfer(&from, &to, amount)?;
        Ok(format!("Transferred {} from '{}' to '{}'", amount, from, to))
    });
}

pub fn handle_transfer_authorized_command(
    config_path: &str,
    from: String,
    to: String,
    amount: u128,
    auth_file: String,
) {
    let auth: SignedAuthorization = match std::fs::read_to_string(&auth_file)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(a) => a,
        Err(e) => {
            println!("Error reading authorization file '{}': {}", auth_file, e);
            return;
        }
    };

    with_ledger(config_path, |ledger| {
        ledger.transfer_with_authorization(&from, &to, amount, &auth)?;
        Ok(format!(
            "Transferred {} from '{}' to '{}' (nonce now {})",
            amount,
            from,
            to,
            ledger.nonce_of(&from)?
        ))
    });
}

pub fn handle_status_command(config_path: &str, account: String) {
    with_ledger(config_path, |ledger| {
        let status = serde_json::json!({
            "account": account,
            "registered": ledger.is_registered(&account),
            "balance": ledger.balance_of(&account)?.to_string(),
            "locked_balance": ledger.locked_balance_of(&account)?.to_string(),
            "nonce": ledger.nonce_of(&account)?,
            "frozen": ledger.is_frozen(&account)?,
            "sponsor": ledger.sponsor_of(&account)?,
        });
        serde_json::to_string_pretty(&status).map_err(|e| LedgerError::StorageError(e.to_string()))
    });
}

pub fn handle_balance_command(config_path: &str, account: String) {
    with_ledger(config_path, |ledger| {
        Ok(format!("{}", ledger.balance_of(&account)?))
    });
}

pub fn handle_accounts_command(config_path: &str) {
    with_ledger(config_path, |ledger| {
        let mut accounts = ledger.accounts();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        let mut lines = Vec::new();
        for account in accounts {
            lines.push(
                serde_json::to_string(account)
                    .map_err(|e| LedgerError::StorageError(e.to_string()))?,
            );
        }
        Ok(lines.join("\n"))
    });
}

pub fn handle_events_command(config_path: &str) {
    with_ledger(config_path, |ledger| {
        let mut lines = Vec::new();
        for event in ledger.audit_events() {
            lines.push(
                serde_json::to_string(event)
                    .map_err(|e| LedgerError::StorageError(e.to_string()))?,
            );
        }
        Ok(lines.join("\n"))
    });
}
