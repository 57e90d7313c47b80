pub mod account;
pub mod authorization;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod events;
pub mod ledger;
pub mod sponsor;
pub mod storage;

pub use account::{Account, AccountId, SponsorId};
pub use authorization::{RecipientScope, SignedAuthorization};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use sponsor::SponsorRegistry;
