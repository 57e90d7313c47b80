pub mod keys;
pub mod ops;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meridian")]
#[command(about = "Meridian regulated ledger - operator CLI", long_about = None)]
pub struct Cli {
    /// Path to the ledger config file
    #[arg(long, default_value = "meridian.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sponsor key management
    Keys {
        #[command(subcommand)]
        cmd: keys::KeysCommands,
    },
    /// Legal-sponsor set management
    Sponsor {
        #[command(subcommand)]
        cmd: SponsorCommands,
    },
    /// Register a new account with an assigned sponsor
    Register {
        #[arg(long)]
        account: String,
        #[arg(long)]
        sponsor: String,
    },
    /// Reassign an account's sponsor
    SetSponsor {
        #[arg(long)]
        account: String,
        #[arg(long)]
        sponsor: String,
    },
    /// Issue new supply to an account
    Mint {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: u128,
    },
    /// Retire supply against an account balance
    Redeem {
        #[arg(long)]
        from: String,
        #[arg(long)]
        amount: u128,
    },
    /// Reduce total accounted supply without touching any account
    SupplyBurn {
        #[arg(long)]
        amount: u128,
    },
    Freeze {
        account: String,
    },
    Unfreeze {
        account: String,
    },
    /// Move funds from spendable to locked
    Seize {
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: u128,
    },
    /// Return seized funds to the spendable balance
    Release {
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: u128,
    },
    /// Owner-initiated transfer (no authorization)
    Transfer {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: u128,
    },
    /// Authorization-gated transfer; the signed authorization is read
    /// from a JSON file produced by the issuing service
    TransferAuthorized {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: u128,
        #[arg(long)]
        auth_file: String,
    },
    /// Show an account record
    Status {
        account: String,
    },
    Balance {
        account: String,
    },
    /// Dump every account record, one JSON object per line
    Accounts,
    /// Dump the audit trail
    Events,
}

#[derive(Subcommand)]
pub enum SponsorCommands {
    /// Admit a sponsor with its ed25519 public key (hex)
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        pubkey: String,
    },
    /// Expel a sponsor from the legal set
    Remove {
        id: String,
    },
    List,
}
