use clap::Parser;
use meridian_ledger::cli::{keys, ops, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    match cli.command {
        Commands::Keys { cmd } => keys::handle_keys_command(cmd),
        Commands::Sponsor { cmd } => ops::handle_sponsor_command(&config, cmd),
        Commands::Register { account, sponsor } => {
            ops::handle_register_command(&config, account, sponsor)
        }
        Commands::SetSponsor { account, sponsor } => {
            ops::handle_set_sponsor_command(&config, account, sponsor)
        }
        Commands::Mint { to, amount } => ops::handle_mint_command(&config, to, amount),
        Commands::Redeem { from, amount } => ops::handle_redeem_command(&config, from, amount),
        Commands::SupplyBurn { amount } => ops::handle_supply_burn_command(&config, amount),
        Commands::Freeze { account } => ops::handle_freeze_command(&config, account, true),
        Commands::Unfreeze { account } => ops::handle_freeze_command(&config, account, false),
        Commands::Seize { account, amount } => ops::handle_seize_command(&config, account, amount),
        Commands::Release { account, amount } => {
            ops::handle_release_command(&config, account, amount)
        }
        Commands::Transfer { from, to, amount } => {
            ops::handle_transfer_command(&config, from, to, amount)
        }
        Commands::TransferAuthorized {
            from,
            to,
            amount,
            auth_file,
        } => ops::handle_transfer_authorized_command(&config, from, to, amount, auth_file),
        Commands::Status { account } => ops::handle_status_command(&config, account),
        Commands::Balance { account } => ops::handle_balance_command(&config, account),
        Commands::Accounts => ops::handle_accounts_command(&config),
        Commands::Events => ops::handle_events_command(&config),
    }
}
