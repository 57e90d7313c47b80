use crate::crypto::KeyPair;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum KeysCommands {
    /// Generate a fresh sponsor keypair and print its mnemonic + pubkey
    Generate,
    /// Derive the public key for an existing mnemonic
    Show {
        #[arg(long)]
        mnemonic: String,
    },
}

pub fn handle_keys_command(cmd: KeysCommands) {
    match cmd {
        KeysCommands::Generate => {
            let phrase = KeyPair::generate_mnemonic();
            match KeyPair::from_mnemonic(&phrase) {
                Ok(kp) => {
                    println!("Mnemonic:   {}", phrase);
                    println!("Public key: {}", kp.public_key_hex());
                    println!();
                    println!("Register with: meridian sponsor add --id <name> --pubkey {}", kp.public_key_hex());
                }
                Err(e) => println!("Error deriving keypair: {}", e),
            }
        }
        KeysCommands::Show { mnemonic } => match KeyPair::from_mnemonic(&mnemonic) {
            Ok(kp) => println!("Public key: {}", kp.public_key_hex()),
            Err(e) => println!("Error: {}", e),
        },
    }
}
