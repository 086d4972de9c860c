// solctl commands

use super::{Keypair, read_keypair, write_keypair};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solctl")]
#[command(about = "Solana key pair helper", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a key pair file
    Keygen {
        /// Output file
        #[arg(long)]
        out: PathBuf,
        /// 32-byte hex seed (random if omitted)
        #[arg(long)]
        seed_hex: Option<String>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the public key of a key pair file
    Address {
        #[arg(long)]
        keypair: PathBuf,
    },
}

/// Run a command and return its JSON report
pub fn handle(cli: Cli) -> Result<Value, String> {
    match cli.command {
        Commands::Keygen {
            out,
            seed_hex,
            force,
        } => {
            let keypair = match seed_hex {
                Some(hex) => Keypair::from_seed_hex(&hex)?,
                None => Keypair::generate(None),
            };
            let path = write_keypair(&out, &keypair, force)?;

            Ok(json!({
                "type": "keygen",
                "pubkey": keypair.pubkey(),
                "path": path.display().to_string(),
            }))
        }
        Commands::Address { keypair } => {
            let keypair = read_keypair(&keypair)?;
            Ok(json!({ "type": "address", "pubkey": keypair.pubkey() }))
        }
    }
}
