// Solana key pair helper

use clap::Parser;
use rapss::keypair::cli::{Cli, handle};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let report = match handle(cli) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
