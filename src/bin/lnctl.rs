// Lightning operator tool (Core Lightning only)

use clap::Parser;
use rapss::lightning::{Cli, LnHandler, usage};

fn main() {
    env_logger::init();

    let mut cli = Cli::parse();

    let Some(command) = cli.command.take() else {
        println!("{}", usage());
        return;
    };

    let handler = match LnHandler::from_cli(&cli) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match handler.handle(command) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to encode output: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
