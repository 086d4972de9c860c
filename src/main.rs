// Bitcoin address tracker - interactive shell

use clap::Parser;
use rapss::tracker::{DEFAULT_ENDPOINT, HttpExplorer, Shell, banner};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "rapss")]
#[command(about = "Bitcoin real-time address tracker", long_about = None)]
struct Cli {
    /// Explorer endpoint, `{address}` is replaced with the tracked address
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let explorer = match HttpExplorer::new(&cli.endpoint) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    let mut shell = Shell::new(explorer);

    let result = match banner(&mut stdout) {
        Ok(()) => shell.run(BufReader::new(tokio::io::stdin()), &mut stdout).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
