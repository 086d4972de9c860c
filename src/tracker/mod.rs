// Bitcoin address tracker

mod address;
mod explorer;
mod session;

pub use address::is_valid_btc;
pub use explorer::{
    AddressReport, AddressStats, DEFAULT_ENDPOINT, Explorer, HttpExplorer, SATS_PER_BTC,
};
pub use session::{ADDRESS_PROMPT, PROMPT, Session, Shell, ShellCommand, banner};
