// Core Lightning control over lightning-cli

pub mod cli;
mod funds;
mod network;
mod pays;
mod rpc;

#[cfg(all(test, unix))]
mod testing;

pub use cli::{Cli, Commands, LnHandler, LnctlError, usage};
pub use funds::{BalanceSummary, parse_msat, summarize_funds};
pub use network::{Network, normalize_network};
pub use pays::{extract_preimage, is_hex32, normalize_hex32};
pub use rpc::{
    Backend, DEFAULT_CLI_BIN, DEFAULT_COMPOSE_FILE, PAY_LOOKUP_COMMANDS, RpcClient, RpcError,
};
