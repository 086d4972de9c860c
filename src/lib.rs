// rapss - small command-line tools for Bitcoin, Lightning and Solana wallets
//
// tracker:   interactive Bitcoin address balance tracker
// lightning: Core Lightning control over lightning-cli
// keypair:   Solana key pair files

pub mod tracker;
pub mod lightning;
pub mod keypair;

// Re-exports for convenience
pub use tracker::{Session, Shell, HttpExplorer, is_valid_btc};
pub use lightning::{Network, RpcClient, RpcError, normalize_network, summarize_funds, extract_preimage};
pub use keypair::{Keypair, read_keypair, write_keypair};
