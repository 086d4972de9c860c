// Core Lightning network names

use std::fmt;
use std::str::FromStr;

/// Network accepted by `lightning-cli --network`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Bitcoin,
    Testnet,
    Regtest,
    Signet,
}

impl Network {
    /// Canonical name passed to the RPC client
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Bitcoin => "bitcoin",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Signet => "signet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_network(s)
    }
}

/// Map a user supplied network name or alias to its canonical network
pub fn normalize_network(value: &str) -> Result<Network, String> {
    let raw = value.trim().to_lowercase();
    if raw.is_empty() {
        return Err("Missing lightning network".to_string());
    }

    match raw.as_str() {
        "bitcoin" | "mainnet" | "main" | "btc" => Ok(Network::Bitcoin),
        "testnet" | "test" => Ok(Network::Testnet),
        "regtest" | "reg" => Ok(Network::Regtest),
        "signet" => Ok(Network::Signet),
        _ => Err(format!(
            "Unsupported CLN network: {} (expected bitcoin|testnet|regtest|signet)",
            raw
        )),
    }
}
