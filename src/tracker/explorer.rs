// Block explorer client

use serde::Deserialize;
use std::fmt;
use std::future::Future;

/// Default explorer endpoint, `{address}` is replaced per request
pub const DEFAULT_ENDPOINT: &str = "https://blockchain.info/rawaddr/{address}";

/// Satoshis per bitcoin
pub const SATS_PER_BTC: f64 = 1e8;

/// Address summary returned by the explorer (amounts in satoshis)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressStats {
    pub final_balance: u64,
    pub total_received: u64,
    pub total_sent: u64,
    pub n_tx: u64,
}

/// Source of address data
pub trait Explorer {
    fn fetch(&self, address: &str) -> impl Future<Output = Result<AddressStats, String>>;
}

/// Explorer reached over HTTP
pub struct HttpExplorer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpExplorer {
    /// Create a client for an endpoint template containing `{address}`
    pub fn new(endpoint: &str) -> Result<Self, String> {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: &str, client: reqwest::Client) -> Result<Self, String> {
        if !endpoint.contains("{address}") {
            return Err(format!("Endpoint must contain {{address}}: {}", endpoint));
        }

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Request URL for an address
    pub fn url_for(&self, address: &str) -> String {
        self.endpoint.replace("{address}", address)
    }
}

impl Explorer for HttpExplorer {
    async fn fetch(&self, address: &str) -> Result<AddressStats, String> {
        let url = self.url_for(address);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?
            .error_for_status()
            .map_err(|e| format!("Explorer error: {}", e))?;

        response
            .json::<AddressStats>()
            .await
            .map_err(|e| format!("Invalid explorer response: {}", e))
    }
}

/// Address data in display units
#[derive(Debug, Clone, PartialEq)]
pub struct AddressReport {
    pub address: String,
    pub balance_btc: f64,
    pub total_received_btc: f64,
    pub total_sent_btc: f64,
    pub tx_count: u64,
}

impl AddressReport {
    pub fn from_stats(address: &str, stats: &AddressStats) -> Self {
        Self {
            address: address.to_string(),
            balance_btc: stats.final_balance as f64 / SATS_PER_BTC,
            total_received_btc: stats.total_received as f64 / SATS_PER_BTC,
            total_sent_btc: stats.total_sent as f64 / SATS_PER_BTC,
            tx_count: stats.n_tx,
        }
    }
}

impl fmt::Display for AddressReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "========== ADDRESS DATA ==========")?;
        writeln!(f)?;
        writeln!(f, "Address        : {}", self.address)?;
        writeln!(f, "Balance (BTC)  : {}", self.balance_btc)?;
        writeln!(f, "Total Received : {}", self.total_received_btc)?;
        writeln!(f, "Total Sent     : {}", self.total_sent_btc)?;
        write!(f, "Transactions   : {}", self.tx_count)
    }
}
