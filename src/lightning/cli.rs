// lnctl commands

use super::{
    Backend, DEFAULT_COMPOSE_FILE, Network, RpcClient, RpcError, extract_preimage,
    normalize_hex32, normalize_network, summarize_funds,
};
use clap::builder::NonEmptyStringValueParser;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lnctl")]
#[command(about = "Lightning operator tool (Core Lightning only)", long_about = None)]
pub struct Cli {
    /// How to run lightning-cli
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub backend: BackendKind,

    /// bitcoin|testnet|regtest|signet (aliases: mainnet, main, btc, test, reg)
    #[arg(long, global = true, default_value = "regtest", value_parser = normalize_network)]
    pub network: Network,

    /// Compose file (docker backend), relative paths resolve against the current directory
    #[arg(long, global = true, default_value = DEFAULT_COMPOSE_FILE)]
    pub compose_file: PathBuf,

    /// Compose service running the node (required for docker backend)
    #[arg(long, global = true)]
    pub service: Option<String>,

    /// lightning-cli binary (cli backend)
    #[arg(long, global = true)]
    pub cli_bin: Option<String>,

    /// Usage is printed when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Cli,
    Docker,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Node info (getinfo)
    Info,

    /// New on-chain address
    Newaddr,

    /// Raw listfunds
    Listfunds,

    /// On-chain and channel balance in msat
    Balance,

    /// Connect to a peer
    Connect {
        /// nodeid@host:port
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        peer: String,
    },

    /// Open a channel
    Fundchannel {
        /// Peer node id
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        node_id: String,
        /// Channel size in satoshis
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        amount_sats: String,
    },

    /// Create an invoice
    Invoice {
        /// Amount in millisatoshis
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        msat: String,
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        label: String,
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        desc: String,
        /// Expiry in seconds
        #[arg(long)]
        expiry: Option<String>,
    },

    /// Decode a BOLT11 invoice
    Decodepay {
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        bolt11: String,
    },

    /// Pay a BOLT11 invoice
    Pay {
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        bolt11: String,
    },

    /// Payment status by hash
    PayStatus {
        /// 32-byte hex
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        payment_hash: String,
    },

    /// Payment preimage by hash
    PreimageGet {
        /// 32-byte hex
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        payment_hash: String,
    },
}

/// lnctl failure
#[derive(Debug, thiserror::Error)]
pub enum LnctlError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl From<String> for LnctlError {
    fn from(msg: String) -> Self {
        LnctlError::Usage(msg)
    }
}

/// Runs lnctl commands against one RPC client
pub struct LnHandler {
    client: RpcClient,
}

impl LnHandler {
    /// Build the handler from global flags
    pub fn from_cli(cli: &Cli) -> Result<Self, LnctlError> {
        let backend = match cli.backend {
            BackendKind::Cli => match cli.cli_bin.as_deref().map(str::trim) {
                Some(bin) if !bin.is_empty() => Backend::Cli {
                    bin: PathBuf::from(bin),
                },
                _ => Backend::cli(),
            },
            BackendKind::Docker => {
                let service = cli
                    .service
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        LnctlError::Usage(
                            "Missing --service (required for --backend docker)".to_string(),
                        )
                    })?;

                Backend::Docker {
                    compose_file: cli.compose_file.clone(),
                    service: service.to_string(),
                }
            }
        };

        log::debug!("Using {:?} on {}", backend, cli.network);

        Ok(Self::new(RpcClient::new(backend, cli.network)))
    }

    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Run a command and return its JSON report
    pub fn handle(&self, command: Commands) -> Result<Value, LnctlError> {
        match command {
            Commands::Info => {
                let info = self.client.invoke(&["getinfo"])?;
                Ok(json!({ "type": "info", "info": info }))
            }
            Commands::Newaddr => Ok(tagged("newaddr", self.client.invoke(&["newaddr"])?)),
            Commands::Listfunds => Ok(tagged("listfunds", self.client.invoke(&["listfunds"])?)),
            Commands::Balance => {
                let funds = self.client.invoke(&["listfunds"])?;
                let summary = summarize_funds(&funds);

                Ok(json!({
                    "type": "balance",
                    "onchain_confirmed_msat": summary.onchain_confirmed.to_string(),
                    "onchain_unconfirmed_msat": summary.onchain_unconfirmed.to_string(),
                    "channel_total_msat": summary.channel_total.to_string(),
                    "raw": funds,
                }))
            }
            Commands::Connect { peer } => {
                let result = self.client.invoke(&["connect", peer.as_str()])?;
                Ok(json!({ "type": "connect", "peer": peer, "result": result }))
            }
            Commands::Fundchannel {
                node_id,
                amount_sats,
            } => {
                let amount_sats = parse_int_flag(&amount_sats, "amount-sats")?;
                if amount_sats == 0 {
                    return Err(LnctlError::Usage("Invalid --amount-sats".to_string()));
                }

                let amount = amount_sats.to_string();
                let result = self
                    .client
                    .invoke(&["fundchannel", node_id.as_str(), amount.as_str()])?;

                Ok(json!({
                    "type": "fundchannel",
                    "node_id": node_id,
                    "amount_sats": amount_sats,
                    "result": result,
                }))
            }
            Commands::Invoice {
                msat,
                label,
                desc,
                expiry,
            } => {
                let mut args = vec!["invoice".to_string(), msat, label, desc];
                if let Some(expiry) = expiry {
                    args.push(parse_int_flag(&expiry, "expiry")?.to_string());
                }

                Ok(tagged("invoice", self.client.invoke(&args)?))
            }
            Commands::Decodepay { bolt11 } => Ok(tagged(
                "decodepay",
                self.client.invoke(&["decodepay", bolt11.as_str()])?,
            )),
            Commands::Pay { bolt11 } => {
                Ok(tagged("pay", self.client.invoke(&["pay", bolt11.as_str()])?))
            }
            Commands::PayStatus { payment_hash } => {
                let hash = normalize_hex32(&payment_hash, "payment-hash")?;
                let result = self.client.list_pays(&hash)?;

                Ok(json!({
                    "type": "pay_status",
                    "payment_hash_hex": hash,
                    "result": result,
                }))
            }
            Commands::PreimageGet { payment_hash } => {
                let hash = normalize_hex32(&payment_hash, "payment-hash")?;
                let result = self.client.list_pays(&hash)?;
                let preimage = extract_preimage(&result);

                Ok(json!({
                    "type": "preimage",
                    "payment_hash_hex": hash,
                    "preimage_hex": preimage,
                    "result": result,
                }))
            }
        }
    }
}

/// Help text, printed for a bare `lnctl`
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Parse an integer flag value, failing with `Invalid --<label>`
fn parse_int_flag(value: &str, label: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("Invalid --{}", label))
}

// `{type, ...reply}`; non-object replies go under `result`
fn tagged(kind: &str, reply: Value) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), json!(kind));

    match reply {
        Value::Object(fields) => out.extend(fields),
        other => {
            out.insert("result".to_string(), other);
        }
    }

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lnctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["info"]);
        assert_eq!(cli.backend, BackendKind::Cli);
        assert_eq!(cli.network, Network::Regtest);
        assert_eq!(cli.compose_file, PathBuf::from(DEFAULT_COMPOSE_FILE));
        assert!(matches!(cli.command, Some(Commands::Info)));

        let handler = LnHandler::from_cli(&cli).unwrap();
        assert_eq!(
            handler.client.backend,
            Backend::Cli {
                bin: PathBuf::from("lightning-cli")
            }
        );
    }

    #[test]
    fn test_global_flags_before_and_after_command() {
        let cli = parse(&["--network", "mainnet", "pay", "--bolt11", "lnbc1", "--backend", "docker"]);
        assert_eq!(cli.network, Network::Bitcoin);
        assert_eq!(cli.backend, BackendKind::Docker);
        assert!(matches!(cli.command, Some(Commands::Pay { ref bolt11 }) if bolt11 == "lnbc1"));
    }

    #[test]
    fn test_rejects_bad_network_and_backend() {
        assert!(Cli::try_parse_from(["lnctl", "--network", "liquid", "info"]).is_err());
        assert!(Cli::try_parse_from(["lnctl", "--backend", "ssh", "info"]).is_err());
    }

    #[test]
    fn test_missing_required_flag() {
        assert!(Cli::try_parse_from(["lnctl", "connect"]).is_err());
        assert!(Cli::try_parse_from(["lnctl", "fundchannel", "--node-id", "02ab"]).is_err());
        assert!(Cli::try_parse_from(["lnctl", "invoice", "--msat", "1000", "--label", "x"]).is_err());
    }

    #[test]
    fn test_empty_required_flag_rejected() {
        assert!(Cli::try_parse_from(["lnctl", "connect", "--peer", ""]).is_err());
        assert!(Cli::try_parse_from(["lnctl", "pay", "--bolt11", ""]).is_err());
        assert!(Cli::try_parse_from(["lnctl", "pay-status", "--payment-hash", ""]).is_err());
        assert!(
            Cli::try_parse_from([
                "lnctl", "invoice", "--msat", "1000", "--label", "", "--desc", "coffee"
            ])
            .is_err()
        );

        let cli = parse(&["connect", "--peer", "02ab@127.0.0.1:9735"]);
        assert!(matches!(cli.command, Some(Commands::Connect { ref peer }) if peer == "02ab@127.0.0.1:9735"));
    }

    #[test]
    fn test_bare_invocation_has_no_command() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());

        let text = usage();
        assert!(text.contains("lnctl"));
        assert!(text.contains("preimage-get"));
        assert!(text.contains("--backend"));
    }

    #[test]
    fn test_compose_file_help_names_base_directory() {
        let cmd = Cli::command();
        let help = cmd
            .get_arguments()
            .find(|a| a.get_id() == "compose_file")
            .and_then(|a| a.get_help())
            .map(|h| h.to_string())
            .unwrap();

        assert!(help.contains("current directory"), "{}", help);
    }

    #[test]
    fn test_empty_cli_bin_uses_default() {
        for bin in ["", "   "] {
            let cli = parse(&["--cli-bin", bin, "info"]);
            let handler = LnHandler::from_cli(&cli).unwrap();
            assert_eq!(handler.client.backend, Backend::cli());
        }

        let cli = parse(&["--cli-bin", " /opt/cln/lightning-cli ", "info"]);
        let handler = LnHandler::from_cli(&cli).unwrap();
        assert_eq!(
            handler.client.backend,
            Backend::Cli {
                bin: PathBuf::from("/opt/cln/lightning-cli")
            }
        );
    }

    #[test]
    fn test_docker_requires_service() {
        let cli = parse(&["--backend", "docker", "info"]);
        let err = LnHandler::from_cli(&cli).err().unwrap();
        assert_eq!(err.to_string(), "Missing --service (required for --backend docker)");

        let cli = parse(&["--backend", "docker", "--service", "cln-bob", "info"]);
        let handler = LnHandler::from_cli(&cli).unwrap();
        assert_eq!(
            handler.client.backend,
            Backend::Docker {
                compose_file: PathBuf::from(DEFAULT_COMPOSE_FILE),
                service: "cln-bob".to_string(),
            }
        );
    }

    #[test]
    fn test_tagged() {
        assert_eq!(
            tagged("newaddr", json!({ "bech32": "bcrt1q" })),
            json!({ "type": "newaddr", "bech32": "bcrt1q" })
        );
        assert_eq!(
            tagged("pay", json!("done")),
            json!({ "type": "pay", "result": "done" })
        );

        let keys: Vec<String> = tagged("invoice", json!({ "bolt11": "lnbc", "expires_at": 1 }))
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["type", "bolt11", "expires_at"]);
    }

    #[test]
    fn test_parse_int_flag() {
        assert_eq!(parse_int_flag("250000", "amount-sats").unwrap(), 250_000);
        assert_eq!(parse_int_flag("abc", "amount-sats").unwrap_err(), "Invalid --amount-sats");
        assert_eq!(parse_int_flag("-1", "expiry").unwrap_err(), "Invalid --expiry");
    }

    #[test]
    fn test_input_validation_before_rpc() {
        // The binary does not exist, so any RPC attempt would fail with Spawn
        let client = RpcClient::new(
            Backend::Cli {
                bin: PathBuf::from("/nonexistent/lightning-cli"),
            },
            Network::Regtest,
        );
        let handler = LnHandler::new(client);

        let err = handler
            .handle(Commands::Fundchannel {
                node_id: "02ab".to_string(),
                amount_sats: "0".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid --amount-sats");

        let err = handler
            .handle(Commands::Invoice {
                msat: "1000".to_string(),
                label: "l".to_string(),
                desc: "d".to_string(),
                expiry: Some("soon".to_string()),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid --expiry");

        let err = handler
            .handle(Commands::PreimageGet {
                payment_hash: "xyz".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "payment-hash must be 32-byte hex");
    }

    #[cfg(unix)]
    mod script {
        use super::*;
        use crate::lightning::testing;

        fn handler(dir: &tempfile::TempDir, body: &str) -> LnHandler {
            let bin = testing::fake_cli(dir, body);
            LnHandler::new(RpcClient::new(Backend::Cli { bin }, Network::Regtest))
        }

        #[test]
        fn test_balance() {
            let dir = tempfile::tempdir().unwrap();
            let h = handler(
                &dir,
                r#"cat <<'EOF'
{"outputs": [{"amount_msat": "500000msat", "status": "confirmed"},
             {"amount_msat": "250000msat", "status": "unconfirmed"}],
 "channels": [{"our_amount_msat": "100000msat"}]}
EOF"#,
            );

            let report = h.handle(Commands::Balance).unwrap();
            assert_eq!(report["type"], "balance");
            assert_eq!(report["onchain_confirmed_msat"], "500000");
            assert_eq!(report["onchain_unconfirmed_msat"], "250000");
            assert_eq!(report["channel_total_msat"], "100000");
            assert_eq!(report["raw"]["channels"][0]["our_amount_msat"], "100000msat");
        }

        #[test]
        fn test_fundchannel_passes_args() {
            let dir = tempfile::tempdir().unwrap();
            let h = handler(&dir, r#"echo "{\"cmd\": \"$2\", \"id\": \"$3\", \"sats\": \"$4\"}""#);

            let report = h
                .handle(Commands::Fundchannel {
                    node_id: "02ab".to_string(),
                    amount_sats: " 100000 ".to_string(),
                })
                .unwrap();

            assert_eq!(
                report,
                json!({
                    "type": "fundchannel",
                    "node_id": "02ab",
                    "amount_sats": 100000,
                    "result": { "cmd": "fundchannel", "id": "02ab", "sats": "100000" },
                })
            );
        }

        #[test]
        fn test_invoice_with_expiry() {
            let dir = tempfile::tempdir().unwrap();
            let h = handler(&dir, r#"echo "{\"argc\": $#, \"expiry\": \"$6\"}""#);

            let report = h
                .handle(Commands::Invoice {
                    msat: "1000".to_string(),
                    label: "order-1".to_string(),
                    desc: "coffee".to_string(),
                    expiry: Some("3600".to_string()),
                })
                .unwrap();

            assert_eq!(report, json!({ "type": "invoice", "argc": 6, "expiry": "3600" }));
        }

        #[test]
        fn test_preimage_get_via_fallback() {
            let dir = tempfile::tempdir().unwrap();
            let preimage = "AB".repeat(32);
            let h = handler(
                &dir,
                &format!(
                    r#"case "$2" in
  listpays) echo 'Unknown command' >&2; exit 1 ;;
  *) echo '{{"payments": [{{"payment_preimage": "{}"}}]}}' ;;
esac"#,
                    preimage
                ),
            );

            let hash = "CD".repeat(32);
            let report = h
                .handle(Commands::PreimageGet {
                    payment_hash: hash.clone(),
                })
                .unwrap();

            assert_eq!(report["type"], "preimage");
            assert_eq!(report["payment_hash_hex"], hash.to_lowercase());
            assert_eq!(report["preimage_hex"], preimage.to_lowercase());
        }

        #[test]
        fn test_preimage_null_when_unpaid() {
            let dir = tempfile::tempdir().unwrap();
            let h = handler(&dir, r#"echo '{"pays": [{"status": "pending"}]}'"#);

            let report = h
                .handle(Commands::PreimageGet {
                    payment_hash: "00".repeat(32),
                })
                .unwrap();
            assert!(report["preimage_hex"].is_null());
        }

        #[test]
        fn test_rpc_failure_propagates() {
            let dir = tempfile::tempdir().unwrap();
            let h = handler(&dir, "echo 'Connection refused' >&2; exit 1");

            let err = h.handle(Commands::Info).unwrap_err();
            assert!(matches!(&err, LnctlError::Rpc(e) if e.exit_code() == Some(1)));
            assert_eq!(err.to_string(), "Connection refused");
        }
    }
}
