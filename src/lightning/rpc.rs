// lightning-cli subprocess invocation

use super::Network;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::Command;

/// Default RPC client binary
pub const DEFAULT_CLI_BIN: &str = "lightning-cli";

/// Default compose file for the docker backend
pub const DEFAULT_COMPOSE_FILE: &str = "dev/ln-regtest/docker-compose.yml";

/// Commands that look up payments by hash, newest CLN spelling first
pub const PAY_LOOKUP_COMMANDS: [&str; 2] = ["listpays", "listsendpays"];

/// RPC failure
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit, message is the trimmed stderr (or stdout)
    #[error("{message}")]
    Exit { code: Option<i32>, message: String },

    #[error("No RPC command to try")]
    NoCandidates,
}

impl RpcError {
    /// Exit code of the RPC client, if it ran and exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RpcError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

/// How the RPC client is executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Run the binary directly
    Cli { bin: PathBuf },
    /// Run `lightning-cli` inside a compose service
    Docker { compose_file: PathBuf, service: String },
}

impl Backend {
    /// `lightning-cli` from PATH
    pub fn cli() -> Self {
        Backend::Cli {
            bin: PathBuf::from(DEFAULT_CLI_BIN),
        }
    }
}

/// RPC client bound to a backend and network
#[derive(Debug, Clone)]
pub struct RpcClient {
    pub backend: Backend,
    pub network: Network,
}

impl RpcClient {
    pub fn new(backend: Backend, network: Network) -> Self {
        Self { backend, network }
    }

    /// Program and argument vector for an RPC call
    pub fn command_line<S: AsRef<str>>(&self, args: &[S]) -> (String, Vec<String>) {
        let network_flag = format!("--network={}", self.network);
        let rpc_args = args.iter().map(|a| a.as_ref().to_string());

        match &self.backend {
            Backend::Cli { bin } => {
                let argv = std::iter::once(network_flag).chain(rpc_args).collect();
                (bin.display().to_string(), argv)
            }
            Backend::Docker {
                compose_file,
                service,
            } => {
                let mut argv = vec![
                    "compose".to_string(),
                    "-f".to_string(),
                    compose_file.display().to_string(),
                    "exec".to_string(),
                    "-T".to_string(),
                    service.clone(),
                    DEFAULT_CLI_BIN.to_string(),
                    network_flag,
                ];
                argv.extend(rpc_args);
                ("docker".to_string(), argv)
            }
        }
    }

    /// Run one RPC call.
    ///
    /// Output that is not JSON is returned as `{"result": <text>}`.
    pub fn invoke<S: AsRef<str>>(&self, args: &[S]) -> Result<Value, RpcError> {
        let (program, argv) = self.command_line(args);
        log::debug!("Running {} {}", program, argv.join(" "));

        let output = Command::new(&program)
            .args(&argv)
            .output()
            .map_err(|source| RpcError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if !stderr.is_empty() {
                stderr
            } else if !stdout.is_empty() {
                stdout
            } else {
                format!("{} exited with {}", program, output.status)
            };

            return Err(RpcError::Exit {
                code: output.status.code(),
                message,
            });
        }

        Ok(parse_output(stdout))
    }

    /// Try each command name in order with the same arguments.
    ///
    /// Returns the first success, or the last failure.
    pub fn invoke_first<S: AsRef<str>>(
        &self,
        commands: &[&str],
        args: &[S],
    ) -> Result<Value, RpcError> {
        let mut last_err = RpcError::NoCandidates;

        for command in commands {
            let mut full_args = vec![command.to_string()];
            full_args.extend(args.iter().map(|a| a.as_ref().to_string()));

            match self.invoke(&full_args) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    log::debug!("{} failed: {}", command, e);
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    /// Look up payments by hash (`listpays`, falling back to `listsendpays`)
    pub fn list_pays(&self, payment_hash_hex: &str) -> Result<Value, RpcError> {
        self.invoke_first(&PAY_LOOKUP_COMMANDS, &[payment_hash_hex])
    }
}

fn parse_output(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => json!({ "result": text }),
    }
}
