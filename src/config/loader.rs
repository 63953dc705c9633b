//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::{Script, ScriptConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Node JSON-RPC endpoint.
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";
/// Signer account address.
pub const ACCOUNT_ADDRESS_ENV_VAR: &str = "ACCOUNT_ADDRESS";
/// Signer private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";
pub const PLAYER_CONTRACT_ENV_VAR: &str = "PLAYER_CONTRACT_ADDRESS";
pub const ERC1155_CONTRACT_ENV_VAR: &str = "ERC1155_CONTRACT_ADDRESS";
pub const PLAYER_ABI_ENV_VAR: &str = "PLAYER_ABI_PATH";
pub const ERC1155_ABI_ENV_VAR: &str = "ERC1155_ABI_PATH";
pub const REFRESH_INTERVAL_ENV_VAR: &str = "REFRESH_INTERVAL_MS";
pub const ACCEPTANCE_TIMEOUT_ENV_VAR: &str = "TX_ACCEPTANCE_TIMEOUT_SECS";
pub const POLL_INTERVAL_ENV_VAR: &str = "TX_POLL_INTERVAL_MS";
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
pub const METRICS_ADDRESS_ENV_VAR: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// An environment variable was set to a value of the wrong type.
    InvalidVar { name: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidVar { name, value } => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, overlay the process
/// environment and validate the result.
pub fn load_config(path: Option<&Path>, script: Script) -> Result<ScriptConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ScriptConfig::default(),
    };

    apply_overrides(&mut config, script, |name| std::env::var(name).ok())?;
    validate_config(&config, script).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay the variables `script` reads from `lookup` onto `config`.
///
/// Empty values are treated as set; validation decides whether they are
/// acceptable.
pub fn apply_overrides<F>(
    config: &mut ScriptConfig,
    script: Script,
    lookup: F,
) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(RPC_URL_ENV_VAR) {
        config.network.rpc_url = v;
    }
    if let Some(v) = lookup(ACCOUNT_ADDRESS_ENV_VAR) {
        config.signer.account_address = Some(v);
    }
    if let Some(v) = lookup(PRIVATE_KEY_ENV_VAR) {
        config.signer.private_key = Some(v);
    }
    if let Some(v) = lookup(PLAYER_CONTRACT_ENV_VAR) {
        config.contracts.player_address = v;
    }
    if let Some(v) = lookup(PLAYER_ABI_ENV_VAR) {
        config.contracts.player_abi_path = v;
    }
    if let Some(v) = lookup(ACCEPTANCE_TIMEOUT_ENV_VAR) {
        config.transactions.acceptance_timeout_secs = parse_var(ACCEPTANCE_TIMEOUT_ENV_VAR, v)?;
    }
    if let Some(v) = lookup(POLL_INTERVAL_ENV_VAR) {
        config.transactions.poll_interval_ms = parse_var(POLL_INTERVAL_ENV_VAR, v)?;
    }
    if let Some(v) = lookup(LOG_LEVEL_ENV_VAR) {
        config.observability.log_level = v;
    }

    match script {
        Script::Refresher => {
            if let Some(v) = lookup(REFRESH_INTERVAL_ENV_VAR) {
                config.refresh.interval_ms = parse_var(REFRESH_INTERVAL_ENV_VAR, v)?;
            }
            if let Some(v) = lookup(METRICS_ADDRESS_ENV_VAR) {
                config.observability.metrics_address = Some(v);
            }
        }
        Script::Transfer => {
            if let Some(v) = lookup(ERC1155_CONTRACT_ENV_VAR) {
                config.contracts.erc1155_address = v;
            }
            if let Some(v) = lookup(ERC1155_ABI_ENV_VAR) {
                config.contracts.erc1155_abi_path = v;
            }
        }
    }
    Ok(())
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar { name, value })
}
