//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (credentials first)
//! - Load contract interfaces and check the entry points that will be called
//! - Build the signing identity and connect it to the node
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and maps to exit status 1
//! - Steps run in order: nothing touches the network before the
//!   configuration and interface files are accepted

use std::path::Path;

use thiserror::Error;

use crate::blockchain::{ChainError, ContractAbi, StarknetClient, Wallet};
use crate::config::{load_config, ConfigError, Script, ScriptConfig};

/// Errors that abort a script before its first contract call.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Metrics exporter failed: {0}")]
    Metrics(String),
}

/// Load `.env` (if present), the optional config file and the environment.
pub fn load_settings(path: Option<&Path>, script: Script) -> Result<ScriptConfig, StartupError> {
    // A missing .env is the normal case in deployments.
    dotenv::dotenv().ok();
    Ok(load_config(path, script)?)
}

/// Load a contract interface and require each `(name, arity)` entry point.
pub fn load_contract(
    path: &str,
    entrypoints: &[(&str, usize)],
) -> Result<ContractAbi, StartupError> {
    let abi = ContractAbi::load(Path::new(path))?;
    for (name, arity) in entrypoints {
        abi.ensure_entrypoint(name, *arity)?;
    }

    tracing::debug!(path = %path, functions = abi.len(), "Contract interface loaded");
    Ok(abi)
}

/// Build the wallet from the signer credentials and connect it to the node.
pub async fn connect(config: &ScriptConfig) -> Result<StarknetClient, StartupError> {
    let wallet = Wallet::from_config(&config.signer)?;
    let client = StarknetClient::connect(&config.network, &config.transactions, wallet).await?;
    Ok(client)
}
