//! Configuration schema definitions.
//!
//! This module defines the configuration shared by both scripts.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the inventory scripts.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScriptConfig {
    /// Node endpoint settings.
    pub network: NetworkConfig,

    /// Signing account credentials.
    pub signer: SignerConfig,

    /// Target contracts and their interface files.
    pub contracts: ContractsConfig,

    /// Inventory refresh schedule.
    pub refresh: RefreshConfig,

    /// Transaction acceptance polling.
    pub transactions: TransactionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// The binary a configuration is loaded for.
///
/// Settings only one script reads are neither overridden nor validated for
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// `refresh-inventory`: refresh schedule and metrics exporter.
    Refresher,
    /// `transfer-items`: ERC-1155 token contract.
    Transfer,
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:5050".to_string(),
        }
    }
}

/// Signer credentials. Both values are mandatory and have no default.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SignerConfig {
    /// Account contract address (hex felt).
    pub account_address: Option<String>,

    /// Account private key (hex felt). Never logged.
    pub private_key: Option<String>,
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("account_address", &self.account_address)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Contract addresses and ABI file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Player actions contract address.
    pub player_address: String,

    /// ERC-1155 item token contract address.
    pub erc1155_address: String,

    /// Compiled contract class of the player contract.
    pub player_abi_path: String,

    /// Compiled contract class of the ERC-1155 contract.
    pub erc1155_abi_path: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            // Placeholders, real deployments always override these.
            player_address: "0x2".to_string(),
            erc1155_address: "0x1".to_string(),
            player_abi_path: "./target/dev/coa_PlayerActions.contract_class.json".to_string(),
            erc1155_abi_path: "./target/dev/coa_ERC1155.contract_class.json".to_string(),
        }
    }
}

/// Refresh schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Interval between refresh attempts in milliseconds.
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 300_000, // 5 minutes
        }
    }
}

/// Transaction acceptance polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Maximum time to wait for a submitted transaction's receipt.
    pub acceptance_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            acceptance_timeout_secs: 120,
            poll_interval_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus exporter bind address. Exporter is disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
