//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (.env / process environment overrides)
//!     → validation.rs (semantic checks, credentials)
//!     → ScriptConfig (validated, immutable)
//!     → passed explicitly to startup and the inventory services
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults except the signer credentials
//! - Environment wins over the file so deployments can inject secrets
//! - Settings owned by one script are ignored when loading for the other

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{Script, ScriptConfig};
pub use schema::{
    ContractsConfig, NetworkConfig, ObservabilityConfig, RefreshConfig, SignerConfig,
    TransactionConfig,
};
