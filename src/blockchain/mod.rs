//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ScriptConfig (credentials, RPC URL, contract addresses)
//!     → wallet.rs (key loading, signing identity)
//!     → abi.rs (contract interface files, entry point checks)
//!     → transaction.rs (calldata encoding, u256 as [low, high])
//!     → client.rs (sign, broadcast, wait for acceptance)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from the environment (or a local `.env`)
//! - Never log private keys or sensitive data
//! - Receipt polling is bounded by the acceptance timeout

pub mod abi;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use abi::ContractAbi;
pub use client::{ContractInvoker, StarknetClient};
pub use transaction::ContractCall;
pub use types::{parse_felt, ChainError, ChainResult, ItemId, TxHash};
pub use wallet::Wallet;
