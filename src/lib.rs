//! Inventory operations for Starknet game contracts.
//!
//! Library behind the `refresh-inventory` and `transfer-items` scripts.

pub mod blockchain;
pub mod config;
pub mod inventory;
pub mod lifecycle;
pub mod observability;

pub use config::ScriptConfig;
pub use inventory::{InventoryRefresher, ItemTransfer, TransferRequest};
pub use lifecycle::Shutdown;
