//! Inventory operations against the player and item contracts.
//!
//! # Data Flow
//! ```text
//! refresh-inventory:
//!     InventoryRefresher → refresh_inventory() every interval
//!
//! transfer-items:
//!     TransferRequest (CLI) → ItemTransfer
//!         → transfer_objects(ids)           (player contract)
//!         → safe_transfer_from(.., id, 1)   (ERC-1155, once per id)
//! ```
//!
//! Both services are generic over `ContractInvoker`, so they run against a
//! live node or a recording double in tests.

pub mod refresher;
pub mod transfer;

pub use refresher::{InventoryRefresher, RefreshSummary};
pub use transfer::{ItemTransfer, TransferError, TransferRequest, TransferStep};
