//! Contract call construction and calldata encoding.
//!
//! # Responsibilities
//! - Name the entry points the scripts invoke
//! - Encode arguments into felts the way Cairo serializes them
//!   (`u256` as `[low, high]`, arrays and spans as `[len, items...]`)
//!
//! Selectors are derived from entry point names when the call is
//! submitted, see `client.rs`.

use alloy::primitives::U256;
use starknet::core::types::Felt;

use crate::blockchain::types::{u256_to_words, ItemId};

pub const REFRESH_INVENTORY: &str = "refresh_inventory";
pub const TRANSFER_OBJECTS: &str = "transfer_objects";
pub const SAFE_TRANSFER_FROM: &str = "safe_transfer_from";

/// A single invocation of a contract entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Target contract address.
    pub contract: Felt,
    /// Entry point name, e.g. `refresh_inventory`.
    pub entrypoint: &'static str,
    /// Serialized arguments.
    pub calldata: Vec<Felt>,
}

impl ContractCall {
    /// `refresh_inventory()` on the player contract.
    pub fn refresh_inventory(player: Felt) -> Self {
        Self {
            contract: player,
            entrypoint: REFRESH_INVENTORY,
            calldata: Vec::new(),
        }
    }

    /// `transfer_objects(ids: Array<u256>)` on the player contract.
    pub fn transfer_objects(player: Felt, ids: &[ItemId]) -> Self {
        let mut calldata = Vec::with_capacity(1 + ids.len() * 2);
        calldata.push(Felt::from(ids.len() as u64));
        for id in ids {
            calldata.extend(id.to_words());
        }

        Self {
            contract: player,
            entrypoint: TRANSFER_OBJECTS,
            calldata,
        }
    }

    /// `safe_transfer_from(from, to, id: u256, amount: u256, data: Span<felt252>)`
    /// on the ERC-1155 token contract.
    pub fn safe_transfer_from(
        token: Felt,
        from: Felt,
        to: Felt,
        id: ItemId,
        amount: U256,
        data: &[Felt],
    ) -> Self {
        let mut calldata = Vec::with_capacity(7 + data.len());
        calldata.push(from);
        calldata.push(to);
        calldata.extend(id.to_words());
        calldata.extend(u256_to_words(amount));
        calldata.push(Felt::from(data.len() as u64));
        calldata.extend_from_slice(data);

        Self {
            contract: token,
            entrypoint: SAFE_TRANSFER_FROM,
            calldata,
        }
    }
}
