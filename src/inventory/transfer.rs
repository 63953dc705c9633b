//! One-shot item transfer.
//!
//! # Responsibilities
//! - Unequip all requested items with one `transfer_objects` call
//! - Move each item with `safe_transfer_from`, one unit at a time
//!
//! # Design Decisions
//! - Strictly sequential: each call is awaited before the next is issued
//! - The first failure aborts the remaining steps; nothing is rolled back

use std::fmt;

use alloy::primitives::U256;
use starknet::core::types::Felt;
use thiserror::Error;

use crate::blockchain::{
    parse_felt, ChainError, ChainResult, ContractCall, ContractInvoker, ItemId, TxHash,
};

/// Quantity moved per item id.
pub const UNITS_PER_ITEM: u64 = 1;

/// Recipient and items parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient: Felt,
    pub items: Vec<ItemId>,
}

impl TransferRequest {
    /// Parse a recipient address and one or more item ids.
    pub fn parse<S: AsRef<str>>(recipient: &str, item_ids: &[S]) -> ChainResult<Self> {
        if item_ids.is_empty() {
            return Err(ChainError::InvalidItemId(
                "at least one item id is required".to_string(),
            ));
        }

        let recipient = parse_felt(recipient)?;
        let items = item_ids
            .iter()
            .map(|id| id.as_ref().parse())
            .collect::<ChainResult<Vec<ItemId>>>()?;

        Ok(Self { recipient, items })
    }
}

/// Which step of a transfer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    Unequip,
    Transfer(ItemId),
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferStep::Unequip => write!(f, "transfer_objects"),
            TransferStep::Transfer(id) => write!(f, "safe_transfer_from for item {}", id),
        }
    }
}

#[derive(Debug, Error)]
#[error("{step} failed: {source}")]
pub struct TransferError {
    pub step: TransferStep,
    #[source]
    pub source: ChainError,
}

/// Moves items out of a player's inventory to another address.
pub struct ItemTransfer<I> {
    invoker: I,
    player: Felt,
    token: Felt,
    owner: Felt,
}

impl<I: ContractInvoker> ItemTransfer<I> {
    /// `owner` is the signer's own address, the `from` of every token transfer.
    pub fn new(invoker: I, player: Felt, token: Felt, owner: Felt) -> Self {
        Self {
            invoker,
            player,
            token,
            owner,
        }
    }

    /// Run the whole transfer. Returns `false` if any step failed.
    pub async fn transfer(&self, request: &TransferRequest) -> bool {
        let items = request
            .items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            items = %items,
            recipient = %request.recipient.to_hex_string(),
            "Transferring items..."
        );

        match self.try_transfer(request).await {
            Ok(hashes) => {
                tracing::info!(transactions = hashes.len(), "All items transferred successfully");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error transferring items");
                false
            }
        }
    }

    /// Issue the calls in order and collect their transaction hashes.
    pub async fn try_transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<Vec<TxHash>, TransferError> {
        let mut hashes = Vec::with_capacity(request.items.len() + 1);

        let tx_hash = self
            .invoker
            .invoke(ContractCall::transfer_objects(self.player, &request.items))
            .await
            .map_err(|source| TransferError {
                step: TransferStep::Unequip,
                source,
            })?;
        tracing::info!(tx_hash = %tx_hash, "Items unequipped successfully");
        hashes.push(tx_hash);

        for id in &request.items {
            let call = ContractCall::safe_transfer_from(
                self.token,
                self.owner,
                request.recipient,
                *id,
                U256::from(UNITS_PER_ITEM),
                &[],
            );
            let tx_hash = self
                .invoker
                .invoke(call)
                .await
                .map_err(|source| TransferError {
                    step: TransferStep::Transfer(*id),
                    source,
                })?;
            tracing::info!(item_id = %id, tx_hash = %tx_hash, "Item transferred successfully");
            hashes.push(tx_hash);
        }

        Ok(hashes)
    }
}
