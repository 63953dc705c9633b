//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use starknet::core::types::Felt;
use thiserror::Error;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Transaction was reverted on-chain.
    #[error("Transaction {tx_hash} reverted: {reason}")]
    Reverted { tx_hash: TxHash, reason: String },

    /// Transaction receipt did not show up in time.
    #[error("Transaction {0} not accepted after {1} seconds")]
    AcceptanceTimeout(TxHash, u64),

    /// Invalid private key or account address.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Value is not a valid felt (hex with 0x prefix, or decimal).
    #[error("Invalid field element: {0}")]
    InvalidFelt(String),

    /// Item identifier is not an unsigned 256-bit integer.
    #[error("Invalid item id: {0}")]
    InvalidItemId(String),

    /// Contract interface file is missing, malformed, or lacks an entry point.
    #[error("ABI error: {0}")]
    Abi(String),
}

/// Result type for blockchain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Parse a felt from `0x`-prefixed hex or from decimal.
pub fn parse_felt(value: &str) -> ChainResult<Felt> {
    let value = value.trim();
    let parsed = if value.starts_with("0x") || value.starts_with("0X") {
        Felt::from_hex(value)
    } else {
        Felt::from_dec_str(value)
    };
    parsed.map_err(|_| ChainError::InvalidFelt(format!("'{}'", value)))
}

/// Hash of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(pub Felt);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex_string())
    }
}

/// Identifier of a game item (ERC-1155 token id).
///
/// Wider than 64 bits; crosses the wire as a Cairo `u256`, i.e. two felts
/// holding the low and high 128 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(U256);

impl ItemId {
    pub fn value(&self) -> U256 {
        self.0
    }

    /// Lower 128 bits.
    pub fn low(&self) -> u128 {
        split_u256(self.0).0
    }

    /// Upper 128 bits.
    pub fn high(&self) -> u128 {
        split_u256(self.0).1
    }

    /// Wire form: `[low, high]`.
    pub fn to_words(&self) -> [Felt; 2] {
        u256_to_words(self.0)
    }
}

/// Split a 256-bit value into its `(low, high)` 128-bit halves.
pub fn split_u256(value: U256) -> (u128, u128) {
    let limbs = value.as_limbs();
    let low = (u128::from(limbs[1]) << 64) | u128::from(limbs[0]);
    let high = (u128::from(limbs[3]) << 64) | u128::from(limbs[2]);
    (low, high)
}

/// Cairo `u256` serialization: `[low, high]`.
pub fn u256_to_words(value: U256) -> [Felt; 2] {
    let (low, high) = split_u256(value);
    [Felt::from(low), Felt::from(high)]
}

impl From<u128> for ItemId {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl FromStr for ItemId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };
        if digits.is_empty() {
            return Err(ChainError::InvalidItemId(format!("'{}' is empty", s)));
        }
        // from_str_radix skips '_' separators
        let is_digit = |c: &char| match radix {
            16 => c.is_ascii_hexdigit(),
            _ => c.is_ascii_digit(),
        };
        if let Some(bad) = digits.chars().find(|c| !is_digit(c)) {
            return Err(ChainError::InvalidItemId(format!("'{}': invalid digit '{}'", s, bad)));
        }
        U256::from_str_radix(digits, radix)
            .map(Self)
            .map_err(|e| ChainError::InvalidItemId(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
