//! Wallet management for the signing account.
//!
//! # Security
//! - Private keys come from the validated configuration (environment or `.env`)
//! - Keys are never logged or serialized
//! - `Debug` only shows the account address and public key

use starknet::core::types::Felt;
use starknet::signers::{LocalWallet, SigningKey};

use crate::blockchain::types::{parse_felt, ChainError, ChainResult};
use crate::config::SignerConfig;

/// Account address paired with the key that signs for it.
#[derive(Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: LocalWallet,
    /// Account contract address.
    address: Felt,
    /// Stark public key derived from the private key.
    public_key: Felt,
}

impl Wallet {
    /// Create a wallet from an account address and a private key.
    ///
    /// Both accept `0x`-prefixed hex or decimal.
    pub fn from_credentials(address: &str, private_key: &str) -> ChainResult<Self> {
        let address = parse_felt(address)
            .map_err(|e| ChainError::Wallet(format!("Invalid account address: {}", e)))?;
        let secret = parse_felt(private_key)
            .map_err(|_| ChainError::Wallet("Invalid private key format".to_string()))?;

        let key = SigningKey::from_secret_scalar(secret);
        let public_key = key.verifying_key().scalar();

        tracing::info!(
            address = %address.to_hex_string(),
            public_key = %public_key.to_hex_string(),
            "Wallet initialized"
        );

        Ok(Self {
            signer: LocalWallet::from_signing_key(key),
            address,
            public_key,
        })
    }

    /// Build the wallet from the signer section of the configuration.
    pub fn from_config(config: &SignerConfig) -> ChainResult<Self> {
        let address = config
            .account_address
            .as_deref()
            .ok_or_else(|| ChainError::Wallet("ACCOUNT_ADDRESS not set".to_string()))?;
        let private_key = config
            .private_key
            .as_deref()
            .ok_or_else(|| ChainError::Wallet("PRIVATE_KEY not set".to_string()))?;

        Self::from_credentials(address, private_key)
    }

    /// Get the account address.
    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn public_key(&self) -> Felt {
        self.public_key
    }

    /// Hand the signer over to an account implementation.
    pub fn into_signer(self) -> LocalWallet {
        self.signer
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address.to_hex_string())
            .field("public_key", &self.public_key.to_hex_string())
            .finish()
    }
}
