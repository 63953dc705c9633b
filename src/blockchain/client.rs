//! Starknet RPC client used to submit contract calls.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and learn the chain id
//! - Sign and submit invoke transactions through a single-owner account
//! - Wait until each transaction is accepted or reverted
//! - Record per-call latency and outcome metrics

use std::future::Future;
use std::time::{Duration, Instant};

use starknet::accounts::{Account, ConnectedAccount, ExecutionEncoding, SingleOwnerAccount};
use starknet::core::types::{Call, ExecutionResult, Felt, StarknetError};
use starknet::core::utils::{get_selector_from_name, parse_cairo_short_string};
use starknet::providers::jsonrpc::{HttpTransport, JsonRpcClient};
use starknet::providers::{Provider, ProviderError};
use starknet::signers::LocalWallet;
use tokio::time::{interval, timeout};
use url::Url;

use crate::blockchain::transaction::ContractCall;
use crate::blockchain::types::{ChainError, ChainResult, TxHash};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::{NetworkConfig, TransactionConfig};
use crate::observability::metrics;

/// Anything that can execute a contract call on behalf of the signer.
///
/// A returned hash means the call went through; any submission, revert or
/// transport problem is an `Err`.
pub trait ContractInvoker {
    fn invoke(&self, call: ContractCall) -> impl Future<Output = ChainResult<TxHash>> + Send;
}

type RpcAccount = SingleOwnerAccount<JsonRpcClient<HttpTransport>, LocalWallet>;

/// Signing account bound to a node endpoint.
pub struct StarknetClient {
    account: RpcAccount,
    rpc_url: Url,
    acceptance_timeout: Duration,
    poll_interval: Duration,
}

impl StarknetClient {
    /// Connect to the node and bind `wallet` to it.
    ///
    /// Fetches the chain id once; fails if the node cannot be reached.
    pub async fn connect(
        network: &NetworkConfig,
        transactions: &TransactionConfig,
        wallet: Wallet,
    ) -> ChainResult<Self> {
        let rpc_url: Url = network.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", network.rpc_url, e))
        })?;

        let provider = JsonRpcClient::new(HttpTransport::new(rpc_url.clone()));
        let chain_id = provider.chain_id().await.map_err(|e| {
            ChainError::Rpc(format!("Failed to fetch chain id from {}: {}", rpc_url, e))
        })?;

        let address = wallet.address();
        let account = SingleOwnerAccount::new(
            provider,
            wallet.into_signer(),
            address,
            chain_id,
            ExecutionEncoding::New,
        );

        tracing::info!(
            rpc_url = %rpc_url,
            chain_id = %describe_chain_id(chain_id),
            account = %address.to_hex_string(),
            "Starknet client initialized"
        );

        Ok(Self {
            account,
            rpc_url,
            acceptance_timeout: Duration::from_secs(transactions.acceptance_timeout_secs),
            poll_interval: Duration::from_millis(transactions.poll_interval_ms),
        })
    }

    /// Address of the signing account.
    pub fn address(&self) -> Felt {
        self.account.address()
    }

    /// Sign and broadcast a single call.
    pub async fn submit(&self, call: &ContractCall) -> ChainResult<TxHash> {
        let selector = get_selector_from_name(call.entrypoint).map_err(|e| {
            ChainError::Abi(format!("Invalid entry point '{}': {}", call.entrypoint, e))
        })?;

        let result = self
            .account
            .execute_v3(vec![Call {
                to: call.contract,
                selector,
                calldata: call.calldata.clone(),
            }])
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("{} submission failed: {}", call.entrypoint, e)))?;

        Ok(TxHash(result.transaction_hash))
    }

    /// Poll the receipt until the transaction is executed.
    pub async fn wait_for_acceptance(&self, tx_hash: TxHash) -> ChainResult<()> {
        let provider = self.account.provider();

        let result = timeout(self.acceptance_timeout, async {
            let mut ticker = interval(self.poll_interval);

            loop {
                ticker.tick().await;

                match provider.get_transaction_receipt(tx_hash.0).await {
                    Ok(receipt) => {
                        return match receipt.receipt.execution_result() {
                            ExecutionResult::Succeeded => Ok(()),
                            ExecutionResult::Reverted { reason } => Err(ChainError::Reverted {
                                tx_hash,
                                reason: reason.clone(),
                            }),
                        };
                    }
                    Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    }
                    Err(e) => {
                        return Err(ChainError::Rpc(format!(
                            "Failed to fetch receipt for {}: {}",
                            tx_hash, e
                        )));
                    }
                }
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::AcceptanceTimeout(
                tx_hash,
                self.acceptance_timeout.as_secs(),
            )),
        }
    }
}

impl ContractInvoker for StarknetClient {
    async fn invoke(&self, call: ContractCall) -> ChainResult<TxHash> {
        let started = Instant::now();

        let result = async {
            let tx_hash = self.submit(&call).await?;
            tracing::debug!(
                entrypoint = call.entrypoint,
                tx_hash = %tx_hash,
                "Transaction submitted"
            );
            self.wait_for_acceptance(tx_hash).await?;
            Ok::<_, ChainError>(tx_hash)
        }
        .await;

        metrics::record_contract_call(call.entrypoint, result.is_ok(), started.elapsed());
        result
    }
}

impl std::fmt::Debug for StarknetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarknetClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("account", &self.address().to_hex_string())
            .field("acceptance_timeout", &self.acceptance_timeout)
            .finish()
    }
}

/// Chain ids are short strings such as `SN_SEPOLIA`; fall back to hex.
fn describe_chain_id(chain_id: Felt) -> String {
    parse_cairo_short_string(&chain_id).unwrap_or_else(|_| chain_id.to_hex_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScriptConfig;

    #[test]
    fn test_describe_chain_id() {
        let sepolia = Felt::from_hex("0x534e5f5345504f4c4941").unwrap();
        assert_eq!(describe_chain_id(sepolia), "SN_SEPOLIA");
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_url() {
        let mut config = ScriptConfig::default();
        config.network.rpc_url = "not a url".to_string();
        let wallet = Wallet::from_credentials("0x1234", "0x1").unwrap();

        let err = StarknetClient::connect(&config.network, &config.transactions, wallet)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_connect_unreachable_node() {
        let mut config = ScriptConfig::default();
        // Port 9 (discard) on localhost is never a Starknet node
        config.network.rpc_url = "http://127.0.0.1:9".to_string();
        let wallet = Wallet::from_credentials("0x1234", "0x1").unwrap();

        let result = StarknetClient::connect(&config.network, &config.transactions, wallet).await;
        assert!(matches!(result, Err(ChainError::Rpc(_))));
    }
}
