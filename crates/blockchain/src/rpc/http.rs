// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use std::{
    fmt::Debug,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    primitives::{Address, B256, Bytes, TxKind, U64, U256},
};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use nova_model::defi::rpc::{RpcNodeError, RpcNodeHttpRequest, RpcNodeHttpResponse};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::rpc::{EvmRpcClient, error::BlockchainRpcClientError, types::TransactionReceipt};

/// JSON-RPC error code for execution reverts (EIP-1474).
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Timeout applied to every HTTP request.
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for making HTTP-based RPC requests to blockchain nodes.
///
/// Transactions are signed locally with a secp256k1 key as EIP-155 legacy transactions and
/// submitted with `eth_sendRawTransaction`. The nonce is fetched as `pending` for every
/// transaction, which is safe because the bootstrap submits one transaction at a time.
///
/// A client built with [`Self::read_only`] has no key: calls go out from the zero address and
/// every write fails with [`BlockchainRpcClientError::SignerError`].
pub struct BlockchainHttpRpcClient {
    /// The HTTP URL for the blockchain node's RPC endpoint.
    http_rpc_url: String,
    /// The HTTP client for making RPC http-based requests.
    http_client: reqwest::Client,
    /// The EIP-155 chain ID used when signing.
    chain_id: u64,
    /// The local signing account, `None` for a read-only client.
    signer: Option<PrivateKeySigner>,
    /// Monotonic JSON-RPC request identifier.
    next_request_id: AtomicU64,
}

impl Debug for BlockchainHttpRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BlockchainHttpRpcClient))
            .field("http_rpc_url", &self.http_rpc_url)
            .field("chain_id", &self.chain_id)
            .field("sender", &self.sender())
            .finish_non_exhaustive()
    }
}

impl BlockchainHttpRpcClient {
    /// Creates a new HTTP RPC client for the given endpoint, chain and signing key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        http_rpc_url: String,
        chain_id: u64,
        signer: PrivateKeySigner,
    ) -> Result<Self, BlockchainRpcClientError> {
        Self::build(http_rpc_url, chain_id, Some(signer))
    }

    /// Creates a new HTTP RPC client without a signing key, for reads only.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn read_only(
        http_rpc_url: String,
        chain_id: u64,
    ) -> Result<Self, BlockchainRpcClientError> {
        Self::build(http_rpc_url, chain_id, None)
    }

    fn build(
        http_rpc_url: String,
        chain_id: u64,
        signer: Option<PrivateKeySigner>,
    ) -> Result<Self, BlockchainRpcClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                BlockchainRpcClientError::ClientError(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http_rpc_url,
            http_client,
            chain_id,
            signer,
            next_request_id: AtomicU64::new(1),
        })
    }

    /// Creates a new HTTP RPC client from a hex-encoded private key, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the HTTP client cannot be built.
    pub fn from_private_key(
        http_rpc_url: String,
        chain_id: u64,
        private_key: &str,
    ) -> Result<Self, BlockchainRpcClientError> {
        let key_hex = private_key.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        let signer = PrivateKeySigner::from_str(key_hex).map_err(|e| {
            BlockchainRpcClientError::SignerError(format!("Invalid private key: {e}"))
        })?;
        Self::new(http_rpc_url, chain_id, signer)
    }

    /// Returns the EIP-155 chain ID used for signing.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sends a JSON-RPC request and deserializes its `result` into `T`.
    ///
    /// A `null` result is returned as `None`.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>, BlockchainRpcClientError> {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let rpc_request = RpcNodeHttpRequest::new(id, method, params);

        let response = self
            .http_client
            .post(&self.http_rpc_url)
            .json(&rpc_request)
            .send()
            .await
            .map_err(|e| BlockchainRpcClientError::ClientError(format!("{method} failed: {e}")))?;
        let bytes = response.bytes().await.map_err(|e| {
            BlockchainRpcClientError::ClientError(format!("{method} response unreadable: {e}"))
        })?;

        parse_rpc_response(method, &bytes)
    }

    /// Like [`Self::request`], treating a `null` result as an error.
    async fn request_some<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, BlockchainRpcClientError> {
        self.request(method, params).await?.ok_or_else(|| {
            BlockchainRpcClientError::MessageParsingError(format!("{method} returned null"))
        })
    }

    async fn gas_price(&self) -> Result<u128, BlockchainRpcClientError> {
        let price: U256 = self.request_some("eth_gasPrice", json!([])).await?;
        u128::try_from(price).map_err(|e| {
            BlockchainRpcClientError::MessageParsingError(format!(
                "Gas price {price} too large: {e}"
            ))
        })
    }

    fn signer(&self) -> Result<&PrivateKeySigner, BlockchainRpcClientError> {
        self.signer.as_ref().ok_or_else(|| {
            BlockchainRpcClientError::SignerError(
                "Client is read-only, no signing key configured".to_string(),
            )
        })
    }

    async fn pending_nonce(&self, sender: Address) -> Result<u64, BlockchainRpcClientError> {
        let nonce: U64 = self
            .request_some("eth_getTransactionCount", json!([sender, "pending"]))
            .await?;
        Ok(nonce.to::<u64>())
    }

    fn sign_legacy(&self, tx: TxLegacy) -> Result<Vec<u8>, BlockchainRpcClientError> {
        let signature = self
            .signer()?
            .sign_hash_sync(&tx.signature_hash())
            .map_err(|e| BlockchainRpcClientError::SignerError(format!("Failed to sign: {e}")))?;
        let envelope = TxEnvelope::from(tx.into_signed(signature));
        Ok(envelope.encoded_2718())
    }
}

#[async_trait::async_trait]
impl EvmRpcClient for BlockchainHttpRpcClient {
    fn sender(&self) -> Address {
        self.signer
            .as_ref()
            .map_or(Address::ZERO, PrivateKeySigner::address)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockchainRpcClientError> {
        let call = json!({ "from": self.sender(), "to": to, "data": data });
        self.request_some("eth_call", json!([call, "latest"])).await
    }

    async fn estimate_gas(
        &self,
        to: Address,
        data: Bytes,
    ) -> Result<u64, BlockchainRpcClientError> {
        let call = json!({ "from": self.sender(), "to": to, "data": data });
        let gas: U64 = self.request_some("eth_estimateGas", json!([call])).await?;
        Ok(gas.to::<u64>())
    }

    async fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> Result<B256, BlockchainRpcClientError> {
        let sender = self.signer()?.address();
        let gas_limit = match gas_limit {
            Some(gas_limit) => gas_limit,
            None => self.estimate_gas(to, data.clone()).await?,
        };
        let nonce = self.pending_nonce(sender).await?;
        let gas_price = self.gas_price().await?;

        let tx = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce,
            gas_price,
            gas_limit,
            to: TxKind::Call(to),
            value: U256::ZERO,
            input: data,
        };
        log::debug!(
            "Sending tx to {to}: nonce={nonce}, gas_limit={gas_limit}, gas_price={gas_price}"
        );

        let raw_tx = Bytes::from(self.sign_legacy(tx)?);
        self.request_some("eth_sendRawTransaction", json!([raw_tx])).await
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>, BlockchainRpcClientError> {
        self.request("eth_getTransactionReceipt", json!([tx_hash])).await
    }
}

/// Parses a raw JSON-RPC response body, mapping node errors to typed errors.
fn parse_rpc_response<T: DeserializeOwned>(
    method: &str,
    bytes: &[u8],
) -> Result<Option<T>, BlockchainRpcClientError> {
    let parsed = serde_json::from_slice::<RpcNodeHttpResponse<T>>(bytes).map_err(|e| {
        // Try to convert bytes to string for better error reporting
        let raw_response = String::from_utf8_lossy(bytes);
        let preview: String = raw_response.chars().take(500).collect();
        BlockchainRpcClientError::MessageParsingError(format!(
            "Failed to parse {method} response: {e}\nRaw response: {preview}"
        ))
    })?;

    match parsed.error {
        Some(error) => Err(map_rpc_error(error)),
        None => Ok(parsed.result),
    }
}

/// Maps a JSON-RPC error object to [`BlockchainRpcClientError`].
///
/// Code 3, or any message mentioning a revert, becomes
/// [`BlockchainRpcClientError::ExecutionReverted`] carrying the revert data when present.
fn map_rpc_error(error: RpcNodeError) -> BlockchainRpcClientError {
    if error.code == EXECUTION_REVERTED_CODE || error.message.to_lowercase().contains("revert") {
        BlockchainRpcClientError::ExecutionReverted {
            data: error.data.as_ref().and_then(extract_revert_data),
            message: error.message,
        }
    } else {
        BlockchainRpcClientError::RpcError {
            code: error.code,
            message: error.message,
        }
    }
}

/// Extracts hex revert data from an error `data` field.
///
/// Nodes return either a hex string or an object nesting one under `data`.
fn extract_revert_data(value: &serde_json::Value) -> Option<Bytes> {
    match value {
        serde_json::Value::String(hex_data) => Bytes::from_str(hex_data).ok(),
        serde_json::Value::Object(map) => map.get("data").and_then(extract_revert_data),
        _ => None,
    }
}
