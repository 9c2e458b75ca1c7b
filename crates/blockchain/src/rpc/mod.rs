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

//! RPC client abstractions for EVM network communication.
//!
//! This module defines the [`EvmRpcClient`] trait used by the contract bindings, the HTTP
//! JSON-RPC implementation with local transaction signing, and receipt polling with a timeout
//! and cancellation.

use std::{fmt::Debug, time::Duration};

use alloy::primitives::{Address, B256, Bytes};
use tokio_util::sync::CancellationToken;

use crate::rpc::{error::BlockchainRpcClientError, types::TransactionReceipt};

pub mod error;
pub mod http;
pub mod types;

/// Default time to wait for a transaction receipt.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Default interval between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The node operations the bootstrap needs: reads, gas estimation, signed sends and receipts.
///
/// All writes originate from a single signing account returned by [`EvmRpcClient::sender`].
#[async_trait::async_trait]
pub trait EvmRpcClient: Debug + Send + Sync {
    /// Returns the address of the signing account.
    fn sender(&self) -> Address;

    /// Executes an `eth_call` against the latest block and returns the raw return data.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockchainRpcClientError>;

    /// Estimates the gas for a transaction from the sender.
    async fn estimate_gas(&self, to: Address, data: Bytes)
    -> Result<u64, BlockchainRpcClientError>;

    /// Signs and submits a transaction, returning its hash without waiting for inclusion.
    ///
    /// When `gas_limit` is `None` the client estimates it.
    async fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> Result<B256, BlockchainRpcClientError>;

    /// Fetches the receipt of a transaction, or `None` while it is pending.
    async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>, BlockchainRpcClientError>;
}

/// How long and how often to poll for a receipt, and the token that aborts the wait.
#[derive(Debug, Clone)]
pub struct ConfirmationOptions {
    /// Maximum time to wait for a receipt.
    pub timeout: Duration,
    /// Delay between receipt polls.
    pub poll_interval: Duration,
    /// Cancels the wait when triggered.
    pub cancellation: CancellationToken,
}

impl ConfirmationOptions {
    /// Creates a new [`ConfirmationOptions`] instance.
    #[must_use]
    pub const fn new(
        timeout: Duration,
        poll_interval: Duration,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            timeout,
            poll_interval,
            cancellation,
        }
    }
}

impl Default for ConfirmationOptions {
    fn default() -> Self {
        Self::new(
            DEFAULT_CONFIRMATION_TIMEOUT,
            DEFAULT_POLL_INTERVAL,
            CancellationToken::new(),
        )
    }
}

/// Polls for the receipt of `tx_hash` until it is available.
///
/// The receipt is returned whatever its status; callers decide how to treat a revert.
///
/// # Errors
///
/// Returns an error if:
/// - No receipt arrives within `options.timeout`
///   ([`BlockchainRpcClientError::ConfirmationTimeout`]).
/// - `options.cancellation` is triggered first ([`BlockchainRpcClientError::Cancelled`]).
/// - A receipt request fails.
pub async fn await_confirmation(
    client: &dyn EvmRpcClient,
    tx_hash: B256,
    options: &ConfirmationOptions,
) -> Result<TransactionReceipt, BlockchainRpcClientError> {
    let poll = poll_receipt(client, tx_hash, options.poll_interval);

    tokio::select! {
        () = options.cancellation.cancelled() => {
            Err(BlockchainRpcClientError::Cancelled { tx_hash })
        }
        result = tokio::time::timeout(options.timeout, poll) => match result {
            Ok(receipt) => receipt,
            Err(_) => Err(BlockchainRpcClientError::ConfirmationTimeout {
                tx_hash,
                timeout: options.timeout,
            }),
        },
    }
}

async fn poll_receipt(
    client: &dyn EvmRpcClient,
    tx_hash: B256,
    poll_interval: Duration,
) -> Result<TransactionReceipt, BlockchainRpcClientError> {
    loop {
        if let Some(receipt) = client.get_transaction_receipt(tx_hash).await? {
            return Ok(receipt);
        }
        log::debug!("Transaction {tx_hash} pending");
        tokio::time::sleep(poll_interval).await;
    }
}
