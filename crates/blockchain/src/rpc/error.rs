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

use std::time::Duration;

use alloy::primitives::{B256, Bytes};
use thiserror::Error;

/// Represents errors that can occur when interacting with a blockchain RPC client.
#[derive(Debug, Clone, Error)]
pub enum BlockchainRpcClientError {
    /// Occurs when the RPC client encounters a client-level error, such as connection failures.
    #[error("Client error: {0}")]
    ClientError(String),
    /// Occurs when input parameters to an RPC call are invalid.
    #[error("Invalid RPC parameters: {0}")]
    InvalidParameters(String),
    /// Occurs when decoding contract ABI data fails.
    #[error("Decoding error: {0}")]
    AbiDecodingError(String),
    /// Occurs when parsing an RPC message fails.
    #[error("Parsing error: {0}")]
    MessageParsingError(String),
    /// The node returned a JSON-RPC error object that is not a revert.
    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },
    /// A call or gas estimation reverted, with the raw revert data when the node provides it.
    #[error("Execution reverted: {message}")]
    ExecutionReverted {
        message: String,
        data: Option<Bytes>,
    },
    /// A mined transaction has status 0.
    #[error("Transaction {tx_hash} reverted on chain")]
    TransactionReverted { tx_hash: B256 },
    /// No receipt was observed before the confirmation timeout.
    #[error("Transaction {tx_hash} not confirmed within {timeout:?}")]
    ConfirmationTimeout { tx_hash: B256, timeout: Duration },
    /// Waiting for a receipt was cancelled.
    #[error("Confirmation of transaction {tx_hash} cancelled")]
    Cancelled { tx_hash: B256 },
    /// Signing a transaction or loading the signing key failed.
    #[error("Signer error: {0}")]
    SignerError(String),
}

impl BlockchainRpcClientError {
    /// Returns the raw revert data when this error is an execution revert that carries it.
    #[must_use]
    pub fn revert_data(&self) -> Option<&Bytes> {
        match self {
            Self::ExecutionReverted { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Returns the node's message when this error is an execution revert.
    #[must_use]
    pub fn revert_message(&self) -> Option<&str> {
        match self {
            Self::ExecutionReverted { message, .. } => Some(message),
            _ => None,
        }
    }
}
