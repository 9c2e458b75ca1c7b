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

use alloy::primitives::Address;
use thiserror::Error;

use crate::{
    bootstrap::config::ConfigError,
    contracts::{errors::describe_revert, uniswap_v3_pool::UniswapV3PoolError},
    rpc::error::BlockchainRpcClientError,
};

/// Errors raised while bootstrapping a pair. Every pair-level variant names the pair.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid bootstrap config: {0}")]
    Config(#[from] ConfigError),
    #[error("{pair}: token '{symbol}' is not configured")]
    UnknownToken { pair: String, symbol: String },
    #[error("{pair}: {reason}")]
    InvalidInput { pair: String, reason: String },
    /// `detail` is the decoded revert, the raw revert data, or the node message.
    #[error("{pair}: {operation} failed: {detail}")]
    Rpc {
        pair: String,
        operation: &'static str,
        detail: String,
        #[source]
        source: BlockchainRpcClientError,
    },
    #[error("{pair}: factory still returns the zero address after createPool")]
    PoolNotCreated { pair: String },
    #[error("{pair}: mint gas estimation reverted with {revert}")]
    MintEstimationReverted {
        pair: String,
        revert: String,
        #[source]
        source: BlockchainRpcClientError,
    },
    #[error("{pair}: reading pool {pool} failed: {source}")]
    Pool {
        pair: String,
        pool: Address,
        #[source]
        source: UniswapV3PoolError,
    },
}

impl BootstrapError {
    pub(crate) fn rpc_failure(
        pair: impl Into<String>,
        operation: &'static str,
        source: BlockchainRpcClientError,
    ) -> Self {
        Self::Rpc {
            pair: pair.into(),
            operation,
            detail: describe_revert(&source),
            source,
        }
    }

    pub(crate) fn rpc<'a>(
        pair: &'a str,
        operation: &'static str,
    ) -> impl FnOnce(BlockchainRpcClientError) -> Self + 'a {
        move |source| Self::rpc_failure(pair, operation, source)
    }

    pub(crate) fn invalid_input(pair: &str) -> impl FnOnce(anyhow::Error) -> Self + '_ {
        move |e| Self::InvalidInput {
            pair: pair.to_string(),
            reason: e.to_string(),
        }
    }
}
