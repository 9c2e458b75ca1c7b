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
use nova_model::defi::FeeTier;

use crate::{bootstrap::error::BootstrapError, contracts::uniswap_v3_factory::UniswapV3FactoryContract};

/// Returns the pool for `(token_a, token_b, fee)`, creating it through the factory when it
/// does not exist yet.
///
/// A pool that already exists is returned without sending anything, so calling this twice
/// with the same key sends at most one `createPool`.
///
/// # Errors
///
/// Returns an error if a factory call fails, or if the factory still reports no pool after a
/// confirmed `createPool`.
pub async fn resolve_pool(
    factory: &UniswapV3FactoryContract,
    token_a: Address,
    token_b: Address,
    fee: FeeTier,
    pair_name: &str,
) -> Result<Address, BootstrapError> {
    let existing = factory
        .get_pool(token_a, token_b, fee)
        .await
        .map_err(BootstrapError::rpc(pair_name, "getPool"))?;
    if !existing.is_zero() {
        log::info!("{pair_name}: found pool {existing} (fee {fee})");
        return Ok(existing);
    }

    log::info!("{pair_name}: no pool for fee {fee}, creating");
    factory
        .create_pool(token_a, token_b, fee)
        .await
        .map_err(BootstrapError::rpc(pair_name, "createPool"))?;

    let created = factory
        .get_pool(token_a, token_b, fee)
        .await
        .map_err(BootstrapError::rpc(pair_name, "getPool"))?;
    if created.is_zero() {
        return Err(BootstrapError::PoolNotCreated {
            pair: pair_name.to_string(),
        });
    }

    log::info!("{pair_name}: created pool {created}");
    Ok(created)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy::{
        primitives::address,
        sol_types::{SolCall, SolError},
    };

    use super::*;
    use crate::{
        contracts::{base::BaseContract, errors::LOK, uniswap_v3_factory::UniswapV3Factory},
        rpc::ConfirmationOptions,
        testing::MockRpcClient,
    };

    const FACTORY: Address = address!("0x7fD493E18f52178485d34A1500a7Fa16e8c1a2b4");
    const BTC: Address = address!("0x31a721837d8964772142e1136B8878b6608549F2");
    const BNB: Address = address!("0xE03639b06Be343BC0898FAaA8463EcF6E5c14869");

    fn factory(client: &Arc<MockRpcClient>) -> UniswapV3FactoryContract {
        let base = BaseContract::new(client.clone(), ConfirmationOptions::default());
        UniswapV3FactoryContract::new(base, FACTORY)
    }

    #[tokio::test]
    async fn test_resolve_existing_pool_sends_nothing() {
        let client = Arc::new(MockRpcClient::new());
        let pool = address!("0x1111111111111111111111111111111111111111");
        client.add_pool(BTC, BNB, 500, pool);

        let resolved = resolve_pool(&factory(&client), BNB, BTC, FeeTier::Low, "BNB-BTC")
            .await
            .unwrap();

        assert_eq!(resolved, pool);
        assert!(client.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_creates_missing_pool_once() {
        let client = Arc::new(MockRpcClient::new());
        let factory = factory(&client);

        let first = resolve_pool(&factory, BTC, BNB, FeeTier::Low, "BTC-BNB")
            .await
            .unwrap();
        let second = resolve_pool(&factory, BTC, BNB, FeeTier::Low, "BTC-BNB")
            .await
            .unwrap();

        assert!(!first.is_zero());
        assert_eq!(first, second);
        assert_eq!(client.create_pool_calls(), 1);

        let creates = client.sent_with_selector(UniswapV3Factory::createPoolCall::SELECTOR);
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].to, FACTORY);
    }

    #[tokio::test]
    async fn test_resolve_distinguishes_fee_tiers() {
        let client = Arc::new(MockRpcClient::new());
        let factory = factory(&client);

        let low = resolve_pool(&factory, BTC, BNB, FeeTier::Low, "BTC-BNB")
            .await
            .unwrap();
        let medium = resolve_pool(&factory, BTC, BNB, FeeTier::Medium, "BTC-BNB")
            .await
            .unwrap();

        assert_ne!(low, medium);
        assert_eq!(client.create_pool_calls(), 2);
    }

    #[tokio::test]
    async fn test_resolve_errors_when_pool_still_missing() {
        let client = Arc::new(MockRpcClient::new());
        client.set_skip_pool_creation(true);

        let result = resolve_pool(&factory(&client), BTC, BNB, FeeTier::Low, "BTC-BNB").await;

        match result {
            Err(BootstrapError::PoolNotCreated { pair }) => assert_eq!(pair, "BTC-BNB"),
            other => panic!("Expected PoolNotCreated, was {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_create_pool_revert_names_decoded_error() {
        let client = Arc::new(MockRpcClient::new());
        client.set_send_revert(UniswapV3Factory::createPoolCall::SELECTOR, LOK {}.abi_encode());

        let result = resolve_pool(&factory(&client), BTC, BNB, FeeTier::Low, "BTC-BNB").await;

        let error = result.unwrap_err();
        assert!(matches!(
            error,
            BootstrapError::Rpc {
                operation: "createPool",
                ..
            }
        ));
        assert_eq!(error.to_string(), "BTC-BNB: createPool failed: LOK()");
        assert_eq!(client.create_pool_calls(), 0);
    }
}
