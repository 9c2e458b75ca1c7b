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

//! An in-memory [`EvmRpcClient`] that emulates the factory, position manager, pool and test
//! tokens by dispatching on 4-byte selectors.

use std::{collections::HashMap, sync::Mutex};

use alloy::{
    primitives::{Address, B256, Bytes, U64, U160, U256, aliases::I24},
    sol_types::SolCall,
};
use nova_model::defi::tick_map::get_tick_at_sqrt_ratio;

use crate::{
    contracts::{
        erc20::ERC20, position_manager::NonfungiblePositionManager,
        uniswap_v3_factory::UniswapV3Factory, uniswap_v3_pool::UniswapV3Pool,
    },
    rpc::{EvmRpcClient, error::BlockchainRpcClientError, types::TransactionReceipt},
};

pub const MOCK_SENDER: Address = Address::repeat_byte(0xAA);
pub const MINT_GAS_ESTIMATE: u64 = 250_000;
const DEFAULT_GAS_ESTIMATE: u64 = 100_000;

/// A transaction the mock accepted.
#[derive(Debug, Clone)]
pub struct SentTransaction {
    pub to: Address,
    pub selector: [u8; 4],
    pub data: Bytes,
    pub gas_limit: u64,
}

#[derive(Debug, Default)]
struct MockState {
    pools: HashMap<(Address, Address, u32), Address>,
    slot0: HashMap<Address, U160>,
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    sent: Vec<SentTransaction>,
    receipts: HashMap<B256, TransactionReceipt>,
    create_pool_calls: usize,
    skip_pool_creation: bool,
    initialize_revert: Option<BlockchainRpcClientError>,
    mint_reverts: HashMap<(Address, Address), Bytes>,
    send_reverts: HashMap<[u8; 4], Bytes>,
    revert_mints_on_chain: bool,
    never_mine: bool,
    receipt_delay_polls: u32,
    receipt_polls: u32,
}

#[derive(Debug, Default)]
pub struct MockRpcClient {
    state: Mutex<MockState>,
}

fn selector(data: &[u8]) -> [u8; 4] {
    let mut selector = [0u8; 4];
    if data.len() >= 4 {
        selector.copy_from_slice(&data[..4]);
    }
    selector
}

fn pool_key(token_a: Address, token_b: Address, fee: u32) -> (Address, Address, u32) {
    if token_a < token_b {
        (token_a, token_b, fee)
    } else {
        (token_b, token_a, fee)
    }
}

fn reverted(data: Bytes) -> BlockchainRpcClientError {
    BlockchainRpcClientError::ExecutionReverted {
        message: "execution reverted".to_string(),
        data: Some(data),
    }
}

fn decode<C: SolCall>(data: &[u8]) -> Result<C, BlockchainRpcClientError> {
    C::abi_decode(data).map_err(|e| BlockchainRpcClientError::AbiDecodingError(e.to_string()))
}

impl MockRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_never_mine(&self, value: bool) {
        self.state.lock().unwrap().never_mine = value;
    }

    pub fn set_receipt_delay_polls(&self, polls: u32) {
        self.state.lock().unwrap().receipt_delay_polls = polls;
    }

    pub fn receipt_polls(&self) -> u32 {
        self.state.lock().unwrap().receipt_polls
    }

    /// Registers an existing pool so `getPool` finds it.
    pub fn add_pool(&self, token_a: Address, token_b: Address, fee: u32, pool: Address) {
        self.state
            .lock()
            .unwrap()
            .pools
            .insert(pool_key(token_a, token_b, fee), pool);
    }

    /// Makes `createPool` succeed without registering a pool.
    pub fn set_skip_pool_creation(&self, value: bool) {
        self.state.lock().unwrap().skip_pool_creation = value;
    }

    /// Makes `createAndInitializePoolIfNecessary` fail with `error`.
    pub fn set_initialize_error(&self, error: Option<BlockchainRpcClientError>) {
        self.state.lock().unwrap().initialize_revert = error;
    }

    /// Makes the mint gas estimate for `(token0, token1)` revert with `data`.
    pub fn set_mint_revert(&self, token0: Address, token1: Address, data: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .mint_reverts
            .insert((token0, token1), Bytes::from(data));
    }

    /// Makes every transaction with `selector` revert with `data` before it is sent.
    pub fn set_send_revert(&self, selector: [u8; 4], data: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .send_reverts
            .insert(selector, Bytes::from(data));
    }

    /// Makes mints mine with status 0.
    pub fn set_revert_mints_on_chain(&self, value: bool) {
        self.state.lock().unwrap().revert_mints_on_chain = value;
    }

    pub fn set_balance(&self, token: Address, owner: Address, amount: U256) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert((token, owner), amount);
    }

    pub fn set_allowance(&self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.state
            .lock()
            .unwrap()
            .allowances
            .insert((token, owner, spender), amount);
    }

    pub fn set_slot0(&self, pool: Address, sqrt_price_x96: U160) {
        self.state.lock().unwrap().slot0.insert(pool, sqrt_price_x96);
    }

    pub fn pool(&self, token_a: Address, token_b: Address, fee: u32) -> Option<Address> {
        self.state
            .lock()
            .unwrap()
            .pools
            .get(&pool_key(token_a, token_b, fee))
            .copied()
    }

    pub fn create_pool_calls(&self) -> usize {
        self.state.lock().unwrap().create_pool_calls
    }

    pub fn sent_transactions(&self) -> Vec<SentTransaction> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Returns the sent transactions whose selector is `selector`.
    pub fn sent_with_selector(&self, selector: [u8; 4]) -> Vec<SentTransaction> {
        self.sent_transactions()
            .into_iter()
            .filter(|tx| tx.selector == selector)
            .collect()
    }

    fn handle_call(&self, to: Address, data: &[u8]) -> Result<Bytes, BlockchainRpcClientError> {
        let state = self.state.lock().unwrap();
        let encoded = match selector(data) {
            UniswapV3Factory::getPoolCall::SELECTOR => {
                let call = decode::<UniswapV3Factory::getPoolCall>(data)?;
                let pool = state
                    .pools
                    .get(&pool_key(call.tokenA, call.tokenB, call.fee.to::<u32>()))
                    .copied()
                    .unwrap_or(Address::ZERO);
                UniswapV3Factory::getPoolCall::abi_encode_returns(&pool)
            }
            ERC20::balanceOfCall::SELECTOR => {
                let call = decode::<ERC20::balanceOfCall>(data)?;
                let balance = state
                    .balances
                    .get(&(to, call.owner))
                    .copied()
                    .unwrap_or_default();
                ERC20::balanceOfCall::abi_encode_returns(&balance)
            }
            ERC20::allowanceCall::SELECTOR => {
                let call = decode::<ERC20::allowanceCall>(data)?;
                let allowance = state
                    .allowances
                    .get(&(to, call.owner, call.spender))
                    .copied()
                    .unwrap_or_default();
                ERC20::allowanceCall::abi_encode_returns(&allowance)
            }
            UniswapV3Pool::slot0Call::SELECTOR => {
                let sqrt_price_x96 = state.slot0.get(&to).copied().unwrap_or_default();
                let tick = if sqrt_price_x96.is_zero() {
                    0
                } else {
                    get_tick_at_sqrt_ratio(sqrt_price_x96)
                };
                let slot0 = UniswapV3Pool::Slot0Data {
                    sqrtPriceX96: sqrt_price_x96,
                    tick: I24::try_from(tick).unwrap(),
                    observationIndex: 0,
                    observationCardinality: 1,
                    observationCardinalityNext: 1,
                    feeProtocol: 0,
                    unlocked: true,
                };
                UniswapV3Pool::slot0Call::abi_encode_returns(&slot0)
            }
            other => {
                return Err(BlockchainRpcClientError::ClientError(format!(
                    "Unexpected eth_call selector 0x{}",
                    hex::encode(other)
                )));
            }
        };
        Ok(Bytes::from(encoded))
    }

    fn handle_estimate(&self, data: &[u8]) -> Result<u64, BlockchainRpcClientError> {
        let state = self.state.lock().unwrap();
        match selector(data) {
            NonfungiblePositionManager::mintCall::SELECTOR => {
                let call = decode::<NonfungiblePositionManager::mintCall>(data)?;
                let key = (call.params.token0, call.params.token1);
                match state.mint_reverts.get(&key) {
                    Some(revert) => Err(reverted(revert.clone())),
                    None => Ok(MINT_GAS_ESTIMATE),
                }
            }
            NonfungiblePositionManager::createAndInitializePoolIfNecessaryCall::SELECTOR => {
                match &state.initialize_revert {
                    Some(error) => Err(error.clone()),
                    None => Ok(DEFAULT_GAS_ESTIMATE),
                }
            }
            _ => Ok(DEFAULT_GAS_ESTIMATE),
        }
    }

    fn apply_transaction(
        &self,
        state: &mut MockState,
        to: Address,
        data: &[u8],
    ) -> Result<bool, BlockchainRpcClientError> {
        match selector(data) {
            UniswapV3Factory::createPoolCall::SELECTOR => {
                let call = decode::<UniswapV3Factory::createPoolCall>(data)?;
                state.create_pool_calls += 1;
                if !state.skip_pool_creation {
                    let key = pool_key(call.tokenA, call.tokenB, call.fee.to::<u32>());
                    let next = 0xB000u16 + state.pools.len() as u16;
                    let pool = Address::left_padding_from(&next.to_be_bytes());
                    state.pools.entry(key).or_insert(pool);
                }
            }
            NonfungiblePositionManager::createAndInitializePoolIfNecessaryCall::SELECTOR => {
                let call = decode::<
                    NonfungiblePositionManager::createAndInitializePoolIfNecessaryCall,
                >(data)?;
                let key = pool_key(call.token0, call.token1, call.fee.to::<u32>());
                let next = 0xB000u16 + state.pools.len() as u16;
                let pool = *state
                    .pools
                    .entry(key)
                    .or_insert_with(|| Address::left_padding_from(&next.to_be_bytes()));
                state.slot0.entry(pool).or_insert(call.sqrtPriceX96);
            }
            NonfungiblePositionManager::mintCall::SELECTOR => {
                return Ok(!state.revert_mints_on_chain);
            }
            ERC20::mintCall::SELECTOR => {
                let call = decode::<ERC20::mintCall>(data)?;
                let balance = state.balances.entry((to, call.to)).or_default();
                *balance += call.amount;
            }
            ERC20::approveCall::SELECTOR => {
                let call = decode::<ERC20::approveCall>(data)?;
                state
                    .allowances
                    .insert((to, MOCK_SENDER, call.spender), call.amount);
            }
            _ => {}
        }
        Ok(true)
    }
}

#[async_trait::async_trait]
impl EvmRpcClient for MockRpcClient {
    fn sender(&self) -> Address {
        MOCK_SENDER
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockchainRpcClientError> {
        self.handle_call(to, &data)
    }

    async fn estimate_gas(
        &self,
        _to: Address,
        data: Bytes,
    ) -> Result<u64, BlockchainRpcClientError> {
        self.handle_estimate(&data)
    }

    async fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> Result<B256, BlockchainRpcClientError> {
        if let Some(revert) = self.state.lock().unwrap().send_reverts.get(&selector(&data)) {
            return Err(reverted(revert.clone()));
        }
        let gas_limit = match gas_limit {
            Some(gas_limit) => gas_limit,
            None => self.handle_estimate(&data)?,
        };

        let mut state = self.state.lock().unwrap();
        let success = self.apply_transaction(&mut state, to, &data)?;

        let nonce = state.sent.len() as u64;
        let tx_hash = B256::left_padding_from(&(nonce + 1).to_be_bytes());
        state.sent.push(SentTransaction {
            to,
            selector: selector(&data),
            data,
            gas_limit,
        });
        state.receipts.insert(
            tx_hash,
            TransactionReceipt {
                transaction_hash: tx_hash,
                block_number: Some(U64::from(nonce + 1)),
                gas_used: U64::from(gas_limit),
                status: Some(U64::from(u64::from(success))),
            },
        );
        Ok(tx_hash)
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>, BlockchainRpcClientError> {
        let mut state = self.state.lock().unwrap();
        state.receipt_polls += 1;
        if state.never_mine {
            return Ok(None);
        }
        if state.receipt_delay_polls > 0 {
            state.receipt_delay_polls -= 1;
            return Ok(None);
        }
        Ok(state.receipts.get(&tx_hash).cloned())
    }
}
