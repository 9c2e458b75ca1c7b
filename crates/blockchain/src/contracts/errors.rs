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

//! Decoding of revert data from the position manager and pool contracts.

use std::fmt::{Display, Formatter};

use alloy::{
    primitives::U256,
    sol,
    sol_types::{Panic, Revert, SolError},
};

use crate::rpc::error::BlockchainRpcClientError;

sol! {
    error InvalidTickRange(int24 tickLower, int24 tickUpper);
    error InsufficientInputAmount();
    error PriceSlippageCheck(uint256 amount0, uint256 amount1);
    error LOK();
    error TLU();
    error TLM();
    error TUM();
    error M0();
    error M1();
    error AlreadyInitialized();
}

/// Reason string the pool's `initialize` reverts with when called twice.
const ALREADY_INITIALIZED_REASON: &str = "AI";

/// A revert decoded against the known error signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRevert {
    InvalidTickRange { tick_lower: i32, tick_upper: i32 },
    InsufficientInputAmount,
    PriceSlippageCheck { amount0: U256, amount1: U256 },
    /// Pool is locked (reentrancy guard).
    Lok,
    /// Lower tick not below upper tick.
    Tlu,
    /// Lower tick below the minimum.
    Tlm,
    /// Upper tick above the maximum.
    Tum,
    /// Token0 balance not received.
    M0,
    /// Token1 balance not received.
    M1,
    AlreadyInitialized,
    /// A standard `Error(string)` revert.
    Reason(String),
    /// A standard `Panic(uint256)` revert.
    Panic(U256),
}

impl DecodedRevert {
    /// Returns the error signature, such as `"LOK()"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InvalidTickRange { .. } => "InvalidTickRange(int24,int24)",
            Self::InsufficientInputAmount => "InsufficientInputAmount()",
            Self::PriceSlippageCheck { .. } => "PriceSlippageCheck(uint256,uint256)",
            Self::Lok => "LOK()",
            Self::Tlu => "TLU()",
            Self::Tlm => "TLM()",
            Self::Tum => "TUM()",
            Self::M0 => "M0()",
            Self::M1 => "M1()",
            Self::AlreadyInitialized => "AlreadyInitialized()",
            Self::Reason(_) => "Error(string)",
            Self::Panic(_) => "Panic(uint256)",
        }
    }
}

impl Display for DecodedRevert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTickRange {
                tick_lower,
                tick_upper,
            } => write!(f, "InvalidTickRange({tick_lower}, {tick_upper})"),
            Self::PriceSlippageCheck { amount0, amount1 } => {
                write!(f, "PriceSlippageCheck({amount0}, {amount1})")
            }
            Self::Reason(reason) => write!(f, "Error(\"{reason}\")"),
            Self::Panic(code) => write!(f, "Panic(0x{code:x})"),
            other => f.write_str(other.name()),
        }
    }
}

fn matches_selector<E: SolError>(data: &[u8]) -> bool {
    data.starts_with(&E::SELECTOR)
}

/// Decodes raw revert data against the known error signatures.
///
/// Returns `None` for empty data or an unknown selector.
#[must_use]
pub fn decode_revert(data: &[u8]) -> Option<DecodedRevert> {
    if data.len() < 4 {
        return None;
    }

    let decoded = if matches_selector::<InvalidTickRange>(data) {
        let error = InvalidTickRange::abi_decode(data).ok()?;
        DecodedRevert::InvalidTickRange {
            tick_lower: error.tickLower.as_i32(),
            tick_upper: error.tickUpper.as_i32(),
        }
    } else if matches_selector::<PriceSlippageCheck>(data) {
        let error = PriceSlippageCheck::abi_decode(data).ok()?;
        DecodedRevert::PriceSlippageCheck {
            amount0: error.amount0,
            amount1: error.amount1,
        }
    } else if matches_selector::<Revert>(data) {
        DecodedRevert::Reason(Revert::abi_decode(data).ok()?.reason)
    } else if matches_selector::<Panic>(data) {
        DecodedRevert::Panic(Panic::abi_decode(data).ok()?.code)
    } else if matches_selector::<InsufficientInputAmount>(data) {
        DecodedRevert::InsufficientInputAmount
    } else if matches_selector::<LOK>(data) {
        DecodedRevert::Lok
    } else if matches_selector::<TLU>(data) {
        DecodedRevert::Tlu
    } else if matches_selector::<TLM>(data) {
        DecodedRevert::Tlm
    } else if matches_selector::<TUM>(data) {
        DecodedRevert::Tum
    } else if matches_selector::<M0>(data) {
        DecodedRevert::M0
    } else if matches_selector::<M1>(data) {
        DecodedRevert::M1
    } else if matches_selector::<AlreadyInitialized>(data) {
        DecodedRevert::AlreadyInitialized
    } else {
        return None;
    };

    Some(decoded)
}

/// Decodes the revert carried by an RPC error, if any.
#[must_use]
pub fn decode_rpc_revert(error: &BlockchainRpcClientError) -> Option<DecodedRevert> {
    error
        .revert_data()
        .and_then(|data| decode_revert(data.as_ref()))
}

/// Describes a revert for logs: the decoded error, or the raw hex data, or the node message.
#[must_use]
pub fn describe_revert(error: &BlockchainRpcClientError) -> String {
    if let Some(decoded) = decode_rpc_revert(error) {
        return decoded.to_string();
    }
    match error.revert_data() {
        Some(data) if !data.is_empty() => format!("unknown revert 0x{}", hex::encode(data)),
        _ => error.to_string(),
    }
}

/// Returns whether the error reports a pool that is already initialized.
///
/// Matches the `AlreadyInitialized()` custom error, the pool's `Error("AI")` reason string, or
/// a node message naming `AlreadyInitialized`.
#[must_use]
pub fn is_already_initialized(error: &BlockchainRpcClientError) -> bool {
    match decode_rpc_revert(error) {
        Some(DecodedRevert::AlreadyInitialized) => true,
        Some(DecodedRevert::Reason(reason)) if reason == ALREADY_INITIALIZED_REASON => true,
        _ => error
            .revert_message()
            .is_some_and(|message| message.contains("AlreadyInitialized")),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use alloy::primitives::{Bytes, aliases::I24};
    use rstest::rstest;

    use super::*;

    fn reverted(data: Vec<u8>) -> BlockchainRpcClientError {
        BlockchainRpcClientError::ExecutionReverted {
            message: "execution reverted".to_string(),
            data: Some(Bytes::from(data)),
        }
    }

    #[rstest]
    #[case(LOK {}.abi_encode(), DecodedRevert::Lok, "LOK()")]
    #[case(TLU {}.abi_encode(), DecodedRevert::Tlu, "TLU()")]
    #[case(TLM {}.abi_encode(), DecodedRevert::Tlm, "TLM()")]
    #[case(TUM {}.abi_encode(), DecodedRevert::Tum, "TUM()")]
    #[case(M0 {}.abi_encode(), DecodedRevert::M0, "M0()")]
    #[case(M1 {}.abi_encode(), DecodedRevert::M1, "M1()")]
    #[case(
        InsufficientInputAmount {}.abi_encode(),
        DecodedRevert::InsufficientInputAmount,
        "InsufficientInputAmount()"
    )]
    #[case(
        AlreadyInitialized {}.abi_encode(),
        DecodedRevert::AlreadyInitialized,
        "AlreadyInitialized()"
    )]
    fn test_decode_unit_errors(
        #[case] data: Vec<u8>,
        #[case] expected: DecodedRevert,
        #[case] name: &str,
    ) {
        let decoded = decode_revert(&data).unwrap();
        assert_eq!(decoded, expected);
        assert_eq!(decoded.name(), name);
    }

    #[rstest]
    fn test_decode_lok_by_selector_bytes() {
        // keccak256("LOK()")[..4]
        let decoded = decode_revert(&[0xa1, 0xbf, 0x78, 0x86]).unwrap();
        assert_eq!(decoded.name(), "LOK()");
    }

    #[rstest]
    fn test_decode_invalid_tick_range() {
        let data = InvalidTickRange {
            tickLower: I24::try_from(100).unwrap(),
            tickUpper: I24::try_from(-100).unwrap(),
        }
        .abi_encode();

        let decoded = decode_revert(&data).unwrap();
        assert_eq!(
            decoded,
            DecodedRevert::InvalidTickRange {
                tick_lower: 100,
                tick_upper: -100
            }
        );
        assert_eq!(decoded.to_string(), "InvalidTickRange(100, -100)");
    }

    #[rstest]
    fn test_decode_price_slippage_check() {
        let data = PriceSlippageCheck {
            amount0: U256::from(5),
            amount1: U256::from(7),
        }
        .abi_encode();

        let decoded = decode_revert(&data).unwrap();
        assert_eq!(decoded.name(), "PriceSlippageCheck(uint256,uint256)");
        assert_eq!(decoded.to_string(), "PriceSlippageCheck(5, 7)");
    }

    #[rstest]
    fn test_decode_standard_reason_and_panic() {
        let reason = Revert::from("AI").abi_encode();
        assert_eq!(
            decode_revert(&reason),
            Some(DecodedRevert::Reason("AI".to_string()))
        );

        let panic = Panic {
            code: U256::from(0x11),
        }
        .abi_encode();
        let decoded = decode_revert(&panic).unwrap();
        assert_eq!(decoded, DecodedRevert::Panic(U256::from(0x11)));
        assert_eq!(decoded.to_string(), "Panic(0x11)");
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![0x01, 0x02])]
    #[case(vec![0xde, 0xad, 0xbe, 0xef])]
    fn test_decode_unknown_returns_none(#[case] data: Vec<u8>) {
        assert!(decode_revert(&data).is_none());
    }

    #[rstest]
    fn test_describe_revert() {
        assert_eq!(describe_revert(&reverted(LOK {}.abi_encode())), "LOK()");
        assert_eq!(
            describe_revert(&reverted(vec![0xde, 0xad, 0xbe, 0xef])),
            "unknown revert 0xdeadbeef"
        );

        let no_data = BlockchainRpcClientError::RpcError {
            code: -32000,
            message: "nonce too low".to_string(),
        };
        assert_eq!(describe_revert(&no_data), "RPC error -32000: nonce too low");
    }

    #[rstest]
    fn test_is_already_initialized() {
        assert!(is_already_initialized(&reverted(
            AlreadyInitialized {}.abi_encode()
        )));
        assert!(is_already_initialized(&reverted(
            Revert::from("AI").abi_encode()
        )));
        assert!(is_already_initialized(
            &BlockchainRpcClientError::ExecutionReverted {
                message: "execution reverted: AlreadyInitialized".to_string(),
                data: None,
            }
        ));

        assert!(!is_already_initialized(&reverted(LOK {}.abi_encode())));
        assert!(!is_already_initialized(&reverted(
            Revert::from("STF").abi_encode()
        )));
        assert!(!is_already_initialized(
            &BlockchainRpcClientError::ClientError("connection refused".to_string())
        ));
    }
}
