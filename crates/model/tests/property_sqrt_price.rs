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

//! Property-based tests for sqrt-price encoding and tick conversion.
//!
//! These tests verify invariants that should hold for any reserve ratio:
//! - The encoded value is the floor integer square root of the Q192 ratio
//! - Swapping the arguments inverts the ratio
//! - Tick/sqrt-price conversion round-trips

use alloy_primitives::{U256, U512};
use nova_model::defi::tick_map::{
    MAX_TICK, MIN_TICK, encode_sqrt_price, encode_sqrt_ratio_x96, full_math::Q96_U160,
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;

proptest! {
    /// Property: the result r satisfies r^2 <= ratio < (r + 1)^2.
    #[rstest]
    fn encoded_value_is_floor_sqrt_of_ratio(amount1 in 1u64..=u64::MAX, amount0 in 1u64..=u64::MAX) {
        let root = encode_sqrt_ratio_x96(U256::from(amount1), U256::from(amount0)).unwrap();

        let ratio = (U512::from(amount1) << 192) / U512::from(amount0);
        let root = U512::from(root);
        let next = root + U512::from(1u8);

        prop_assert!(root * root <= ratio);
        prop_assert!(ratio < next * next);
    }

    /// Property: encoding (a, b) and (b, a) gives reciprocal values whose product is 2^192.
    #[rstest]
    fn swapping_arguments_inverts_ratio(amount1 in 1u64..=u64::MAX, amount0 in 1u64..=u64::MAX) {
        let forward = encode_sqrt_ratio_x96(U256::from(amount1), U256::from(amount0)).unwrap();
        let inverse = encode_sqrt_ratio_x96(U256::from(amount0), U256::from(amount1)).unwrap();

        let forward = U512::from(forward);
        let inverse = U512::from(inverse);
        let product = forward * inverse;
        let q192 = U512::from(1u8) << 192;

        // Both roots round down, so the product never exceeds 2^192
        prop_assert!(product <= q192);
        prop_assert!(q192 - product <= (forward + inverse) * U512::from(2u8) + U512::from(4u8));

        match amount1.cmp(&amount0) {
            std::cmp::Ordering::Greater => prop_assert!(forward > inverse),
            std::cmp::Ordering::Less => prop_assert!(forward < inverse),
            std::cmp::Ordering::Equal => {
                prop_assert_eq!(forward, U512::from(Q96_U160));
                prop_assert_eq!(inverse, U512::from(Q96_U160));
            }
        }
    }

    /// Property: scaling both reserves to the same decimals leaves the raw ratio unchanged.
    #[rstest]
    fn equal_decimals_match_raw_ratio(
        quote in 1u64..=1_000_000_000u64,
        base in 1u64..=1_000_000_000u64,
        decimals in 0u8..=18,
    ) {
        let encoded = encode_sqrt_price(Decimal::from(quote), Decimal::from(base), decimals, decimals).unwrap();
        let raw = encode_sqrt_ratio_x96(U256::from(quote), U256::from(base)).unwrap();
        prop_assert_eq!(encoded, raw);
    }

    /// Property: get_tick_at_sqrt_ratio inverts get_sqrt_ratio_at_tick.
    #[rstest]
    fn tick_round_trip(tick in MIN_TICK..MAX_TICK) {
        let sqrt_price = get_sqrt_ratio_at_tick(tick);
        prop_assert_eq!(get_tick_at_sqrt_ratio(sqrt_price), tick);
    }

    /// Property: sqrt prices increase strictly with the tick.
    #[rstest]
    fn sqrt_ratio_is_monotonic(tick in MIN_TICK..MAX_TICK) {
        prop_assert!(get_sqrt_ratio_at_tick(tick) < get_sqrt_ratio_at_tick(tick + 1));
    }
}
