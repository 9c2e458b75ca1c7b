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

use std::fmt::Display;

use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

use super::tick_math::{MAX_TICK, MIN_TICK, max_usable_tick, min_usable_tick, tick_to_price};

/// Default half-width of a seeded position, in multiples of the tick spacing.
pub const DEFAULT_HALF_WIDTH_SPACINGS: u32 = 50;

/// A concentrated-liquidity position range `[lower, upper)` aligned to a pool's tick spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    /// The lower tick bound (inclusive).
    pub lower: i32,
    /// The upper tick bound (exclusive).
    pub upper: i32,
}

impl TickRange {
    /// Creates a new validated [`TickRange`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tick_spacing` is not positive.
    /// - Either bound is not a multiple of `tick_spacing`.
    /// - `lower >= upper`.
    /// - Either bound lies outside `[MIN_TICK, MAX_TICK]`.
    pub fn new(lower: i32, upper: i32, tick_spacing: i32) -> anyhow::Result<Self> {
        ensure!(tick_spacing > 0, "Tick spacing must be positive, was {tick_spacing}");
        ensure!(
            lower % tick_spacing == 0 && upper % tick_spacing == 0,
            "Ticks [{lower}, {upper}) are not aligned to spacing {tick_spacing}"
        );
        ensure!(lower < upper, "Lower tick {lower} must be below upper tick {upper}");
        ensure!(
            lower >= MIN_TICK && upper <= MAX_TICK,
            "Ticks [{lower}, {upper}) exceed bounds [{MIN_TICK}, {MAX_TICK}]"
        );
        Ok(Self { lower, upper })
    }

    /// Builds the range centered on `current_tick`.
    ///
    /// Each bound is `floor((current_tick ± spacing * half_width_spacings) / spacing) * spacing`,
    /// then clamped to the usable ticks for the spacing.
    ///
    /// # Errors
    ///
    /// Returns an error if `tick_spacing` or `half_width_spacings` is zero, or if the clamped
    /// range is not valid.
    pub fn around_tick(
        current_tick: i32,
        tick_spacing: i32,
        half_width_spacings: u32,
    ) -> anyhow::Result<Self> {
        if tick_spacing <= 0 {
            bail!("Tick spacing must be positive, was {tick_spacing}");
        }
        if half_width_spacings == 0 {
            bail!("Half-width must be at least one tick spacing");
        }

        let half_width = i64::from(tick_spacing) * i64::from(half_width_spacings);
        let spacing = i64::from(tick_spacing);
        let current = i64::from(current_tick);

        let floor_to_spacing = |tick: i64| tick.div_euclid(spacing) * spacing;
        let lower =
            floor_to_spacing(current - half_width).max(i64::from(min_usable_tick(tick_spacing)));
        let upper =
            floor_to_spacing(current + half_width).min(i64::from(max_usable_tick(tick_spacing)));

        // Both values are clamped into the i32 tick domain above
        Self::new(lower as i32, upper as i32, tick_spacing)
    }

    /// Returns whether `tick` lies within `[lower, upper)`, the range where a position is active.
    #[must_use]
    pub const fn contains(&self, tick: i32) -> bool {
        self.lower <= tick && tick < self.upper
    }

    /// Returns the width of the range in ticks.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.upper - self.lower
    }

    /// Returns the raw price at the lower bound, for display only.
    #[must_use]
    pub fn lower_price(&self) -> f64 {
        tick_to_price(self.lower)
    }

    /// Returns the raw price at the upper bound, for display only.
    #[must_use]
    pub fn upper_price(&self) -> f64 {
        tick_to_price(self.upper)
    }
}

impl Display for TickRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
