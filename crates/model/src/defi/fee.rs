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

//! Uniswap V3 fee tiers and their tick spacings.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Error returned when an integer is not one of the enabled fee tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid fee tier {0}: expected one of 100, 500, 3000, 10000")]
pub struct InvalidFeeTier(pub u32);

/// A pool fee tier, in hundredths of a basis point.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    /// 0.01%, tick spacing 1.
    Lowest,
    /// 0.05%, tick spacing 10.
    Low,
    /// 0.3%, tick spacing 60.
    Medium,
    /// 1%, tick spacing 200.
    High,
}

impl FeeTier {
    /// Returns the fee in hundredths of a basis point, as passed to the factory.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 3000,
            Self::High => 10000,
        }
    }

    /// Returns the tick spacing the factory enables for this fee.
    #[must_use]
    pub const fn tick_spacing(self) -> i32 {
        match self {
            Self::Lowest => 1,
            Self::Low => 10,
            Self::Medium => 60,
            Self::High => 200,
        }
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = InvalidFeeTier;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|tier| tier.as_u32() == value)
            .ok_or(InvalidFeeTier(value))
    }
}

impl From<FeeTier> for u32 {
    fn from(value: FeeTier) -> Self {
        value.as_u32()
    }
}

impl Display for FeeTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
