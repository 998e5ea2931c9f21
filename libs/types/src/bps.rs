//! Basis-point parameter types
//!
//! Shares, price slippage and max price impact are all carried in basis points
//! (10000 bps = 100%). The legacy tooling passed slippage and impact on a
//! parts-per-1000 scale (10 = 1%); [`SlippageBps::from_per_mille`] and
//! [`ImpactBps::from_per_mille`] are the only conversion points from that scale.
//!
//! Construction never validates. Ranges are checked by `validate()` on every use,
//! because session state may be updated between calculations.

use crate::errors::UnwindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 100% in basis points
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Upper bound for price slippage (3%)
pub const MAX_SLIPPAGE_BPS: u32 = 300;

/// Upper bound for max price impact (6%)
pub const MAX_IMPACT_BPS: u32 = 600;

const BPS_PER_MILLE: u32 = 10;

macro_rules! define_bps {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(bps: u32) -> Self {
                Self(bps)
            }

            /// Convert from the legacy parts-per-1000 scale (10 = 1%)
            pub const fn from_per_mille(per_mille: u32) -> Self {
                Self(per_mille.saturating_mul(BPS_PER_MILLE))
            }

            pub const fn bps(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} bps", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(bps: u32) -> Self {
                Self(bps)
            }
        }
    };
}

define_bps! {
    /// Portion of an LP or token balance to withdraw, valid in (0, 10000]
    ShareBps
}

define_bps! {
    /// Haircut applied on top of a computed output, valid in [0, 300]
    SlippageBps
}

define_bps! {
    /// Largest accepted shortfall versus the no-impact reference, valid in (0, 600]
    ImpactBps
}

impl ShareBps {
    pub const FULL: Self = Self(BPS_DENOMINATOR);

    /// Convert from a whole percent (the legacy 0-100 share scale)
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent.saturating_mul(100))
    }

    pub fn validate(self) -> Result<u32, UnwindError> {
        if self.0 == 0 || self.0 > BPS_DENOMINATOR {
            return Err(UnwindError::InvalidShare { bps: self.0 });
        }
        Ok(self.0)
    }
}

impl SlippageBps {
    pub const ZERO: Self = Self(0);

    pub fn validate(self) -> Result<u32, UnwindError> {
        if self.0 > MAX_SLIPPAGE_BPS {
            return Err(UnwindError::InvalidSlippageConfig { bps: self.0 });
        }
        Ok(self.0)
    }
}

impl ImpactBps {
    pub fn validate(self) -> Result<u32, UnwindError> {
        if self.0 == 0 || self.0 > MAX_IMPACT_BPS {
            return Err(UnwindError::InvalidImpactConfig { bps: self.0 });
        }
        Ok(self.0)
    }
}

/// Policy applied to every unwind and sell calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Reject swaps whose output falls more than this below the reference
    pub max_price_impact: ImpactBps,
    /// Haircut applied to the swap output to form the minimum out
    pub price_slippage: SlippageBps,
}

impl PolicyParameters {
    pub const fn new(max_price_impact: ImpactBps, price_slippage: SlippageBps) -> Self {
        Self {
            max_price_impact,
            price_slippage,
        }
    }

    /// Check both ranges, slippage first
    pub fn validate(&self) -> Result<(), UnwindError> {
        self.price_slippage.validate()?;
        self.max_price_impact.validate()?;
        Ok(())
    }
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self {
            max_price_impact: ImpactBps::new(100), // 1%
            price_slippage: SlippageBps::ZERO,
        }
    }
}
