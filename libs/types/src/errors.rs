//! Error taxonomy for unwind and sell calculations
//!
//! Every variant is a local validation or policy failure. A returned error means
//! no result was produced; nothing is retried or partially applied.

use ethereum_types::U256;
use thiserror::Error;

/// Errors raised by the calculation engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnwindError {
    /// Share parameter outside (0, 10000] basis points
    #[error("Invalid share: {bps} bps, valid values are (0, 10000] aka 0% to 100%")]
    InvalidShare { bps: u32 },

    /// Price slippage outside [0, 300] basis points
    #[error("Invalid price slippage: {bps} bps, valid values are [0, 300] aka 0% to 3%")]
    InvalidSlippageConfig { bps: u32 },

    /// Max price impact outside (0, 600] basis points
    #[error("Invalid max price impact: {bps} bps, valid values are (0, 600] aka 0% to 6%")]
    InvalidImpactConfig { bps: u32 },

    /// Swap output falls below the impact floor derived from the no-impact reference
    #[error("Max price impact exceeded: output {actual} is below floor {floor}")]
    PriceImpactExceeded { actual: U256, floor: U256 },

    /// An intermediate value does not fit the representable range
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    /// Division by a zero supply or reserve
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// A swap was requested against a pool with a zero reserve
    #[error("Reserves must be positive")]
    EmptyReserves,

    /// Requested output meets or exceeds the output reserve
    #[error("Insufficient liquidity: output exceeds reserves")]
    InsufficientLiquidity,

    /// LP balance larger than total supply, or zero total supply
    #[error("Invalid position: lp balance {lp_balance} with total supply {total_supply}")]
    InvalidPosition { lp_balance: U256, total_supply: U256 },

    /// Sold asset is neither side of the pair
    #[error("Asset {asset} is not part of the pair")]
    AssetNotInPair { asset: String },

    /// Pair identifier unknown to the resolver
    #[error("Unknown pair {pair}")]
    UnknownPair { pair: String },

    /// No direct pair between the sold asset and its counter-asset
    #[error("No direct pair found for {token_in} {token_out}, you need to set a bridge")]
    NoPairFound { token_in: String, token_out: String },
}

impl UnwindError {
    /// True for failures caused by caller-supplied parameters rather than market state
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShare { .. }
                | Self::InvalidSlippageConfig { .. }
                | Self::InvalidImpactConfig { .. }
        )
    }
}
