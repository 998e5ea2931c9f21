//! Slippage haircut applied on top of a computed output

use crate::v2_math::V2Math;
use unwind_types::{SlippageBps, UnwindError, BPS_DENOMINATOR, U256};

/// Reduce `amount` by the slippage tolerance
///
/// `amount * (10000 - bps) / 10000`, floored. Identical to the legacy
/// `amount * (1000 - per_mille) / 1000` whenever bps is a multiple of 10.
/// Fails with `InvalidSlippageConfig` outside [0, 300] bps.
pub fn apply_slippage(amount: U256, slippage: SlippageBps) -> Result<U256, UnwindError> {
    let bps = slippage.validate()?;
    V2Math::mul_div(
        amount,
        U256::from(BPS_DENOMINATOR - bps),
        U256::from(BPS_DENOMINATOR),
    )
}
