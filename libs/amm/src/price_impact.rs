//! Price-impact guard
//!
//! A swap is rejected when its output falls further below a caller-supplied
//! no-impact reference than the configured ceiling allows. Callers choose the
//! reference: an unwind compares against the converted amount itself, a direct
//! sale against the spot-price quote.

use crate::v2_math::V2Math;
use tracing::warn;
use unwind_types::{ImpactBps, UnwindError, BPS_DENOMINATOR, U256};

/// Lowest output accepted for `reference_out`: `reference_out * (10000 - bps) / 10000`
pub fn impact_floor(reference_out: U256, max_impact: ImpactBps) -> Result<U256, UnwindError> {
    let bps = max_impact.validate()?;
    V2Math::mul_div(
        reference_out,
        U256::from(BPS_DENOMINATOR - bps),
        U256::from(BPS_DENOMINATOR),
    )
}

/// Fail with `PriceImpactExceeded` when `actual_out` is below the impact floor
///
/// Output exactly at the floor is accepted.
pub fn check_impact(
    actual_out: U256,
    reference_out: U256,
    max_impact: ImpactBps,
) -> Result<(), UnwindError> {
    let floor = impact_floor(reference_out, max_impact)?;
    if actual_out < floor {
        warn!(
            %actual_out,
            %reference_out,
            %floor,
            shortfall_bps = %shortfall_bps(actual_out, reference_out),
            max_impact_bps = max_impact.bps(),
            "max price impact exceeded"
        );
        return Err(UnwindError::PriceImpactExceeded {
            actual: actual_out,
            floor,
        });
    }
    Ok(())
}

/// Shortfall of `actual_out` versus `reference_out` in bps, rounded down; zero when not short
pub fn shortfall_bps(actual_out: U256, reference_out: U256) -> U256 {
    if reference_out.is_zero() || actual_out >= reference_out {
        return U256::zero();
    }
    // reference_out > 0 and the quotient is at most 10000
    V2Math::mul_div(
        reference_out - actual_out,
        U256::from(BPS_DENOMINATOR),
        reference_out,
    )
    .unwrap_or_default()
}
