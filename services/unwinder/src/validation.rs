//! Parameter and bounds validation
//!
//! Every public entry point runs these before any arithmetic or data lookup.
//! Order: share, slippage, impact.

use unwind_types::{PolicyParameters, PositionSnapshot, ReserveSnapshot, ShareBps, UnwindError};

/// Validate the share and both policy ranges, returning the share in bps
pub fn validate_request(share: ShareBps, policy: &PolicyParameters) -> Result<u32, UnwindError> {
    let share_bps = share.validate()?;
    policy.validate()?;
    Ok(share_bps)
}

/// `lp_balance <= total_supply` and `total_supply > 0`
pub fn validate_position(position: &PositionSnapshot) -> Result<(), UnwindError> {
    if position.total_supply.is_zero() || position.lp_balance > position.total_supply {
        return Err(UnwindError::InvalidPosition {
            lp_balance: position.lp_balance,
            total_supply: position.total_supply,
        });
    }
    Ok(())
}

pub fn validate_reserves(reserves: &ReserveSnapshot) -> Result<(), UnwindError> {
    if reserves.is_empty() {
        return Err(UnwindError::EmptyReserves);
    }
    Ok(())
}
