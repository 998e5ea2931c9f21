//! LP-share unwind calculator
//!
//! Burning LP tokens returns both constituents in pool proportion. We keep the
//! preferred one and swap the other into it against the reserves that remain
//! after the burn, so the minimum out is denominated in the retained asset.

use crate::preference::prefer_retain;
use crate::validation::{validate_position, validate_request, validate_reserves};
use tracing::debug;
use unwind_amm::{apply_slippage, check_impact, AmmPool, V2Math};
use unwind_types::{
    PairSide, PairSnapshot, PolicyParameters, PositionSnapshot, PreferenceList, ReserveSnapshot,
    ShareBps, SlippageBps, UnwindError, UnwindResult, BPS_DENOMINATOR, U256,
};

/// Amounts released by burning part of an LP position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposition {
    /// LP tokens burned
    pub lp_amount: U256,
    pub amount0: U256,
    pub amount1: U256,
    /// Pool reserves after the burn
    pub remaining: ReserveSnapshot,
}

impl Decomposition {
    pub fn amount(&self, side: PairSide) -> U256 {
        match side {
            PairSide::Token0 => self.amount0,
            PairSide::Token1 => self.amount1,
        }
    }
}

/// Split `share_bps` of an LP position into its two constituents
///
/// Each constituent is floored independently; the rounding dust stays in the pool.
pub fn decompose(
    position: &PositionSnapshot,
    reserves: &ReserveSnapshot,
    share_bps: u32,
) -> Result<Decomposition, UnwindError> {
    let lp_amount = V2Math::mul_div(
        position.lp_balance,
        U256::from(share_bps),
        U256::from(BPS_DENOMINATOR),
    )?;
    let amount0 = V2Math::mul_div(lp_amount, reserves.reserve0, position.total_supply)?;
    let amount1 = V2Math::mul_div(lp_amount, reserves.reserve1, position.total_supply)?;

    let remaining = ReserveSnapshot {
        reserve0: reserves
            .reserve0
            .checked_sub(amount0)
            .ok_or(UnwindError::ArithmeticOverflow {
                operation: "remaining reserve0",
            })?,
        reserve1: reserves
            .reserve1
            .checked_sub(amount1)
            .ok_or(UnwindError::ArithmeticOverflow {
                operation: "remaining reserve1",
            })?,
    };

    Ok(Decomposition {
        lp_amount,
        amount0,
        amount1,
        remaining,
    })
}

/// Minimum output for unwinding `share` of an LP position into one asset
///
/// The non-retained constituent is swapped into the retained one. That swap is
/// rejected when its output falls more than `max_price_impact` below the
/// converted amount itself, then haircut by `price_slippage`. The retained
/// constituent is added unconverted.
pub fn unwind(
    position: &PositionSnapshot,
    pair: &PairSnapshot,
    preferences: &PreferenceList,
    policy: PolicyParameters,
    share: ShareBps,
) -> Result<UnwindResult, UnwindError> {
    let share_bps = validate_request(share, &policy)?;
    validate_position(position)?;
    validate_reserves(&pair.reserves)?;

    let parts = decompose(position, &pair.reserves, share_bps)?;
    let retained = prefer_retain(&pair.token0, &pair.token1, preferences);
    let converted = retained.other();

    let amount_converted = parts.amount(converted);
    let swap_out = parts.remaining.get_amount_out(converted, amount_converted)?;
    check_impact(swap_out, amount_converted, policy.max_price_impact)?;

    let amount_kept = parts.amount(retained);
    let minimum_out = apply_slippage(swap_out, policy.price_slippage)?
        .checked_add(amount_kept)
        .ok_or(UnwindError::ArithmeticOverflow {
            operation: "unwind minimum out",
        })?;

    debug!(
        lp_amount = %parts.lp_amount,
        amount0 = %parts.amount0,
        amount1 = %parts.amount1,
        %swap_out,
        %minimum_out,
        retained_asset = %pair.asset(retained),
        "unwind computed"
    );

    Ok(UnwindResult {
        amount_withdrawn: parts.lp_amount,
        minimum_out,
        retained,
        retained_asset: pair.asset(retained).clone(),
    })
}

/// Quick quote without the impact guard, slippage taken over the whole output
///
/// `(kept + swapped) * (10000 - slippage) / 10000`. Useful for sizing a share
/// before committing to the guarded [`unwind`].
pub fn quote_unwind(
    position: &PositionSnapshot,
    pair: &PairSnapshot,
    preferences: &PreferenceList,
    slippage: SlippageBps,
    share: ShareBps,
) -> Result<UnwindResult, UnwindError> {
    let share_bps = share.validate()?;
    slippage.validate()?;
    validate_position(position)?;
    validate_reserves(&pair.reserves)?;

    let parts = decompose(position, &pair.reserves, share_bps)?;
    let retained = prefer_retain(&pair.token0, &pair.token1, preferences);
    let converted = retained.other();

    let swap_out = parts
        .remaining
        .get_amount_out(converted, parts.amount(converted))?;
    let amount_out = swap_out
        .checked_add(parts.amount(retained))
        .ok_or(UnwindError::ArithmeticOverflow {
            operation: "unwind quote",
        })?;

    Ok(UnwindResult {
        amount_withdrawn: parts.lp_amount,
        minimum_out: apply_slippage(amount_out, slippage)?,
        retained,
        retained_asset: pair.asset(retained).clone(),
    })
}
