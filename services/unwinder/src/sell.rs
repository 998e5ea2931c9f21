//! Direct-sell calculator
//!
//! Sells part of a held balance straight into the pair's other asset. The impact
//! reference is the spot-price quote `reserve_out * amount_in / reserve_in`.

use crate::validation::{validate_request, validate_reserves};
use tracing::debug;
use unwind_amm::{apply_slippage, check_impact, AmmPool, V2Math};
use unwind_types::{
    BalanceSnapshot, PairSnapshot, PolicyParameters, SellResult, ShareBps, UnwindError,
    BPS_DENOMINATOR, U256,
};

/// Minimum output for selling `share` of `balance` through `pair`
pub fn sell(
    balance: &BalanceSnapshot,
    pair: &PairSnapshot,
    policy: PolicyParameters,
    share: ShareBps,
) -> Result<SellResult, UnwindError> {
    let share_bps = validate_request(share, &policy)?;
    validate_reserves(&pair.reserves)?;

    let side_in = pair
        .side_of(&balance.asset)
        .ok_or_else(|| UnwindError::AssetNotInPair {
            asset: balance.asset.to_string(),
        })?;

    let amount_in = V2Math::mul_div(
        balance.token_balance,
        U256::from(share_bps),
        U256::from(BPS_DENOMINATOR),
    )?;

    let no_impact_out = pair.reserves.get_spot_amount_out(side_in, amount_in)?;
    let amount_out = pair.reserves.get_amount_out(side_in, amount_in)?;
    check_impact(amount_out, no_impact_out, policy.max_price_impact)?;

    let minimum_out = apply_slippage(amount_out, policy.price_slippage)?;

    debug!(
        asset = %balance.asset,
        counter_asset = %pair.asset(side_in.other()),
        %amount_in,
        %no_impact_out,
        %amount_out,
        %minimum_out,
        "sell computed"
    );

    Ok(SellResult {
        amount_withdrawn: amount_in,
        minimum_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unwind_types::{ImpactBps, ReserveSnapshot, SlippageBps};

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    fn pair() -> PairSnapshot {
        PairSnapshot::new("a", "b", ReserveSnapshot::new(1_000_000u64, 2_000_000u64))
    }

    #[test]
    fn test_sell_token0() {
        let result = sell(
            &BalanceSnapshot::new("A", 100u64),
            &pair(),
            PolicyParameters::default(),
            ShareBps::FULL,
        )
        .unwrap();
        assert_eq!(result.amount_withdrawn, u(100));
        assert_eq!(result.minimum_out, u(199));
    }

    #[test]
    fn test_sell_token1() {
        let result = sell(
            &BalanceSnapshot::new("b", 100u64),
            &pair(),
            PolicyParameters::default(),
            ShareBps::FULL,
        )
        .unwrap();
        assert_eq!(result.minimum_out, u(49));
    }

    #[test]
    fn test_spot_baseline_boundary() {
        // spot 50, 1% floor is 49 after flooring: 49 out sits exactly on the floor
        let policy = PolicyParameters::new(ImpactBps::new(100), SlippageBps::ZERO);
        assert!(sell(&BalanceSnapshot::new("b", 100u64), &pair(), policy, ShareBps::FULL).is_ok());

        // 10000 in: spot 20000, out 19743 is a 1.3% shortfall
        assert_eq!(
            sell(&BalanceSnapshot::new("a", 10_000u64), &pair(), policy, ShareBps::FULL),
            Err(UnwindError::PriceImpactExceeded {
                actual: u(19_743),
                floor: u(19_800)
            })
        );
    }

    #[test]
    fn test_share_scales_amount_in() {
        let result = sell(
            &BalanceSnapshot::new("a", 1_000u64),
            &pair(),
            PolicyParameters::default(),
            ShareBps::from_percent(10),
        )
        .unwrap();
        assert_eq!(result.amount_withdrawn, u(100));
        assert_eq!(result.minimum_out, u(199));
    }

    #[test]
    fn test_slippage_on_sale() {
        let policy = PolicyParameters::new(ImpactBps::new(200), SlippageBps::new(300));
        let result = sell(&BalanceSnapshot::new("a", 10_000u64), &pair(), policy, ShareBps::FULL)
            .unwrap();
        // swap 10000 into 1m:2m -> 19743, haircut 3%
        assert_eq!(result.minimum_out, u(19_150));
    }

    #[test]
    fn test_unknown_asset_rejected() {
        assert_eq!(
            sell(
                &BalanceSnapshot::new("c", 100u64),
                &pair(),
                PolicyParameters::default(),
                ShareBps::FULL
            ),
            Err(UnwindError::AssetNotInPair {
                asset: "c".to_string()
            })
        );
    }
}
