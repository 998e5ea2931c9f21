//! Unwind and preference properties

use proptest::prelude::*;
use unwinder::{
    decompose, prefer_retain, quote_unwind, unwind, AssetId, ImpactBps, PairSnapshot,
    PolicyParameters, PositionSnapshot, PreferenceList, ReserveSnapshot, RetainChoice, ShareBps,
    SlippageBps, UnwindError, U256,
};

proptest! {
    #[test]
    fn unwind_never_below_retained_share(
        reserve0 in 1_000u128..1_000_000_000_000_000,
        reserve1 in 1_000u128..1_000_000_000_000_000,
        total_supply in 1u128..1_000_000_000_000,
        lp_fraction in 1u128..=1_000,
        share_bps in 1u32..=10_000,
        slippage_bps in 0u32..=300,
        keep_second in any::<bool>(),
    ) {
        let lp_balance = total_supply * lp_fraction / 1_000;
        let position = PositionSnapshot::new(U256::from(lp_balance), U256::from(total_supply));
        let pair = PairSnapshot::new(
            "0xa",
            "0xb",
            ReserveSnapshot::new(U256::from(reserve0), U256::from(reserve1)),
        );
        let prefs = if keep_second {
            PreferenceList::new(["0xb"])
        } else {
            PreferenceList::default()
        };
        let policy = PolicyParameters::new(ImpactBps::new(600), SlippageBps::new(slippage_bps));

        let parts = decompose(&position, &pair.reserves, share_bps).unwrap();
        match unwind(&position, &pair, &prefs, policy, ShareBps::new(share_bps)) {
            Ok(result) => {
                prop_assert!(result.minimum_out >= parts.amount(result.retained));
            }
            Err(err) => {
                prop_assert!(matches!(err, UnwindError::PriceImpactExceeded { .. }), "{}", err);
            }
        }

        // The unguarded quote succeeds on every valid position, drained pools included
        let quote = quote_unwind(&position, &pair, &prefs, SlippageBps::ZERO, ShareBps::new(share_bps)).unwrap();
        prop_assert!(quote.minimum_out >= parts.amount(quote.retained));
    }

    #[test]
    fn symmetric_reserves_agree_on_either_retained_asset(
        reserve in 1_000u128..1_000_000_000_000_000,
        total_supply in 1u128..1_000_000_000_000,
        share_bps in 1u32..=10_000,
    ) {
        let position = PositionSnapshot::new(U256::from(total_supply / 2), U256::from(total_supply));
        let pair = PairSnapshot::new("0xa", "0xb", ReserveSnapshot::new(U256::from(reserve), U256::from(reserve)));
        let share = ShareBps::new(share_bps);

        let keep_a = quote_unwind(&position, &pair, &PreferenceList::new(["0xa"]), SlippageBps::ZERO, share).unwrap();
        let keep_b = quote_unwind(&position, &pair, &PreferenceList::new(["0xb"]), SlippageBps::ZERO, share).unwrap();
        prop_assert_eq!(keep_a.minimum_out, keep_b.minimum_out);
    }

    #[test]
    fn empty_preferences_keep_first_argument(a in "0x[0-9a-f]{8}", b in "0x[0-9a-f]{8}") {
        let choice = prefer_retain(&AssetId::new(&a), &AssetId::new(&b), &PreferenceList::default());
        prop_assert_eq!(choice, RetainChoice::Token0);
    }
}
