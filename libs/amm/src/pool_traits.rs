//! Pool trait definitions for a unified AMM interface

use crate::V2Math;
use unwind_types::{PairSide, ReserveSnapshot, UnwindError, U256};

/// Directional pricing over a two-asset pool
pub trait AmmPool {
    /// Calculate output amount when `amount_in` of `side_in` goes in
    fn get_amount_out(&self, side_in: PairSide, amount_in: U256) -> Result<U256, UnwindError>;

    /// Calculate required input of `side_in` for the desired output
    fn get_amount_in(&self, side_in: PairSide, amount_out: U256) -> Result<U256, UnwindError>;

    /// Output at the current spot price, no depth effect
    fn get_spot_amount_out(&self, side_in: PairSide, amount_in: U256) -> Result<U256, UnwindError>;

    /// Reserves ordered (in, out) for a swap entering on `side_in`
    fn get_liquidity(&self, side_in: PairSide) -> (U256, U256);
}

impl AmmPool for ReserveSnapshot {
    fn get_amount_out(&self, side_in: PairSide, amount_in: U256) -> Result<U256, UnwindError> {
        let (reserve_in, reserve_out) = self.get_liquidity(side_in);
        V2Math::calculate_output_amount(amount_in, reserve_in, reserve_out)
    }

    fn get_amount_in(&self, side_in: PairSide, amount_out: U256) -> Result<U256, UnwindError> {
        let (reserve_in, reserve_out) = self.get_liquidity(side_in);
        V2Math::calculate_input_amount(amount_out, reserve_in, reserve_out)
    }

    fn get_spot_amount_out(&self, side_in: PairSide, amount_in: U256) -> Result<U256, UnwindError> {
        let (reserve_in, reserve_out) = self.get_liquidity(side_in);
        V2Math::spot_output_amount(amount_in, reserve_in, reserve_out)
    }

    fn get_liquidity(&self, side_in: PairSide) -> (U256, U256) {
        (self.get(side_in), self.get(side_in.other()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_follows_side() {
        let reserves = ReserveSnapshot::new(1_000_000u64, 2_000_000u64);
        let amount_in = U256::from(100);
        assert_eq!(
            reserves.get_amount_out(PairSide::Token0, amount_in).unwrap(),
            U256::from(199)
        );
        assert_eq!(
            reserves.get_amount_out(PairSide::Token1, amount_in).unwrap(),
            U256::from(49)
        );
        assert_eq!(
            reserves.get_liquidity(PairSide::Token1),
            (U256::from(2_000_000u64), U256::from(1_000_000u64))
        );
    }
}
