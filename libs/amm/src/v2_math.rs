//! Uniswap V2 AMM math with exact integer calculations
//!
//! Mirrors `UniswapV2Library.getAmountOut` / `getAmountIn` bit for bit. Two-factor
//! products are formed in `U512`; the three-factor swap numerator needs up to
//! 523 bits and is formed in `U1024`, so no `U256` operands can overflow.

use tracing::trace;
use uint::construct_uint;
use unwind_types::{UnwindError, U256, U512};

construct_uint! {
    /// Intermediate for `amount_in * 997 * reserve_out`
    struct U1024(16);
}

impl From<U256> for U1024 {
    fn from(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_little_endian(&mut bytes);
        U1024::from_little_endian(&bytes)
    }
}

/// Input multiplier after the 0.3% LP fee
pub const FEE_NUMERATOR: u64 = 997;
/// Fee denominator
pub const FEE_DENOMINATOR: u64 = 1000;

/// V2 AMM math functions with zero precision loss
pub struct V2Math;

impl V2Math {
    /// Calculate exact output amount for Uniswap V2 using x*y=k formula
    ///
    /// `amount_out = amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997)`
    ///
    /// # Arguments
    /// * `amount_in` - Input token amount (smallest denomination)
    /// * `reserve_in` - Input token reserve
    /// * `reserve_out` - Output token reserve
    ///
    /// # Returns
    /// Output amount, floored, exactly as the pair contract computes it
    pub fn calculate_output_amount(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<U256, UnwindError> {
        // Only an empty input reserve with no input leaves nothing to divide by.
        // A drained reserve_out simply yields zero.
        if amount_in.is_zero() {
            if reserve_in.is_zero() {
                return Err(UnwindError::EmptyReserves);
            }
            return Ok(U256::zero());
        }

        // At most 2^266 * 2^256, well inside 1024 bits
        let amount_in_with_fee = U1024::from(amount_in) * U1024::from(FEE_NUMERATOR);
        let numerator = amount_in_with_fee * U1024::from(reserve_out);
        let denominator =
            U1024::from(reserve_in) * U1024::from(FEE_DENOMINATOR) + amount_in_with_fee;

        let amount_out = narrow_wide(numerator / denominator, "swap output")?;
        trace!(%amount_in, %reserve_in, %reserve_out, %amount_out, "v2 swap output");
        Ok(amount_out)
    }

    /// Calculate required input amount for desired output (reverse calculation)
    ///
    /// Rounds up by one unit so the returned input always suffices.
    pub fn calculate_input_amount(
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<U256, UnwindError> {
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(UnwindError::EmptyReserves);
        }
        if amount_out >= reserve_out {
            return Err(UnwindError::InsufficientLiquidity);
        }
        if amount_out.is_zero() {
            return Ok(U256::zero());
        }

        let numerator = U512::from(reserve_in)
            .checked_mul(U512::from(amount_out))
            .and_then(|product| product.checked_mul(U512::from(FEE_DENOMINATOR)))
            .ok_or(overflow("swap input numerator"))?;
        let denominator = U512::from(reserve_out - amount_out)
            .checked_mul(U512::from(FEE_NUMERATOR))
            .ok_or(overflow("swap input denominator"))?;

        narrow(numerator / denominator, "swap input")?
            .checked_add(U256::one())
            .ok_or(overflow("swap input"))
    }

    /// Output at the current spot price, ignoring depth and fee
    ///
    /// `reserve_out * amount_in / reserve_in`, the no-impact reference for a sale.
    pub fn spot_output_amount(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<U256, UnwindError> {
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(UnwindError::EmptyReserves);
        }
        Self::mul_div(reserve_out, amount_in, reserve_in)
    }

    /// `a * b / denominator` with a full 512-bit product, floored
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, UnwindError> {
        if denominator.is_zero() {
            return Err(UnwindError::DivisionByZero {
                operation: "mul_div",
            });
        }
        narrow(a.full_mul(b) / U512::from(denominator), "mul_div")
    }
}

fn overflow(operation: &'static str) -> UnwindError {
    UnwindError::ArithmeticOverflow { operation }
}

/// Narrow a 512-bit result back to 256 bits, failing instead of truncating
fn narrow(value: U512, operation: &'static str) -> Result<U256, UnwindError> {
    if value > U512::from(U256::MAX) {
        return Err(overflow(operation));
    }
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    Ok(U256::from_little_endian(&bytes[..32]))
}

fn narrow_wide(value: U1024, operation: &'static str) -> Result<U256, UnwindError> {
    if value > U1024::from(U256::MAX) {
        return Err(overflow(operation));
    }
    let mut bytes = [0u8; 128];
    value.to_little_endian(&mut bytes);
    Ok(U256::from_little_endian(&bytes[..32]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_v2_output_calculation() {
        // 100 in against 1m:2m reserves
        let output = V2Math::calculate_output_amount(u(100), u(1_000_000), u(2_000_000)).unwrap();
        assert_eq!(output, u(199));

        // Same input, opposite direction
        let output = V2Math::calculate_output_amount(u(100), u(2_000_000), u(1_000_000)).unwrap();
        assert_eq!(output, u(49));
    }

    #[test]
    fn test_zero_input_yields_zero() {
        let output = V2Math::calculate_output_amount(U256::zero(), u(10), u(10)).unwrap();
        assert!(output.is_zero());
    }

    #[test]
    fn test_empty_reserves_rejected() {
        assert_eq!(
            V2Math::calculate_output_amount(U256::zero(), U256::zero(), u(10)),
            Err(UnwindError::EmptyReserves)
        );
        assert_eq!(
            V2Math::spot_output_amount(u(1), u(10), U256::zero()),
            Err(UnwindError::EmptyReserves)
        );
    }

    #[test]
    fn test_drained_reserves_still_price() {
        // Swapping into a pool whose reserves were fully withdrawn yields nothing
        let output =
            V2Math::calculate_output_amount(u(1_000_000), U256::zero(), U256::zero()).unwrap();
        assert!(output.is_zero());

        // Empty input side: the whole output reserve comes out
        let output = V2Math::calculate_output_amount(u(1), U256::zero(), u(10)).unwrap();
        assert_eq!(output, u(10));
    }

    #[test]
    fn test_full_width_reserves_do_not_overflow() {
        // amount_in * 997 * reserve_out needs ~522 bits; result is MAX * 997 / 1997
        let output = V2Math::calculate_output_amount(U256::MAX, U256::MAX, U256::MAX).unwrap();
        assert!(output < U256::MAX / 2);
        assert!(output > U256::MAX / 3);

        // Tiny input reserve: almost the whole output reserve, floored
        let output = V2Math::calculate_output_amount(U256::MAX, u(1), U256::MAX).unwrap();
        assert_eq!(output, U256::MAX - u(2));
    }

    #[test]
    fn test_input_amount_inverts_output() {
        let (reserve_in, reserve_out) = (u(1_000_000), u(2_000_000));
        let amount_in = V2Math::calculate_input_amount(u(199), reserve_in, reserve_out).unwrap();
        let amount_out =
            V2Math::calculate_output_amount(amount_in, reserve_in, reserve_out).unwrap();
        assert!(amount_out >= u(199));
        assert_eq!(
            V2Math::calculate_input_amount(u(2_000_000), reserve_in, reserve_out),
            Err(UnwindError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_spot_output() {
        let spot = V2Math::spot_output_amount(u(100), u(1_000_000), u(2_000_000)).unwrap();
        assert_eq!(spot, u(200));
        let spot = V2Math::spot_output_amount(u(100), u(2_000_000), u(1_000_000)).unwrap();
        assert_eq!(spot, u(50));
    }

    #[test]
    fn test_mul_div_floors_and_guards() {
        assert_eq!(V2Math::mul_div(u(7), u(3), u(2)).unwrap(), u(10));
        assert_eq!(V2Math::mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap(), U256::MAX);
        assert!(matches!(
            V2Math::mul_div(U256::MAX, u(2), u(1)),
            Err(UnwindError::ArithmeticOverflow { .. })
        ));
        assert!(matches!(
            V2Math::mul_div(u(1), u(1), U256::zero()),
            Err(UnwindError::DivisionByZero { .. })
        ));
    }
}
