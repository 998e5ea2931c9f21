//! # Unwind AMM Library - Exact Constant-Product Mathematics
//!
//! ## Purpose
//!
//! Integer reproduction of the Uniswap V2 pricing formula plus the two safety
//! policies layered on top of it when computing a minimum acceptable output:
//! the slippage haircut and the price-impact guard.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve snapshots from the data-fetch layer, policy from config
//! - **Output Destinations**: the unwind and direct-sell calculators
//! - **Protocol Support**: Uniswap V2 and forks with the 0.3% (997/1000) fee
//! - **Precision**: `U256` operands, `U512` intermediates, floor at the final division only
//! - **Validation**: slippage and impact ranges are rechecked on every call
//!
//! ## Architecture Role
//!
//! ```text
//! ReserveSnapshot ──► V2Math::calculate_output_amount ──► check_impact ──► apply_slippage
//!                            ▲                                  ▲                │
//!                       amount_in                          reference out          ▼
//!                                                                            minimum out
//! ```
//!
//! Nothing in this crate performs I/O or keeps state between calls.

pub mod pool_traits;
pub mod price_impact;
pub mod slippage;
pub mod v2_math;

pub use pool_traits::AmmPool;
pub use price_impact::{check_impact, impact_floor, shortfall_bps};
pub use slippage::apply_slippage;
pub use v2_math::V2Math;

pub use unwind_types::{UnwindError, U256, U512};
