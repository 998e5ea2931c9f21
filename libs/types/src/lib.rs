//! # Unwind Types
//!
//! Value types shared by the AMM math library and the unwinder service.
//!
//! ## Design Philosophy
//!
//! - **Exact Integers**: every on-chain amount is a [`U256`], never a float
//! - **One Normalization Rule**: asset identifiers are lowercased at construction
//! - **Explicit Scales**: shares, slippage and price impact are basis-point newtypes
//!   so a percent or per-mille value cannot be passed where bps are expected
//! - **Immutable Snapshots**: reserve, position and balance snapshots are plain values
//!   handed in by the data-supply layer for exactly one calculation
//!
//! ## Quick Start
//!
//! ```rust
//! use unwind_types::{AssetId, PreferenceList, ShareBps, SlippageBps};
//!
//! let weth = AssetId::new("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
//! assert_eq!(weth.as_str(), "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
//!
//! let prefs = PreferenceList::new(["SUSHI", "WETH"]);
//! assert_eq!(prefs.position(&AssetId::new("weth")), Some(1));
//!
//! // Legacy parts-per-1000 callers: 10 = 1%
//! assert_eq!(SlippageBps::from_per_mille(10).bps(), 100);
//! assert_eq!(ShareBps::FULL.bps(), 10_000);
//! ```

pub mod asset;
pub mod bps;
pub mod errors;
pub mod serde_u256;
pub mod snapshot;

pub use asset::{AssetId, PreferenceList};
pub use bps::{
    ImpactBps, PolicyParameters, ShareBps, SlippageBps, BPS_DENOMINATOR, MAX_IMPACT_BPS,
    MAX_SLIPPAGE_BPS,
};
pub use errors::UnwindError;
pub use snapshot::{
    BalanceSnapshot, PairSide, PairSnapshot, PositionSnapshot, ReserveSnapshot, RetainChoice,
    SellResult, UnwindResult,
};

/// Integer types used for all on-chain amounts
pub use ethereum_types::{U256, U512};
