//! # Unwinder - LP Unwind and Direct-Sell Minimum Output
//!
//! ## Purpose
//!
//! Turns a reserve snapshot plus policy (preferred assets, slippage tolerance,
//! price-impact ceiling) into the exact minimum output a withdraw or swap
//! transaction should be guarded with.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`PairResolver`] implementations (RPC/multicall layers, JSON fixtures)
//! - **Output Destinations**: transaction builders needing `amount` + `minimum_out`
//! - **Policy**: per-call [`PolicyParameters`] or the session-held policy of [`Unwinder`]
//!
//! ## Architecture Role
//!
//! ```text
//! PairResolver ──► Unwinder (policy snapshot) ──► unwind / sell
//!                                                  │
//!                      prefer_retain ◄─────────────┤
//!                      V2Math / check_impact ◄─────┤
//!                      apply_slippage ◄────────────┘
//! ```
//!
//! The free functions [`unwind()`] and [`sell()`] are pure; [`Unwinder`] adds the
//! resolver lookups and a lock-protected policy that may be updated between calls.

pub mod preference;
pub mod resolver;
pub mod sell;
pub mod session;
pub mod unwind;
pub mod validation;

pub use preference::prefer_retain;
pub use resolver::{BridgeRouter, InMemoryResolver, MarketSnapshot, PairRecord, PairResolver};
pub use sell::sell;
pub use session::Unwinder;
pub use unwind::{decompose, quote_unwind, unwind, Decomposition};

pub use unwind_types::{
    AssetId, BalanceSnapshot, ImpactBps, PairSide, PairSnapshot, PolicyParameters,
    PositionSnapshot, PreferenceList, ReserveSnapshot, RetainChoice, SellResult, ShareBps,
    SlippageBps, UnwindError, UnwindResult, U256,
};
