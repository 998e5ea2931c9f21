//! Market snapshots consumed by the calculators and the results they return
//!
//! Snapshots are supplied by the data-fetch layer (RPC, multicall, fixtures)
//! and live for a single calculation.

use crate::asset::AssetId;
use ethereum_types::U256;
use serde::{Deserialize, Serialize};

/// One side of a two-asset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairSide {
    Token0,
    Token1,
}

/// Which asset an unwind keeps
pub type RetainChoice = PairSide;

impl PairSide {
    pub fn other(self) -> Self {
        match self {
            Self::Token0 => Self::Token1,
            Self::Token1 => Self::Token0,
        }
    }
}

/// Pool reserves in smallest denomination, ordered token0/token1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    #[serde(with = "crate::serde_u256")]
    pub reserve0: U256,
    #[serde(with = "crate::serde_u256")]
    pub reserve1: U256,
}

impl ReserveSnapshot {
    pub fn new(reserve0: impl Into<U256>, reserve1: impl Into<U256>) -> Self {
        Self {
            reserve0: reserve0.into(),
            reserve1: reserve1.into(),
        }
    }

    pub fn get(&self, side: PairSide) -> U256 {
        match side {
            PairSide::Token0 => self.reserve0,
            PairSide::Token1 => self.reserve1,
        }
    }

    /// True when either reserve is zero; such a pair cannot be quoted
    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }
}

/// A constant-product pair: its two assets and their reserves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub token0: AssetId,
    pub token1: AssetId,
    pub reserves: ReserveSnapshot,
}

impl PairSnapshot {
    pub fn new(
        token0: impl Into<AssetId>,
        token1: impl Into<AssetId>,
        reserves: ReserveSnapshot,
    ) -> Self {
        Self {
            token0: token0.into(),
            token1: token1.into(),
            reserves,
        }
    }

    pub fn asset(&self, side: PairSide) -> &AssetId {
        match side {
            PairSide::Token0 => &self.token0,
            PairSide::Token1 => &self.token1,
        }
    }

    /// Side occupied by `asset`, `None` when it is not in the pair
    pub fn side_of(&self, asset: &AssetId) -> Option<PairSide> {
        if *asset == self.token0 {
            Some(PairSide::Token0)
        } else if *asset == self.token1 {
            Some(PairSide::Token1)
        } else {
            None
        }
    }
}

/// LP tokens held and the pool's total LP supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    #[serde(with = "crate::serde_u256")]
    pub lp_balance: U256,
    #[serde(with = "crate::serde_u256")]
    pub total_supply: U256,
}

impl PositionSnapshot {
    pub fn new(lp_balance: impl Into<U256>, total_supply: impl Into<U256>) -> Self {
        Self {
            lp_balance: lp_balance.into(),
            total_supply: total_supply.into(),
        }
    }
}

/// Held balance of the asset being sold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub asset: AssetId,
    #[serde(with = "crate::serde_u256")]
    pub token_balance: U256,
}

impl BalanceSnapshot {
    pub fn new(asset: impl Into<AssetId>, token_balance: impl Into<U256>) -> Self {
        Self {
            asset: asset.into(),
            token_balance: token_balance.into(),
        }
    }
}

/// Outcome of unwinding part of an LP position into one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwindResult {
    /// LP tokens to burn
    #[serde(with = "crate::serde_u256")]
    pub amount_withdrawn: U256,
    /// Lower bound on the retained asset the withdraw must yield
    #[serde(with = "crate::serde_u256")]
    pub minimum_out: U256,
    pub retained: RetainChoice,
    pub retained_asset: AssetId,
}

/// Outcome of selling part of a balance into the counter-asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellResult {
    /// Amount of the sold asset going in
    #[serde(with = "crate::serde_u256")]
    pub amount_withdrawn: U256,
    #[serde(with = "crate::serde_u256")]
    pub minimum_out: U256,
}
