//! Pair resolution and bridge routing
//!
//! The calculators never fetch data. A [`PairResolver`] supplies snapshots
//! (from RPC, multicall, a cache or a fixture) and [`BridgeRouter`] decides
//! which counter-asset a direct sale goes through.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};
use unwind_config::RoutingConfig;
use unwind_types::{AssetId, BalanceSnapshot, PairSnapshot, PositionSnapshot, UnwindError, U256};

/// Data-supply capability consumed by [`crate::Unwinder`]
pub trait PairResolver: Send + Sync {
    /// Snapshot of the LP pair identified by `pair`
    fn pair(&self, pair: &AssetId) -> Result<PairSnapshot, UnwindError>;

    /// Our LP balance in `pair` and its total supply
    fn position(&self, pair: &AssetId) -> Result<PositionSnapshot, UnwindError>;

    /// Direct pair between two assets, `None` when no pool exists
    fn pair_for(
        &self,
        token_a: &AssetId,
        token_b: &AssetId,
    ) -> Result<Option<PairSnapshot>, UnwindError>;

    /// Our balance of `token`
    fn balance(&self, token: &AssetId) -> Result<BalanceSnapshot, UnwindError>;
}

/// Picks the counter-asset for selling a token
///
/// WETH sells into SUSHI; every other token sells into its configured bridge,
/// or WETH when no bridge is set.
#[derive(Debug, Clone)]
pub struct BridgeRouter {
    weth: AssetId,
    sushi: AssetId,
    bridges: HashMap<AssetId, AssetId>,
}

impl BridgeRouter {
    pub fn new(weth: impl Into<AssetId>, sushi: impl Into<AssetId>) -> Self {
        Self {
            weth: weth.into(),
            sushi: sushi.into(),
            bridges: HashMap::new(),
        }
    }

    pub fn with_bridge(mut self, token: impl Into<AssetId>, bridge: impl Into<AssetId>) -> Self {
        self.bridges.insert(token.into(), bridge.into());
        self
    }

    pub fn counter_asset(&self, token: &AssetId) -> AssetId {
        if *token == self.weth {
            return self.sushi.clone();
        }
        self.bridges
            .get(token)
            .cloned()
            .unwrap_or_else(|| self.weth.clone())
    }

    /// Direct pair for selling `token`, or `NoPairFound` when a bridge is needed
    pub fn route(
        &self,
        resolver: &dyn PairResolver,
        token: &AssetId,
    ) -> Result<PairSnapshot, UnwindError> {
        let counter = self.counter_asset(token);
        debug!(%token, %counter, "routing sale");
        resolver
            .pair_for(token, &counter)?
            .ok_or_else(|| UnwindError::NoPairFound {
                token_in: token.to_string(),
                token_out: counter.to_string(),
            })
    }
}

impl From<&RoutingConfig> for BridgeRouter {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            weth: AssetId::new(&config.weth),
            sushi: AssetId::new(&config.sushi),
            bridges: config.bridge_table(),
        }
    }
}

/// One pair in a market snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairRecord {
    /// Pair (LP token) identifier
    pub address: AssetId,
    #[serde(flatten)]
    pub pair: PairSnapshot,
    /// Our LP position, absent when we hold none
    #[serde(default)]
    pub position: Option<PositionSnapshot>,
}

/// Serialized form of an [`InMemoryResolver`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub pairs: Vec<PairRecord>,
    #[serde(default)]
    pub balances: Vec<BalanceSnapshot>,
}

/// Unordered token pair used to index pools
type TokenKey = (AssetId, AssetId);

fn token_key(token_a: &AssetId, token_b: &AssetId) -> TokenKey {
    if token_a <= token_b {
        (token_a.clone(), token_b.clone())
    } else {
        (token_b.clone(), token_a.clone())
    }
}

/// HashMap-backed resolver over a fixed market snapshot
///
/// At most one pool per token pair; [`InMemoryResolver::with_pair`] replaces
/// any earlier pool for the same tokens.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    pairs: HashMap<AssetId, PairRecord>,
    by_tokens: HashMap<TokenKey, AssetId>,
    balances: HashMap<AssetId, U256>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(
        mut self,
        address: impl Into<AssetId>,
        pair: PairSnapshot,
        position: Option<PositionSnapshot>,
    ) -> Self {
        let address = address.into();
        let key = token_key(&pair.token0, &pair.token1);

        if let Some(previous) = self.by_tokens.insert(key.clone(), address.clone()) {
            if previous != address {
                self.pairs.remove(&previous);
            }
        }
        let record = PairRecord {
            address: address.clone(),
            pair,
            position,
        };
        if let Some(replaced) = self.pairs.insert(address, record) {
            let replaced_key = token_key(&replaced.pair.token0, &replaced.pair.token1);
            if replaced_key != key {
                self.by_tokens.remove(&replaced_key);
            }
        }
        self
    }

    pub fn with_balance(mut self, balance: BalanceSnapshot) -> Self {
        self.balances.insert(balance.asset, balance.token_balance);
        self
    }

    /// Build from a snapshot, rejecting two pools for the same token pair
    pub fn from_snapshot(snapshot: MarketSnapshot) -> Result<Self> {
        let mut resolver = Self::new();
        for record in snapshot.pairs {
            let key = token_key(&record.pair.token0, &record.pair.token1);
            if let Some(existing) = resolver.by_tokens.get(&key) {
                bail!(
                    "Pairs {} and {} both trade {}/{}",
                    existing,
                    record.address,
                    key.0,
                    key.1
                );
            }
            if resolver.pairs.contains_key(&record.address) {
                bail!("Pair {} listed twice", record.address);
            }
            resolver = resolver.with_pair(record.address, record.pair, record.position);
        }

        Ok(snapshot
            .balances
            .into_iter()
            .fold(resolver, |resolver, balance| resolver.with_balance(balance)))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: MarketSnapshot =
            serde_json::from_str(json).context("Failed to parse market snapshot")?;
        Self::from_snapshot(snapshot)
    }

    /// Load a market snapshot JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read market snapshot {:?}", path))?;
        let resolver = Self::from_json_str(&contents)?;
        info!(
            "Loaded market snapshot {:?}: {} pairs, {} balances",
            path,
            resolver.pairs.len(),
            resolver.balances.len()
        );
        Ok(resolver)
    }

    fn record(&self, pair: &AssetId) -> Result<&PairRecord, UnwindError> {
        self.pairs.get(pair).ok_or_else(|| UnwindError::UnknownPair {
            pair: pair.to_string(),
        })
    }
}

impl PairResolver for InMemoryResolver {
    fn pair(&self, pair: &AssetId) -> Result<PairSnapshot, UnwindError> {
        Ok(self.record(pair)?.pair.clone())
    }

    fn position(&self, pair: &AssetId) -> Result<PositionSnapshot, UnwindError> {
        let record = self.record(pair)?;
        // Not holding any LP is a zero balance, not a missing pair
        Ok(record.position.unwrap_or(PositionSnapshot {
            lp_balance: U256::zero(),
            total_supply: U256::zero(),
        }))
    }

    fn pair_for(
        &self,
        token_a: &AssetId,
        token_b: &AssetId,
    ) -> Result<Option<PairSnapshot>, UnwindError> {
        Ok(self
            .by_tokens
            .get(&token_key(token_a, token_b))
            .and_then(|address| self.pairs.get(address))
            .map(|record| record.pair.clone()))
    }

    fn balance(&self, token: &AssetId) -> Result<BalanceSnapshot, UnwindError> {
        Ok(BalanceSnapshot {
            asset: token.clone(),
            token_balance: self.balances.get(token).copied().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unwind_types::ReserveSnapshot;

    const SNAPSHOT: &str = r#"{
        "pairs": [
            {
                "address": "0xPAIR",
                "token0": "0xWETH",
                "token1": "0xSUSHI",
                "reserves": { "reserve0": "1000000", "reserve1": "2000000" },
                "position": { "lp_balance": "50", "total_supply": "1000" }
            },
            {
                "address": "0xOTHER",
                "token0": "0xDAI",
                "token1": "0xWETH",
                "reserves": { "reserve0": 5000, "reserve1": 5000 }
            }
        ],
        "balances": [ { "asset": "0xDAI", "token_balance": "1200" } ]
    }"#;

    fn router() -> BridgeRouter {
        BridgeRouter::new("0xWETH", "0xSUSHI")
    }

    #[test]
    fn test_snapshot_loading() {
        let resolver = InMemoryResolver::from_json_str(SNAPSHOT).unwrap();

        let pair = resolver.pair(&AssetId::new("0xpair")).unwrap();
        assert_eq!(pair.reserves, ReserveSnapshot::new(1_000_000u64, 2_000_000u64));

        let position = resolver.position(&AssetId::new("0xPair")).unwrap();
        assert_eq!(position, PositionSnapshot::new(50u64, 1000u64));

        let balance = resolver.balance(&AssetId::new("0xdai")).unwrap();
        assert_eq!(balance.token_balance, U256::from(1200));
        assert!(resolver.balance(&AssetId::new("0xusdc")).unwrap().token_balance.is_zero());

        assert_eq!(
            resolver.pair(&AssetId::new("0xmissing")),
            Err(UnwindError::UnknownPair {
                pair: "0xmissing".to_string()
            })
        );
    }

    #[test]
    fn test_counter_asset_selection() {
        let router = router().with_bridge("0xBADGER", "0xWBTC");
        assert_eq!(router.counter_asset(&AssetId::new("0xweth")), AssetId::new("0xsushi"));
        assert_eq!(router.counter_asset(&AssetId::new("0xdai")), AssetId::new("0xweth"));
        assert_eq!(router.counter_asset(&AssetId::new("0xbadger")), AssetId::new("0xwbtc"));
    }

    #[test]
    fn test_route_finds_pair_in_either_order() {
        let resolver = InMemoryResolver::from_json_str(SNAPSHOT).unwrap();
        let pair = router().route(&resolver, &AssetId::new("0xDAI")).unwrap();
        assert_eq!(pair.token0, AssetId::new("0xdai"));

        let pair = router().route(&resolver, &AssetId::new("0xWETH")).unwrap();
        assert_eq!(pair.token1, AssetId::new("0xsushi"));
    }

    #[test]
    fn test_route_without_pair_needs_bridge() {
        let resolver = InMemoryResolver::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(
            router().route(&resolver, &AssetId::new("0xUSDC")),
            Err(UnwindError::NoPairFound {
                token_in: "0xusdc".to_string(),
                token_out: "0xweth".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_pools_rejected() {
        let json = r#"{
            "pairs": [
                {
                    "address": "0xUNI",
                    "token0": "0xDAI",
                    "token1": "0xWETH",
                    "reserves": { "reserve0": 5000, "reserve1": 5000 }
                },
                {
                    "address": "0xSUSHI-POOL",
                    "token0": "0xWETH",
                    "token1": "0xDAI",
                    "reserves": { "reserve0": 9000, "reserve1": 9000 }
                }
            ]
        }"#;
        let err = InMemoryResolver::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("both trade"));
    }

    #[test]
    fn test_with_pair_replaces_pool_for_same_tokens() {
        let resolver = InMemoryResolver::new()
            .with_pair(
                "0xold",
                PairSnapshot::new("0xdai", "0xweth", ReserveSnapshot::new(1u64, 1u64)),
                None,
            )
            .with_pair(
                "0xnew",
                PairSnapshot::new("0xweth", "0xdai", ReserveSnapshot::new(7u64, 7u64)),
                None,
            );

        for _ in 0..10 {
            let pair = resolver
                .pair_for(&AssetId::new("0xdai"), &AssetId::new("0xweth"))
                .unwrap()
                .unwrap();
            assert_eq!(pair.reserves, ReserveSnapshot::new(7u64, 7u64));
        }
        assert!(resolver.pair(&AssetId::new("0xold")).is_err());
    }

    #[test]
    fn test_router_from_config() {
        let mut config = RoutingConfig::default();
        config.bridges.insert("0xAAA".to_string(), "0xBBB".to_string());
        let router = BridgeRouter::from(&config);
        assert_eq!(router.counter_asset(&AssetId::new("0xaaa")), AssetId::new("0xbbb"));
    }
}
