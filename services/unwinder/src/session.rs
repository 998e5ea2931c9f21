//! Long-lived unwinder session
//!
//! Owns a [`PairResolver`], the bridge router, the preference list and a
//! mutable policy. The policy is copied once at the start of every call so a
//! concurrent update is never half-visible inside one calculation.

use crate::resolver::{BridgeRouter, PairResolver};
use crate::sell::sell;
use crate::unwind::{quote_unwind, unwind};
use crate::validation::validate_request;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use unwind_config::UnwinderConfig;
use unwind_types::{
    AssetId, ImpactBps, PolicyParameters, PreferenceList, SellResult, ShareBps, SlippageBps,
    UnwindError, UnwindResult,
};

pub struct Unwinder {
    resolver: Arc<dyn PairResolver>,
    router: BridgeRouter,
    preferences: PreferenceList,
    policy: RwLock<PolicyParameters>,
}

impl Unwinder {
    pub fn new(
        resolver: Arc<dyn PairResolver>,
        router: BridgeRouter,
        preferences: PreferenceList,
        policy: PolicyParameters,
    ) -> Self {
        Self {
            resolver,
            router,
            preferences,
            policy: RwLock::new(policy),
        }
    }

    /// Build a session from loaded configuration
    pub fn from_config(config: &UnwinderConfig, resolver: Arc<dyn PairResolver>) -> Self {
        Self::new(
            resolver,
            BridgeRouter::from(&config.routing),
            config.policy.preference_list(),
            config.policy.parameters(),
        )
    }

    /// Current policy snapshot
    pub fn policy(&self) -> PolicyParameters {
        *self.policy.read()
    }

    pub fn preferences(&self) -> &PreferenceList {
        &self.preferences
    }

    pub fn router(&self) -> &BridgeRouter {
        &self.router
    }

    /// Store a new slippage tolerance, range-checked on the next calculation
    pub fn update_price_slippage(&self, price_slippage: SlippageBps) {
        let mut policy = self.policy.write();
        info!(from = %policy.price_slippage, to = %price_slippage, "price slippage updated");
        policy.price_slippage = price_slippage;
    }

    /// Store a new price-impact ceiling, range-checked on the next calculation
    pub fn update_max_price_impact(&self, max_price_impact: ImpactBps) {
        let mut policy = self.policy.write();
        info!(from = %policy.max_price_impact, to = %max_price_impact, "max price impact updated");
        policy.max_price_impact = max_price_impact;
    }

    /// Minimum output for unwinding `share` of our position in `pair_id`
    pub fn unwind_pair(
        &self,
        pair_id: &AssetId,
        share: ShareBps,
    ) -> Result<UnwindResult, UnwindError> {
        let policy = self.policy();
        validate_request(share, &policy)?;

        let pair = self.resolver.pair(pair_id)?;
        let position = self.resolver.position(pair_id)?;
        unwind(&position, &pair, &self.preferences, policy, share)
    }

    /// Unguarded quote for `pair_id` with the session slippage over the whole output
    pub fn quote_unwind_pair(
        &self,
        pair_id: &AssetId,
        share: ShareBps,
    ) -> Result<UnwindResult, UnwindError> {
        let slippage = self.policy().price_slippage;
        share.validate()?;
        slippage.validate()?;

        let pair = self.resolver.pair(pair_id)?;
        let position = self.resolver.position(pair_id)?;
        quote_unwind(&position, &pair, &self.preferences, slippage, share)
    }

    /// Minimum output for selling `share` of our `token` balance into its counter-asset
    pub fn sell_token(
        &self,
        token: &AssetId,
        share: ShareBps,
    ) -> Result<SellResult, UnwindError> {
        let policy = self.policy();
        validate_request(share, &policy)?;

        let pair = self.router.route(self.resolver.as_ref(), token)?;
        let balance = self.resolver.balance(token)?;
        sell(&balance, &pair, policy, share)
    }
}
