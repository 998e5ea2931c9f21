//! Service Configuration Module
//!
//! Provides configuration loading for the unwinder service. Values are layered:
//! struct defaults, then an optional TOML file, then `UNWIND_` environment
//! variables (`__` between nested keys).

use crate::service::{self, policy, tokens};
use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use unwind_types::{AssetId, ImpactBps, PolicyParameters, PreferenceList, SlippageBps};

/// Main service configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnwinderConfig {
    /// Slippage, price impact and preferred assets
    pub policy: PolicyConfig,

    /// Counter-asset selection for direct sales
    pub routing: RoutingConfig,

    /// Where market snapshots are read from
    pub market: MarketConfig,

    pub logging: LoggingConfig,
}

/// Policy applied to every calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Max price impact in bps, valid (0, 600]
    pub max_price_impact_bps: u32,
    /// Slippage haircut in bps, valid [0, 300]
    pub price_slippage_bps: u32,
    /// Assets we prefer to unwind into, most preferred first
    pub prefer_tokens: Vec<String>,
}

/// Bridge routing for direct sales
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub weth: String,
    /// Counter-asset when the sold asset is WETH itself
    pub sushi: String,
    /// Per-token bridge overrides: sold token -> counter-asset
    pub bridges: HashMap<String, String>,
}

/// Market snapshot source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// JSON snapshot file, environment variables are expanded
    pub snapshot_file: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_price_impact_bps: policy::DEFAULT_MAX_PRICE_IMPACT_BPS,
            price_slippage_bps: policy::DEFAULT_PRICE_SLIPPAGE_BPS,
            prefer_tokens: Vec::new(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            weth: tokens::WETH.to_string(),
            sushi: tokens::SUSHI.to_string(),
            bridges: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PolicyConfig {
    pub fn parameters(&self) -> PolicyParameters {
        PolicyParameters::new(
            ImpactBps::new(self.max_price_impact_bps),
            SlippageBps::new(self.price_slippage_bps),
        )
    }

    pub fn preference_list(&self) -> PreferenceList {
        PreferenceList::new(&self.prefer_tokens)
    }
}

impl RoutingConfig {
    /// Bridge table with normalized identifiers
    pub fn bridge_table(&self) -> HashMap<AssetId, AssetId> {
        self.bridges
            .iter()
            .map(|(token, bridge)| (AssetId::new(token), AssetId::new(bridge)))
            .collect()
    }
}

impl MarketConfig {
    /// Snapshot file path with environment variables expanded
    pub fn snapshot_path(&self) -> Result<Option<PathBuf>> {
        self.snapshot_file
            .as_deref()
            .map(|raw| {
                shellexpand::env(raw)
                    .map(|expanded| PathBuf::from(expanded.as_ref()))
                    .context("Failed to expand snapshot file path")
            })
            .transpose()
    }
}

impl UnwinderConfig {
    /// Load configuration from an optional TOML file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading unwinder config: {:?}", path);
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        // Override with environment variables (UNWIND_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(service::ENV_PREFIX)
                .prefix_separator("_")
                .separator(service::ENV_SEPARATOR)
                .list_separator(",")
                .with_list_parse_key("policy.prefer_tokens")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        debug!(?config, "unwinder config loaded");
        Ok(config)
    }

    /// Parse configuration from a TOML string, no environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.policy
            .parameters()
            .validate()
            .context("Invalid policy configuration")?;

        if self.routing.weth.trim().is_empty() || self.routing.sushi.trim().is_empty() {
            bail!("routing.weth and routing.sushi must be set");
        }

        if AssetId::new(&self.routing.weth) == AssetId::new(&self.routing.sushi) {
            bail!("routing.weth and routing.sushi must differ");
        }

        for (token, bridge) in self.routing.bridge_table() {
            if token == bridge {
                bail!("Bridge for {} points to itself", token);
            }
        }

        Ok(())
    }
}
