//! Unwind Quote CLI
//!
//! Loads a market snapshot and prints the guarded minimum output for
//! unwinding an LP position or selling a token balance.
//!
//! ```text
//! unwind-quote --market market.json unwind 0xPAIR 5000
//! unwind-quote --market market.json quote 0xPAIR 10000
//! unwind-quote --market market.json --slippage-bps 50 sell 0xTOKEN 10000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use unwind_config::{init_tracing, UnwinderConfig};
use unwinder::{
    AssetId, ImpactBps, InMemoryResolver, ShareBps, SlippageBps, UnwindError, Unwinder,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "unwind-quote")]
#[command(about = "Minimum output for LP unwinds and direct sales")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Market snapshot JSON, overrides market.snapshot_file
    #[arg(short, long)]
    market: Option<PathBuf>,

    /// Override the configured price slippage (bps)
    #[arg(long)]
    slippage_bps: Option<u32>,

    /// Override the configured max price impact (bps)
    #[arg(long)]
    max_impact_bps: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Unwind a share of our LP position into the preferred asset
    Unwind {
        pair: String,
        /// Share of the LP balance in bps (10000 = all)
        share_bps: u32,
    },
    /// Unguarded unwind quote, slippage taken over the whole output
    Quote {
        pair: String,
        /// Share of the LP balance in bps (10000 = all)
        share_bps: u32,
    },
    /// Sell a share of a token balance into its counter-asset
    Sell {
        token: String,
        /// Share of the balance in bps (10000 = all)
        share_bps: u32,
    },
}

fn describe(err: UnwindError) -> anyhow::Error {
    if err.is_parameter_error() {
        anyhow::Error::new(err).context("Invalid request parameters")
    } else {
        anyhow::Error::new(err).context("Quote failed")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = UnwinderConfig::load(args.config.as_deref())?;
    init_tracing(&config.logging)?;
    config.validate()?;

    let market_path = match args.market {
        Some(path) => path,
        None => config
            .market
            .snapshot_path()?
            .context("No market snapshot given: pass --market or set market.snapshot_file")?,
    };
    let resolver = InMemoryResolver::from_file(&market_path)?;

    let unwinder = Unwinder::from_config(&config, Arc::new(resolver));
    if let Some(bps) = args.slippage_bps {
        unwinder.update_price_slippage(SlippageBps::new(bps));
    }
    if let Some(bps) = args.max_impact_bps {
        unwinder.update_max_price_impact(ImpactBps::new(bps));
    }

    let output = match args.command {
        Command::Unwind { pair, share_bps } => {
            info!("Unwinding {} bps of {}", share_bps, pair);
            let result = unwinder
                .unwind_pair(&AssetId::new(&pair), ShareBps::new(share_bps))
                .map_err(describe)?;
            serde_json::to_string_pretty(&result)?
        }
        Command::Quote { pair, share_bps } => {
            info!("Quoting {} bps of {} without impact guard", share_bps, pair);
            let result = unwinder
                .quote_unwind_pair(&AssetId::new(&pair), ShareBps::new(share_bps))
                .map_err(describe)?;
            serde_json::to_string_pretty(&result)?
        }
        Command::Sell { token, share_bps } => {
            info!("Selling {} bps of {}", share_bps, token);
            let result = unwinder
                .sell_token(&AssetId::new(&token), ShareBps::new(share_bps))
                .map_err(describe)?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{}", output);
    Ok(())
}
