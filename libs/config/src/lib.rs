//! # Unwinder Configuration
//!
//! Centralized configuration for the unwinder service: policy defaults,
//! bridge routing tables and logging setup.
//!
//! ## Features
//!
//! - **Layered Loading**: built-in defaults, then an optional TOML file, then
//!   `UNWIND_` environment variables
//! - **Startup Validation**: the same ranges the calculators enforce per call
//! - **Tracing Setup**: `RUST_LOG`-aware subscriber with optional JSON output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unwind_config::{init_tracing, UnwinderConfig};
//!
//! let config = UnwinderConfig::load(None)?;
//! config.validate()?;
//! init_tracing(&config.logging)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod service;
pub mod service_config;

pub use logging::init_tracing;
pub use service_config::{
    LoggingConfig, MarketConfig, PolicyConfig, RoutingConfig, UnwinderConfig,
};
