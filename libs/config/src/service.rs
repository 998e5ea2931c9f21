//! Service defaults
//!
//! Default values used when neither the config file nor the environment
//! provides one.

/// Policy defaults
pub mod policy {
    /// Max price impact accepted before a swap is rejected (1%)
    pub const DEFAULT_MAX_PRICE_IMPACT_BPS: u32 = 100;

    /// Slippage added on top of the minimum out (none)
    pub const DEFAULT_PRICE_SLIPPAGE_BPS: u32 = 0;
}

/// Ethereum mainnet token addresses used for routing
pub mod tokens {
    pub const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
    pub const SUSHI: &str = "0x6B3595068778DD592e39A122f4f5a5cF09C90fE2";
}

/// Environment variable prefix for overrides (`UNWIND_POLICY__PRICE_SLIPPAGE_BPS=50`)
pub const ENV_PREFIX: &str = "UNWIND";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";
