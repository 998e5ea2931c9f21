//! Decimal-string serde for [`U256`] amounts
//!
//! `ethereum-types` serializes `U256` as a `0x` hex quantity. Snapshots and
//! results are read and written by people, so amounts use decimal strings here.
//! Deserialization also accepts plain JSON integers and `0x` hex strings.
//!
//! ```ignore
//! #[serde(with = "unwind_types::serde_u256")]
//! pub reserve0: U256,
//! ```

use ethereum_types::U256;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(U256::from(value)),
        Raw::Text(text) => parse(&text).map_err(de::Error::custom),
    }
}

/// Parse a decimal or `0x`-prefixed hex amount
pub fn parse(text: &str) -> Result<U256, String> {
    let text = text.trim().replace('_', "");
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16)
            .map_err(|e| format!("invalid hex amount '{}': {:?}", text, e)),
        None => U256::from_dec_str(&text)
            .map_err(|e| format!("invalid decimal amount '{}': {:?}", text, e)),
    }
}
