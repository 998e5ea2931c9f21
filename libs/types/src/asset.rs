//! Asset identifiers and preference ordering
//!
//! Identifiers arrive from several places (config files, RPC responses, CLI
//! arguments) with inconsistent casing. They are lowercased once, here, so that
//! every comparison downstream is a plain string equality.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Canonical (lowercase) asset or pair identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl FromStr for AssetId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Ordered list of assets we prefer to end up holding, most preferred first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceList(Vec<AssetId>);

impl PreferenceList {
    pub fn new<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(assets.into_iter().map(AssetId::new).collect())
    }

    /// Index of `asset` in the list, `None` when it is not preferred at all
    pub fn position(&self, asset: &AssetId) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == asset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetId> {
        self.0.iter()
    }
}

impl FromIterator<AssetId> for PreferenceList {
    fn from_iter<T: IntoIterator<Item = AssetId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_lowercases_once() {
        let mixed = AssetId::new("0x0D500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");
        let lower = AssetId::from("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270");
        assert_eq!(mixed, lower);
        assert_eq!(mixed.to_string(), lower.as_str());
    }

    #[test]
    fn test_asset_id_serde_normalizes() {
        let id: AssetId = serde_json::from_str("\"0xABCD\"").unwrap();
        assert_eq!(id.as_str(), "0xabcd");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xabcd\"");
    }

    #[test]
    fn test_preference_position_is_case_insensitive() {
        let prefs = PreferenceList::new(["SUSHI", "Weth", "usdc"]);
        assert_eq!(prefs.position(&AssetId::new("sushi")), Some(0));
        assert_eq!(prefs.position(&AssetId::new("WETH")), Some(1));
        assert_eq!(prefs.position(&AssetId::new("dai")), None);
        assert_eq!(prefs.len(), 3);
    }

    #[test]
    fn test_preference_list_deserializes_from_array() {
        let prefs: PreferenceList = serde_json::from_str(r#"["A", "b"]"#).unwrap();
        assert_eq!(prefs, PreferenceList::new(["a", "B"]));
    }
}
