//! Which asset an unwind keeps

use unwind_types::{AssetId, PreferenceList, RetainChoice};

/// Pick the asset to retain from a pair given an ordered preference list
///
/// Token1 not preferred at all keeps token0; otherwise token0 not preferred
/// keeps token1; otherwise the earlier entry wins. An empty list keeps token0.
pub fn prefer_retain(
    token0: &AssetId,
    token1: &AssetId,
    preferences: &PreferenceList,
) -> RetainChoice {
    match (preferences.position(token0), preferences.position(token1)) {
        (_, None) => RetainChoice::Token0,
        (None, Some(_)) => RetainChoice::Token1,
        (Some(index0), Some(index1)) if index0 < index1 => RetainChoice::Token0,
        (Some(_), Some(_)) => RetainChoice::Token1,
    }
}
