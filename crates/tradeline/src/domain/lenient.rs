//! Forgiving deserializers for hand-written ledger fields.
//!
//! A value that cannot be understood becomes `None` (or
//! [`Asset::Unrecognized`]) instead of failing the whole trade, so the
//! resolvers can skip just the offending asset.

use super::Asset;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Accept integers and numeric strings; anything else, including values
/// out of range for `T`, is `None`.
pub(super) fn deserialize_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
{
    let value = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Int(n) => T::try_from(n).ok(),
        LooseNumber::Text(s) => s.trim().parse().ok(),
        LooseNumber::Other(_) => None,
    };
    Ok(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseAsset {
    Known(Asset),
    Other(IgnoredAny),
}

/// Deserialize an asset list, keeping a placeholder for each entry that
/// does not parse so asset positions stay stable.
pub(super) fn deserialize_assets<'de, D>(deserializer: D) -> Result<Vec<Asset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<LooseAsset>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|asset| match asset {
            LooseAsset::Known(asset) => asset,
            LooseAsset::Other(_) => Asset::Unrecognized,
        })
        .collect())
}
