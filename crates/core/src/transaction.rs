//! Transaction records as reported by the Etherscan account API.

use crate::wei::Wei;
use serde::{Deserialize, Deserializer};

/// A single transaction from an Etherscan `txlist`/`txlistinternal` page.
///
/// Etherscan encodes every field as a JSON string, including numbers and
/// the error flag (`"isError": "0" | "1"`). Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    /// Transaction hash, unique per chain.
    pub hash: String,
    /// Origin address.
    pub from: String,
    /// Destination address.
    pub to: String,
    /// Value in wei.
    #[serde(deserialize_with = "wei_from_string")]
    pub value: Wei,
    /// Whether the transaction errored on-chain.
    #[serde(rename = "isError", deserialize_with = "bool_from_flag")]
    pub is_error: bool,
    /// Unix timestamp in seconds.
    #[serde(rename = "timeStamp", deserialize_with = "u64_from_string")]
    pub timestamp: u64,
}

fn wei_from_string<'de, D>(deserializer: D) -> Result<Wei, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Wei::from_dec_str(&s).map_err(serde::de::Error::custom)
}

fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s != "0")
}

fn u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<u64>().map_err(serde::de::Error::custom)
}
