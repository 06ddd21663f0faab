//! Allocation pool identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The named allocation buckets of the token supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolId {
    Community,
    Development,
    Liquidity,
    Founder,
    Human,
}

impl PoolId {
    pub const ALL: [PoolId; 5] = [
        Self::Community,
        Self::Development,
        Self::Liquidity,
        Self::Founder,
        Self::Human,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Development => "development",
            Self::Liquidity => "liquidity",
            Self::Founder => "founder",
            Self::Human => "human",
        }
    }
}

impl FromStr for PoolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown pool: {s}"))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
