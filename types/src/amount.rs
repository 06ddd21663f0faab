//! Token amount type.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole token is `10^DECIMALS` raw.
//! Serialized as a decimal string of raw units, since TOML has no u128.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// AINET amount in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    /// Decimal places of one whole token.
    pub const DECIMALS: u8 = 18;

    /// Raw units in one whole token.
    pub const UNIT: u128 = 1_000_000_000_000_000_000;

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole tokens, saturating at `u128::MAX` raw.
    pub fn from_whole(tokens: u128) -> Self {
        Self(tokens.saturating_mul(Self::UNIT))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole-token part, truncating the fraction.
    pub fn whole(&self) -> u128 {
        self.0 / Self::UNIT
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `self * bps / 10_000`, computed without intermediate overflow.
    pub fn share_bps(self, bps: u32) -> Self {
        let bps = bps as u128;
        Self((self.0 / 10_000) * bps + (self.0 % 10_000) * bps / 10_000)
    }
}

/// Parses raw units, with optional `_` separators (`1_000`).
impl FromStr for TokenAmount {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().replace('_', "").parse::<u128>().map(Self)
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = ParseIntError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TokenAmount> for String {
    fn from(amount: TokenAmount) -> Self {
        amount.0.to_string()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = self.0 % Self::UNIT;
        if frac == 0 {
            write!(f, "{} AINET", self.whole())
        } else {
            let digits = format!("{:018}", frac);
            write!(f, "{}.{} AINET", self.whole(), digits.trim_end_matches('0'))
        }
    }
}
