//! 20-byte account addresses, shown as `0x`-prefixed hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An account or contract address.
///
/// Serialized as its `0x…` hex string so config files and JSON receipts
/// stay readable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("address must be 40 hex characters, got {0}")]
    BadLength(usize),

    #[error("invalid hex in address: {0}")]
    InvalidHex(String),
}

impl Address {
    /// The null address. Never a valid transfer recipient or owner.
    pub const ZERO: Self = Self([0u8; 20]);

    pub const PREFIX: &'static str = "0x";

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Address whose last eight bytes hold `n` big-endian. Used for fixtures.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| AddressParseError::MissingPrefix(s.to_string()))?;
        if body.len() != 40 {
            return Err(AddressParseError::BadLength(body.len()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}…)", hex::encode(&self.0[..4]))
    }
}
