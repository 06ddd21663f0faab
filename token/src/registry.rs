//! Verified-AI registry and blacklist.

use ainet_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TokenError;

/// Membership sets for verified AIs and blacklisted addresses.
///
/// An address is never in both sets: blacklisting strips verified status and
/// a blacklisted address cannot be verified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRegistry {
    verified: HashSet<Address>,
    blacklisted: HashSet<Address>,
}

impl AiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_verified(&self, address: &Address) -> bool {
        self.verified.contains(address)
    }

    pub fn is_blacklisted(&self, address: &Address) -> bool {
        self.blacklisted.contains(address)
    }

    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }

    /// Check that `address` may be verified, without applying it.
    pub fn check_verify(&self, address: &Address) -> Result<(), TokenError> {
        if address.is_zero() {
            return Err(TokenError::InvalidAddress(*address));
        }
        if self.is_blacklisted(address) {
            return Err(TokenError::Blacklisted(*address));
        }
        if self.is_verified(address) {
            return Err(TokenError::AlreadyVerified(*address));
        }
        Ok(())
    }

    pub fn verify(&mut self, address: Address) -> Result<(), TokenError> {
        self.check_verify(&address)?;
        self.verified.insert(address);
        Ok(())
    }

    /// Blacklist `address`. Returns `(newly_blacklisted, was_verified)`.
    pub fn blacklist(&mut self, address: Address) -> (bool, bool) {
        let was_verified = self.verified.remove(&address);
        let newly = self.blacklisted.insert(address);
        (newly, was_verified)
    }
}
