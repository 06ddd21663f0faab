//! Token-ledger errors. Every variant is a revert: the call leaves no trace.

use ainet_types::{AccessError, Address, PoolId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("invalid pool allocation: {0}")]
    InvalidAllocation(String),

    #[error("pool {0} does not exist")]
    UnknownPool(PoolId),

    #[error("pool {0} is not active")]
    PoolInactive(PoolId),

    #[error("release of {requested} exceeds pool {pool} allocation ({remaining} remaining)")]
    ExceedsAllocation {
        pool: PoolId,
        requested: u128,
        remaining: u128,
    },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("address {0} is already a verified AI")]
    AlreadyVerified(Address),

    #[error("address {0} is blacklisted")]
    Blacklisted(Address),

    #[error("sender {0} is blacklisted")]
    SenderBlacklisted(Address),

    #[error("recipient {0} is blacklisted")]
    RecipientBlacklisted(Address),

    #[error("invalid address: {0}")]
    InvalidAddress(Address),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("arithmetic overflow")]
    Overflow,
}

impl TokenError {
    /// Whether this is the paused-contract revert.
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Access(AccessError::Paused))
    }
}
