//! Fundamental types for the AINET workspace.
//!
//! This crate defines the core types shared by the token ledger, the verifier
//! and the chain runtime: addresses, amounts, timestamps, challenge ids, the
//! call context, protocol parameters, and the owner/pause access primitives.

pub mod access;
pub mod address;
pub mod amount;
pub mod context;
pub mod hash;
pub mod params;
pub mod pool;
pub mod time;

pub use access::{AccessError, Ownable, Pausable};
pub use address::{Address, AddressParseError};
pub use amount::TokenAmount;
pub use context::CallContext;
pub use hash::ChallengeId;
pub use params::{DifficultyConfig, PoolShare, TokenParams, VerifierParams};
pub use pool::PoolId;
pub use time::Timestamp;
