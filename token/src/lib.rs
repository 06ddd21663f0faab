//! AINET, the fixed-supply token ledger.
//!
//! The whole supply is minted once, at construction, to the token's own
//! address and split into named allocation pools. Pools are accounting
//! buckets: releasing from a pool moves tokens out of the treasury to a
//! recipient and raises the pool's `released` counter, never above its total.
//!
//! The ledger also keeps the registry of verified AI agents and a blacklist.
//! Blacklisted addresses can neither send nor receive. In the intended
//! deployment the ledger's owner is the verifier contract, so only a passed
//! verification session can mark an address as a verified AI.

pub mod error;
pub mod event;
pub mod ledger;
pub mod pool;
pub mod registry;

pub use error::TokenError;
pub use event::TokenEvent;
pub use ledger::AinetToken;
pub use pool::{Pool, PoolBook, PoolInfo};
pub use registry::AiRegistry;
