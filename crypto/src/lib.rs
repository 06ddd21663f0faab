//! Cryptographic helpers for AINET.
//!
//! - **Blake2b-256** for every derived identifier
//! - Contract address derivation from deployer + nonce
//! - Challenge-id derivation for verification sessions

pub mod address;
pub mod challenge;
pub mod hash;

pub use address::{address_from_seed, contract_address};
pub use challenge::derive_challenge_id;
pub use hash::{blake2b_256, blake2b_256_multi};
