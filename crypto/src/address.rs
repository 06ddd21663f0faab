//! Address derivation.
//!
//! Addresses are the last 20 bytes of a Blake2b-256 digest, mirroring how
//! account-model chains truncate a hash into an address.

use ainet_types::Address;

use crate::blake2b_256_multi;

const CONTRACT_TAG: &[u8] = b"ainet/contract";
const SEED_TAG: &[u8] = b"ainet/account";

fn truncate(digest: [u8; 32]) -> Address {
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::new(bytes)
}

/// Address of the contract deployed by `deployer` with its `nonce`-th deployment.
pub fn contract_address(deployer: &Address, nonce: u64) -> Address {
    truncate(blake2b_256_multi(&[
        CONTRACT_TAG,
        deployer.as_bytes(),
        &nonce.to_be_bytes(),
    ]))
}

/// Deterministic account address from an arbitrary seed (e.g. a name).
pub fn address_from_seed(seed: &[u8]) -> Address {
    truncate(blake2b_256_multi(&[SEED_TAG, seed]))
}
