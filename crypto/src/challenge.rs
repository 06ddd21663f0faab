//! Challenge-id derivation.

use ainet_types::{Address, ChallengeId, Timestamp};

use crate::blake2b_256_multi;

const CHALLENGE_TAG: &[u8] = b"ainet/challenge";

/// Derive the id of a new verification session.
///
/// The verifier's `nonce` is strictly increasing, so two sessions never share
/// an id even when the same agent starts twice within one block.
pub fn derive_challenge_id(
    verifier: &Address,
    agent: &Address,
    difficulty: &str,
    nonce: u64,
    now: Timestamp,
) -> ChallengeId {
    let label_len = (difficulty.len() as u64).to_be_bytes();
    ChallengeId::new(blake2b_256_multi(&[
        CHALLENGE_TAG,
        verifier.as_bytes(),
        agent.as_bytes(),
        &label_len,
        difficulty.as_bytes(),
        &nonce.to_be_bytes(),
        &now.as_secs().to_be_bytes(),
    ]))
}
