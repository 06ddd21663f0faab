//! The per-agent session slot.

use ainet_types::{ChallengeId, Timestamp};
use serde::{Deserialize, Serialize};

/// One verification session. Each agent holds at most one; starting a new
/// session replaces the old one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    pub challenge_id: ChallengeId,
    /// Difficulty label the session was started with.
    pub difficulty: String,
    pub start_time: Timestamp,
    pub is_complete: bool,
}

impl VerificationSession {
    pub fn new(challenge_id: ChallengeId, difficulty: impl Into<String>, start_time: Timestamp) -> Self {
        Self {
            challenge_id,
            difficulty: difficulty.into(),
            start_time,
            is_complete: false,
        }
    }

    /// Seconds since the session started.
    pub fn elapsed(&self, now: Timestamp) -> u64 {
        self.start_time.elapsed_since(now)
    }
}
