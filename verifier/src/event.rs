//! Events emitted by the verifier.

use ainet_types::{Address, ChallengeId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::outcome::FailureReason;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VerifierEvent {
    SessionStarted {
        agent: Address,
        challenge_id: ChallengeId,
        difficulty: String,
    },
    VerificationSucceeded {
        agent: Address,
        challenge_id: ChallengeId,
    },
    VerificationFailed {
        agent: Address,
        challenge_id: ChallengeId,
        reason: FailureReason,
    },
    CooldownImposed {
        agent: Address,
        until: Timestamp,
    },
    DifficultyUpdated {
        label: String,
        min_time_required: u64,
        max_time_allowed: u64,
        min_checkpoints: u32,
    },
    DifficultyDeactivated {
        label: String,
    },
    MaxAttemptsUpdated {
        max_attempts: u32,
    },
    CooldownPeriodUpdated {
        cooldown_secs: u64,
    },
    Paused {
        by: Address,
    },
    Unpaused {
        by: Address,
    },
    OwnershipTransferred {
        previous: Address,
        new: Address,
    },
}
