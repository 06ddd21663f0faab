//! Result of a completion that did not revert.

use ainet_types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a proof was refused without reverting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Submitted before `min_time_required` elapsed.
    TooFast,
    /// Submitted after `max_time_allowed` elapsed.
    TooSlow,
    /// Proof carried fewer checkpoint words than the difficulty asks for.
    InsufficientCheckpoints,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooFast => "too_fast",
            Self::TooSlow => "too_slow",
            Self::InsufficientCheckpoints => "insufficient_checkpoints",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged result of `complete_session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// Session complete; the agent is now a verified AI on the ledger.
    Verified,
    /// Attempt recorded. `attempt_count` is the counter after this failure
    /// (zero when this failure triggered the cooldown).
    Failed {
        reason: FailureReason,
        attempt_count: u32,
        cooldown_until: Option<Timestamp>,
    },
}

impl CompletionOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}
