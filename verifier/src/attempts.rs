//! Failed-attempt counters and cooldowns.

use ainet_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-agent record, also the shape returned by `get_attempt_info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptInfo {
    /// Failed completions since the last cooldown.
    pub attempt_count: u32,
    pub last_attempt_time: Timestamp,
    /// No new session before this time.
    pub cooldown_end: Timestamp,
}

impl AttemptInfo {
    pub fn in_cooldown(&self, now: Timestamp) -> bool {
        now < self.cooldown_end
    }
}

/// Attempt records for every agent that has ever failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptTracker {
    records: HashMap<Address, AttemptInfo>,
}

impl AttemptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `agent`; all zeros if it never failed.
    pub fn get(&self, agent: &Address) -> AttemptInfo {
        self.records.get(agent).copied().unwrap_or_default()
    }

    /// Count one failed completion.
    ///
    /// When the counter reaches `max_attempts` it resets to zero and a
    /// cooldown of `cooldown_secs` starts at `now`. Returns the updated record.
    pub fn record_failure(
        &mut self,
        agent: Address,
        now: Timestamp,
        max_attempts: u32,
        cooldown_secs: u64,
    ) -> AttemptInfo {
        let record = self.records.entry(agent).or_default();
        record.attempt_count = record.attempt_count.saturating_add(1);
        record.last_attempt_time = now;
        if record.attempt_count >= max_attempts {
            record.attempt_count = 0;
            record.cooldown_end = now.saturating_add(cooldown_secs);
        }
        *record
    }
}
