//! Difficulty configuration.

use ainet_types::DifficultyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::VerifierError;
use crate::outcome::FailureReason;

/// Bytes per checkpoint word in a proof.
pub const CHECKPOINT_BYTES: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub min_time_required: u64,
    pub max_time_allowed: u64,
    pub min_checkpoints: u32,
    pub active: bool,
}

impl DifficultyParams {
    pub fn new(min_time_required: u64, max_time_allowed: u64, min_checkpoints: u32) -> Result<Self, VerifierError> {
        if min_time_required >= max_time_allowed {
            return Err(VerifierError::InvalidDifficulty(format!(
                "min time {min_time_required}s must be below max time {max_time_allowed}s"
            )));
        }
        Ok(Self {
            min_time_required,
            max_time_allowed,
            min_checkpoints,
            active: true,
        })
    }

    /// Judge a submission. Both window bounds are inclusive.
    pub fn evaluate(&self, elapsed_secs: u64, proof: &[u8]) -> Result<(), FailureReason> {
        if elapsed_secs < self.min_time_required {
            return Err(FailureReason::TooFast);
        }
        if elapsed_secs > self.max_time_allowed {
            return Err(FailureReason::TooSlow);
        }
        if checkpoint_count(proof) < self.min_checkpoints as usize {
            return Err(FailureReason::InsufficientCheckpoints);
        }
        Ok(())
    }
}

/// Number of whole checkpoint words in `proof`.
pub fn checkpoint_count(proof: &[u8]) -> usize {
    proof.len() / CHECKPOINT_BYTES
}

/// Difficulties keyed by label. Entries are upserted or deactivated, never removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    entries: BTreeMap<String, DifficultyParams>,
}

impl DifficultyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&DifficultyParams> {
        self.entries.get(label)
    }

    /// Insert or replace `label`, marking it active.
    pub fn upsert(&mut self, label: &str, params: DifficultyParams) -> Result<(), VerifierError> {
        if label.trim().is_empty() {
            return Err(VerifierError::InvalidDifficulty("label must not be empty".into()));
        }
        self.entries.insert(label.to_string(), params);
        Ok(())
    }

    pub fn upsert_config(&mut self, config: &DifficultyConfig) -> Result<(), VerifierError> {
        let params = DifficultyParams::new(
            config.min_time_required_secs,
            config.max_time_allowed_secs,
            config.min_checkpoints,
        )?;
        self.upsert(&config.label, params)
    }

    pub fn deactivate(&mut self, label: &str) -> Result<(), VerifierError> {
        let entry = self
            .entries
            .get_mut(label)
            .ok_or_else(|| VerifierError::UnknownDifficulty(label.to_string()))?;
        entry.active = false;
        Ok(())
    }

    /// Look up a difficulty that may start new sessions.
    pub fn active(&self, label: &str) -> Result<&DifficultyParams, VerifierError> {
        let params = self
            .get(label)
            .ok_or_else(|| VerifierError::UnknownDifficulty(label.to_string()))?;
        if !params.active {
            return Err(VerifierError::DifficultyInactive(label.to_string()));
        }
        Ok(params)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
