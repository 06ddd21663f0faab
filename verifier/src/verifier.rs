//! The AIVerifier contract.

use std::collections::HashMap;

use ainet_crypto::derive_challenge_id;
use ainet_types::{Address, CallContext, ChallengeId, Ownable, Pausable};
use ainet_utils::format_duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::attempts::{AttemptInfo, AttemptTracker};
use crate::difficulty::{checkpoint_count, DifficultyParams, DifficultyTable};
use crate::error::VerifierError;
use crate::event::VerifierEvent;
use crate::ledger::VerificationLedger;
use crate::outcome::CompletionOutcome;
use crate::session::VerificationSession;

/// Failed completions allowed before a cooldown.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Cooldown length once `max_attempts` is reached (1 hour).
pub const DEFAULT_COOLDOWN_PERIOD_SECS: u64 = 3600;

/// The verifier contract.
///
/// Like the token, each operation validates before mutating; an `Err` leaves
/// sessions, counters and the nonce untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AiVerifier {
    address: Address,
    /// The ledger this verifier grants verification on.
    token: Address,
    ownable: Ownable,
    pausable: Pausable,
    difficulties: DifficultyTable,
    sessions: HashMap<Address, VerificationSession>,
    attempts: AttemptTracker,
    max_attempts: u32,
    cooldown_period_secs: u64,
    /// Feeds challenge-id derivation; bumped on every started session.
    nonce: u64,
    #[serde(skip)]
    pending_events: Vec<VerifierEvent>,
}

impl AiVerifier {
    pub fn new(owner: Address, address: Address, token: Address) -> Self {
        info!(verifier = %address, %owner, %token, "AIVerifier deployed");
        Self {
            address,
            token,
            ownable: Ownable::new(owner),
            pausable: Pausable::default(),
            difficulties: DifficultyTable::new(),
            sessions: HashMap::new(),
            attempts: AttemptTracker::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cooldown_period_secs: DEFAULT_COOLDOWN_PERIOD_SECS,
            nonce: 0,
            pending_events: Vec::new(),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    pub fn is_paused(&self) -> bool {
        self.pausable.is_paused()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn cooldown_period_secs(&self) -> u64 {
        self.cooldown_period_secs
    }

    pub fn difficulty(&self, label: &str) -> Option<&DifficultyParams> {
        self.difficulties.get(label)
    }

    pub fn difficulties(&self) -> &DifficultyTable {
        &self.difficulties
    }

    pub fn session(&self, agent: &Address) -> Option<&VerificationSession> {
        self.sessions.get(agent)
    }

    pub fn get_attempt_info(&self, agent: &Address) -> AttemptInfo {
        self.attempts.get(agent)
    }

    // ── Sessions ────────────────────────────────────────────────────────

    /// Open a session for `ctx.sender`, replacing any session it already had.
    pub fn start_session(&mut self, ctx: &CallContext, difficulty: &str) -> Result<ChallengeId, VerifierError> {
        self.pausable.ensure_not_paused()?;
        let agent = ctx.sender;
        self.ensure_not_in_cooldown(&agent, ctx)?;
        self.difficulties.active(difficulty)?;

        let nonce = self.nonce;
        let next_nonce = nonce.checked_add(1).ok_or(VerifierError::NonceOverflow)?;
        let challenge_id = derive_challenge_id(&self.address, &agent, difficulty, nonce, ctx.now);

        let session = VerificationSession::new(challenge_id, difficulty, ctx.now);
        if let Some(previous) = self.sessions.insert(agent, session) {
            if !previous.is_complete {
                debug!(%agent, previous = %previous.challenge_id, "abandoned session replaced");
            }
        }
        self.nonce = next_nonce;

        info!(%agent, %challenge_id, difficulty, "session started");
        self.pending_events.push(VerifierEvent::SessionStarted {
            agent,
            challenge_id,
            difficulty: difficulty.to_string(),
        });
        Ok(challenge_id)
    }

    /// Submit a proof for the caller's session.
    ///
    /// Out-of-window or short proofs come back as `Ok(Failed { .. })` with the
    /// attempt recorded. On success the ledger marks the caller verified; if
    /// the ledger refuses, the whole call reverts.
    ///
    /// An agent in cooldown cannot complete either. This goes beyond the
    /// `start_session` guard on purpose: the session left open by the failure
    /// that imposed the cooldown would otherwise still be completable.
    pub fn complete_session<L: VerificationLedger>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        challenge_id: ChallengeId,
        proof: &[u8],
    ) -> Result<CompletionOutcome, VerifierError> {
        self.pausable.ensure_not_paused()?;
        if ledger.address() != self.token {
            return Err(VerifierError::WrongLedger {
                expected: self.token,
                provided: ledger.address(),
            });
        }
        let agent = ctx.sender;
        self.ensure_not_in_cooldown(&agent, ctx)?;

        let session = self
            .sessions
            .get(&agent)
            .ok_or(VerifierError::NoSession(agent))?;
        if session.challenge_id != challenge_id {
            return Err(VerifierError::ChallengeMismatch {
                agent,
                provided: challenge_id,
            });
        }
        if session.is_complete {
            return Err(VerifierError::SessionAlreadyComplete(challenge_id));
        }
        let difficulty = self
            .difficulties
            .get(&session.difficulty)
            .ok_or_else(|| VerifierError::UnknownDifficulty(session.difficulty.clone()))?;

        let elapsed = session.elapsed(ctx.now);
        if let Err(reason) = difficulty.evaluate(elapsed, proof) {
            let record = self.attempts.record_failure(
                agent,
                ctx.now,
                self.max_attempts,
                self.cooldown_period_secs,
            );
            warn!(
                %agent,
                %challenge_id,
                %reason,
                elapsed,
                checkpoints = checkpoint_count(proof),
                attempts = record.attempt_count,
                "verification failed"
            );
            self.pending_events.push(VerifierEvent::VerificationFailed {
                agent,
                challenge_id,
                reason,
            });

            // The counter only reads zero after a failure when it just wrapped.
            let cooldown_until = if record.attempt_count == 0 {
                warn!(
                    %agent,
                    until = %record.cooldown_end,
                    cooldown = %format_duration(self.cooldown_period_secs),
                    "max attempts reached, cooldown imposed"
                );
                self.pending_events.push(VerifierEvent::CooldownImposed {
                    agent,
                    until: record.cooldown_end,
                });
                Some(record.cooldown_end)
            } else {
                None
            };

            return Ok(CompletionOutcome::Failed {
                reason,
                attempt_count: record.attempt_count,
                cooldown_until,
            });
        }

        ledger.verify_ai(&ctx.as_contract(self.address), agent)?;

        if let Some(session) = self.sessions.get_mut(&agent) {
            session.is_complete = true;
        }
        info!(%agent, %challenge_id, elapsed, "verification succeeded");
        self.pending_events.push(VerifierEvent::VerificationSucceeded {
            agent,
            challenge_id,
        });
        Ok(CompletionOutcome::Verified)
    }

    // ── Configuration ───────────────────────────────────────────────────

    pub fn set_difficulty_params(
        &mut self,
        ctx: &CallContext,
        label: &str,
        min_time_required: u64,
        max_time_allowed: u64,
        min_checkpoints: u32,
    ) -> Result<(), VerifierError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        let params = DifficultyParams::new(min_time_required, max_time_allowed, min_checkpoints)?;
        self.difficulties.upsert(label, params)?;
        info!(label, min_time_required, max_time_allowed, min_checkpoints, "difficulty set");
        self.pending_events.push(VerifierEvent::DifficultyUpdated {
            label: label.to_string(),
            min_time_required,
            max_time_allowed,
            min_checkpoints,
        });
        Ok(())
    }

    /// Stop `label` from being used for new sessions. Live sessions on it
    /// can still complete.
    pub fn deactivate_difficulty(&mut self, ctx: &CallContext, label: &str) -> Result<(), VerifierError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.difficulties.deactivate(label)?;
        info!(label, "difficulty deactivated");
        self.pending_events.push(VerifierEvent::DifficultyDeactivated {
            label: label.to_string(),
        });
        Ok(())
    }

    pub fn set_max_attempts(&mut self, ctx: &CallContext, max_attempts: u32) -> Result<(), VerifierError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        if max_attempts == 0 {
            return Err(VerifierError::InvalidMaxAttempts);
        }
        self.max_attempts = max_attempts;
        info!(max_attempts, "max attempts set");
        self.pending_events
            .push(VerifierEvent::MaxAttemptsUpdated { max_attempts });
        Ok(())
    }

    pub fn set_cooldown_period(&mut self, ctx: &CallContext, cooldown_secs: u64) -> Result<(), VerifierError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.cooldown_period_secs = cooldown_secs;
        info!(cooldown = %format_duration(cooldown_secs), "cooldown period set");
        self.pending_events
            .push(VerifierEvent::CooldownPeriodUpdated { cooldown_secs });
        Ok(())
    }

    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), VerifierError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.pausable.pause()?;
        info!(by = %ctx.sender, "verifier paused");
        self.pending_events.push(VerifierEvent::Paused { by: ctx.sender });
        Ok(())
    }

    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), VerifierError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.pausable.unpause()?;
        info!(by = %ctx.sender, "verifier unpaused");
        self.pending_events.push(VerifierEvent::Unpaused { by: ctx.sender });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> Result<(), VerifierError> {
        let previous = self.ownable.transfer(&ctx.sender, new_owner)?;
        info!(%previous, new = %new_owner, "verifier ownership transferred");
        self.pending_events.push(VerifierEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Drain buffered events for the runtime to publish.
    pub fn drain_events(&mut self) -> Vec<VerifierEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn ensure_not_in_cooldown(&self, agent: &Address, ctx: &CallContext) -> Result<(), VerifierError> {
        let info = self.attempts.get(agent);
        if info.in_cooldown(ctx.now) {
            debug!(%agent, until = %info.cooldown_end, "rejected: in cooldown");
            return Err(VerifierError::InCooldown {
                agent: *agent,
                until: info.cooldown_end,
            });
        }
        Ok(())
    }
}
