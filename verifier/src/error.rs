use ainet_token::TokenError;
use ainet_types::{AccessError, Address, ChallengeId, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifierError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("token ledger rejected verification: {0}")]
    Token(#[from] TokenError),

    #[error("agent {agent} is in cooldown until {until}")]
    InCooldown { agent: Address, until: Timestamp },

    #[error("difficulty {0:?} is not configured")]
    UnknownDifficulty(String),

    #[error("difficulty {0:?} is not active")]
    DifficultyInactive(String),

    #[error("invalid difficulty parameters: {0}")]
    InvalidDifficulty(String),

    #[error("max attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("agent {0} has no session")]
    NoSession(Address),

    #[error("challenge {provided} does not match the session of {agent}")]
    ChallengeMismatch { agent: Address, provided: ChallengeId },

    #[error("session {0} is already complete")]
    SessionAlreadyComplete(ChallengeId),

    #[error("ledger {provided} is not the token this verifier is bound to ({expected})")]
    WrongLedger { expected: Address, provided: Address },

    #[error("session nonce overflow")]
    NonceOverflow,
}

impl VerifierError {
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Access(AccessError::Paused))
    }
}
