//! AIVerifier, the verification state machine.
//!
//! Per agent: `NoSession → SessionActive → {Verified | Failed (attempt recorded)}`.
//!
//! An agent starts a session for a difficulty, waits inside that difficulty's
//! time window, then submits an opaque proof. Only timing and the number of
//! 32-byte checkpoint words are policed here; the content of the proof is
//! produced and judged off-chain.
//!
//! Two kinds of failure are kept apart:
//! - **Reverts** ([`VerifierError`]): structurally invalid calls (paused,
//!   in cooldown, no session, wrong challenge id). Nothing changes.
//! - **Soft failures** ([`CompletionOutcome::Failed`]): a proof outside the
//!   window. The call succeeds, the attempt counter moves, an event is
//!   emitted, and reaching `max_attempts` imposes a cooldown.
//!
//! A successful completion calls the token ledger's `verify_ai` with the
//! verifier as sender, so the verifier must own the ledger.

pub mod attempts;
pub mod difficulty;
pub mod error;
pub mod event;
pub mod ledger;
pub mod outcome;
pub mod session;
pub mod verifier;

pub use attempts::{AttemptInfo, AttemptTracker};
pub use difficulty::{DifficultyParams, DifficultyTable, CHECKPOINT_BYTES};
pub use error::VerifierError;
pub use event::VerifierEvent;
pub use ledger::VerificationLedger;
pub use outcome::{CompletionOutcome, FailureReason};
pub use session::VerificationSession;
pub use verifier::{AiVerifier, DEFAULT_COOLDOWN_PERIOD_SECS, DEFAULT_MAX_ATTEMPTS};
