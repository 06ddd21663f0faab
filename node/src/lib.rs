//! AINET chain runtime.
//!
//! The runtime is what frontends and backends talk to. It:
//! - Deploys the token and the verifier and wires ownership between them
//! - Executes calls atomically against both contracts
//! - Keeps block time through a [`Clock`](ainet_nullables::Clock)
//! - Records receipts and fans events out to subscribers
//! - Captures and restores bincode snapshots

pub mod call;
pub mod chain;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;

pub use call::{Call, CallOutput};
pub use chain::{Chain, ChainSnapshot, Receipt};
pub use config::{NodeConfig, TokenConfig, VerifierConfig};
pub use error::ChainError;
pub use event::{ChainEvent, EventBus};
pub use logging::{init_logging, LogFormat};
pub use ainet_verifier::CHECKPOINT_BYTES;
