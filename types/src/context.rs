//! Per-call execution context.

use crate::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// Who is calling and at which block time.
///
/// Every state-mutating contract operation takes one of these; the runtime
/// fills it in from the submitted transaction and the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub sender: Address,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(sender: Address, now: Timestamp) -> Self {
        Self { sender, now }
    }

    /// The same block, but with a contract acting as the sender.
    ///
    /// Used when one contract calls into another within a transaction.
    pub fn as_contract(&self, contract: Address) -> Self {
        Self {
            sender: contract,
            now: self.now,
        }
    }
}
