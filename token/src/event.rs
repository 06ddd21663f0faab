//! Events emitted by the token ledger.

use ainet_types::{Address, PoolId, TokenAmount};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Balance movement. `from` is the zero address for the genesis mint.
    Transfer {
        from: Address,
        to: Address,
        amount: TokenAmount,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: TokenAmount,
    },
    /// Tokens released from an allocation pool.
    PoolReleased {
        pool: PoolId,
        recipient: Address,
        amount: TokenAmount,
        released_total: TokenAmount,
    },
    AiVerified {
        address: Address,
    },
    AiBlacklisted {
        address: Address,
        was_verified: bool,
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
