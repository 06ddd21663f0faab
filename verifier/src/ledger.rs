//! The seam between the verifier and the token ledger.

use ainet_token::{AinetToken, TokenError};
use ainet_types::{Address, CallContext};

/// What the verifier needs from the ledger it grants verification on.
pub trait VerificationLedger {
    /// Address of the ledger contract.
    fn address(&self) -> Address;

    /// Mark `agent` as a verified AI, with `ctx.sender` as the caller.
    fn verify_ai(&mut self, ctx: &CallContext, agent: Address) -> Result<(), TokenError>;

    fn is_verified_ai(&self, agent: &Address) -> bool;
}

impl VerificationLedger for AinetToken {
    fn address(&self) -> Address {
        AinetToken::address(self)
    }

    fn verify_ai(&mut self, ctx: &CallContext, agent: Address) -> Result<(), TokenError> {
        AinetToken::verify_ai(self, ctx, agent)
    }

    fn is_verified_ai(&self, agent: &Address) -> bool {
        AinetToken::is_verified_ai(self, agent)
    }
}
