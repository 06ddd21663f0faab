//! Events published by the chain after each committed call.

use ainet_token::TokenEvent;
use ainet_types::Address;
use ainet_verifier::VerifierEvent;
use serde::{Deserialize, Serialize};

/// A contract event tagged with the contract that emitted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contract", rename_all = "snake_case")]
pub enum ChainEvent {
    Token { address: Address, event: TokenEvent },
    Verifier { address: Address, event: VerifierEvent },
}

impl ChainEvent {
    /// Address of the emitting contract.
    pub fn source(&self) -> Address {
        match self {
            Self::Token { address, .. } | Self::Verifier { address, .. } => *address,
        }
    }

    pub fn as_token(&self) -> Option<&TokenEvent> {
        match self {
            Self::Token { event, .. } => Some(event),
            Self::Verifier { .. } => None,
        }
    }

    pub fn as_verifier(&self) -> Option<&VerifierEvent> {
        match self {
            Self::Verifier { event, .. } => Some(event),
            Self::Token { .. } => None,
        }
    }
}

/// Synchronous fan-out event bus for chain events.
///
/// Listeners are invoked inline on commit; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&ChainEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ChainEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &ChainEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
