//! Owner and pause primitives shared by both contracts.

use crate::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("caller {caller} is not the owner")]
    NotOwner { caller: Address },

    #[error("new owner cannot be the zero address")]
    ZeroOwner,

    #[error("contract is paused")]
    Paused,

    #[error("contract is already paused")]
    AlreadyPaused,

    #[error("contract is not paused")]
    NotPaused,
}

/// Single-owner access control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn ensure_owner(&self, caller: &Address) -> Result<(), AccessError> {
        if *caller != self.owner {
            return Err(AccessError::NotOwner { caller: *caller });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`. Returns the previous owner.
    pub fn transfer(&mut self, caller: &Address, new_owner: Address) -> Result<Address, AccessError> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(AccessError::ZeroOwner);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

/// Emergency stop switch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pausable {
    paused: bool,
}

impl Pausable {
    pub fn new(paused: bool) -> Self {
        Self { paused }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ensure_not_paused(&self) -> Result<(), AccessError> {
        if self.paused {
            return Err(AccessError::Paused);
        }
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), AccessError> {
        if self.paused {
            return Err(AccessError::AlreadyPaused);
        }
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<(), AccessError> {
        if !self.paused {
            return Err(AccessError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }
}
