//! The AINET token contract.

use std::collections::HashMap;

use ainet_types::{Address, CallContext, Ownable, Pausable, PoolId, TokenAmount, TokenParams};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TokenError;
use crate::event::TokenEvent;
use crate::pool::{Pool, PoolBook, PoolInfo};
use crate::registry::AiRegistry;

/// The token ledger.
///
/// Every `&mut self` operation validates fully before it mutates anything, so
/// an `Err` always leaves the ledger untouched. Events are buffered until the
/// runtime drains them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AinetToken {
    /// The contract's own address; holds the unreleased supply.
    address: Address,
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: TokenAmount,
    balances: HashMap<Address, TokenAmount>,
    /// owner -> spender -> remaining allowance
    allowances: HashMap<Address, HashMap<Address, TokenAmount>>,
    pools: PoolBook,
    registry: AiRegistry,
    ownable: Ownable,
    pausable: Pausable,
    #[serde(skip)]
    pending_events: Vec<TokenEvent>,
}

impl AinetToken {
    /// Deploy the token: mint the whole supply to `address` (the treasury)
    /// and carve it into pools.
    pub fn new(owner: Address, address: Address, params: &TokenParams) -> Result<Self, TokenError> {
        if owner.is_zero() {
            return Err(TokenError::InvalidAddress(owner));
        }
        if address.is_zero() {
            return Err(TokenError::InvalidAddress(address));
        }

        let pools = PoolBook::allocate(params.total_supply, &params.pools)?;

        let mut balances = HashMap::new();
        balances.insert(address, params.total_supply);

        info!(
            token = %address,
            %owner,
            supply = %params.total_supply,
            pools = params.pools.len(),
            paused = params.start_paused,
            "AINET token deployed"
        );

        Ok(Self {
            address,
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            decimals: params.decimals,
            total_supply: params.total_supply,
            balances,
            allowances: HashMap::new(),
            pools,
            registry: AiRegistry::new(),
            ownable: Ownable::new(owner),
            pausable: Pausable::new(params.start_paused),
            pending_events: vec![TokenEvent::Transfer {
                from: Address::ZERO,
                to: address,
                amount: params.total_supply,
            }],
        })
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or(TokenAmount::ZERO)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.allowances
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    pub fn is_paused(&self) -> bool {
        self.pausable.is_paused()
    }

    pub fn get_pool_info(&self, pool: PoolId) -> Result<PoolInfo, TokenError> {
        self.pools
            .get(pool)
            .map(Pool::info)
            .ok_or(TokenError::UnknownPool(pool))
    }

    /// Pools in allocation order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.iter()
    }

    pub fn is_verified_ai(&self, address: &Address) -> bool {
        self.registry.is_verified(address)
    }

    pub fn is_blacklisted(&self, address: &Address) -> bool {
        self.registry.is_blacklisted(address)
    }

    pub fn verified_count(&self) -> usize {
        self.registry.verified_count()
    }

    // ── Pools ───────────────────────────────────────────────────────────

    /// Release `amount` from `pool` to `recipient`. Owner only.
    ///
    /// The tokens leave the treasury through the same guard as any transfer,
    /// so a paused ledger or a blacklisted recipient rejects the release.
    pub fn release_from_pool(
        &mut self,
        ctx: &CallContext,
        pool: PoolId,
        recipient: Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.pools.check_release(pool, amount)?;
        self.check_transfer_guard(&self.address, &recipient)?;
        self.move_balance(self.address, recipient, amount)?;
        let released_total = self.pools.record_release(pool, amount)?;

        info!(%pool, %recipient, %amount, released = %released_total, "pool release");
        self.pending_events.push(TokenEvent::PoolReleased {
            pool,
            recipient,
            amount,
            released_total,
        });
        Ok(())
    }

    // ── AI registry ─────────────────────────────────────────────────────

    /// Mark `address` as a verified AI. Owner only; rejects duplicates.
    pub fn verify_ai(&mut self, ctx: &CallContext, address: Address) -> Result<(), TokenError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.registry.verify(address)?;
        info!(%address, by = %ctx.sender, "AI verified");
        self.pending_events.push(TokenEvent::AiVerified { address });
        Ok(())
    }

    /// Blacklist `address`, revoking any verified status. Owner only.
    ///
    /// Blacklisting an address twice is accepted and changes nothing.
    pub fn blacklist_ai(&mut self, ctx: &CallContext, address: Address) -> Result<(), TokenError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        if address.is_zero() || address == self.address {
            return Err(TokenError::InvalidAddress(address));
        }
        let (newly, was_verified) = self.registry.blacklist(address);
        if newly {
            info!(%address, was_verified, "AI blacklisted");
            self.pending_events.push(TokenEvent::AiBlacklisted {
                address,
                was_verified,
            });
        } else {
            debug!(%address, "already blacklisted");
        }
        Ok(())
    }

    // ── ERC-20 ──────────────────────────────────────────────────────────

    pub fn transfer(&mut self, ctx: &CallContext, to: Address, amount: TokenAmount) -> Result<(), TokenError> {
        self.check_transfer_guard(&ctx.sender, &to)?;
        self.move_balance(ctx.sender, to, amount)
    }

    /// Move `amount` from `from` to `to` on behalf of `ctx.sender`, spending
    /// its allowance. An allowance of `u128::MAX` is never decreased.
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        self.check_transfer_guard(&from, &to)?;

        let allowed = self.allowance(&from, &ctx.sender);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance {
                needed: amount.raw(),
                available: allowed.raw(),
            })?;

        self.move_balance(from, to, amount)?;

        if allowed.raw() != u128::MAX {
            self.allowances
                .entry(from)
                .or_default()
                .insert(ctx.sender, remaining);
        }
        Ok(())
    }

    pub fn approve(&mut self, ctx: &CallContext, spender: Address, amount: TokenAmount) -> Result<(), TokenError> {
        if spender.is_zero() {
            return Err(TokenError::InvalidAddress(spender));
        }
        self.allowances
            .entry(ctx.sender)
            .or_default()
            .insert(spender, amount);
        self.pending_events.push(TokenEvent::Approval {
            owner: ctx.sender,
            spender,
            amount,
        });
        Ok(())
    }

    // ── Admin ───────────────────────────────────────────────────────────

    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.pausable.pause()?;
        info!(by = %ctx.sender, "token paused");
        self.pending_events.push(TokenEvent::Paused { by: ctx.sender });
        Ok(())
    }

    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.ownable.ensure_owner(&ctx.sender)?;
        self.pausable.unpause()?;
        info!(by = %ctx.sender, "token unpaused");
        self.pending_events.push(TokenEvent::Unpaused { by: ctx.sender });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> Result<(), TokenError> {
        let previous = self.ownable.transfer(&ctx.sender, new_owner)?;
        info!(%previous, new = %new_owner, "token ownership transferred");
        self.pending_events.push(TokenEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Drain buffered events for the runtime to publish.
    pub fn drain_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Pause and blacklist checks that run before any balance logic.
    fn check_transfer_guard(&self, from: &Address, to: &Address) -> Result<(), TokenError> {
        self.pausable.ensure_not_paused()?;
        if self.registry.is_blacklisted(from) {
            debug!(%from, "transfer rejected: sender blacklisted");
            return Err(TokenError::SenderBlacklisted(*from));
        }
        if self.registry.is_blacklisted(to) {
            debug!(%to, "transfer rejected: recipient blacklisted");
            return Err(TokenError::RecipientBlacklisted(*to));
        }
        Ok(())
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: TokenAmount) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::InvalidAddress(to));
        }
        let from_balance = self.balance_of(&from);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                needed: amount.raw(),
                available: from_balance.raw(),
            })?;

        if from != to {
            let new_to = self
                .balance_of(&to)
                .checked_add(amount)
                .ok_or(TokenError::Overflow)?;
            self.balances.insert(from, new_from);
            self.balances.insert(to, new_to);
        }

        self.pending_events.push(TokenEvent::Transfer { from, to, amount });
        Ok(())
    }
}
