//! Allocation pools.
//!
//! A pool is a bucket of the fixed supply. Its `total` is set once at
//! construction; `released` only ever grows and never passes `total`.

use ainet_types::params::BPS_DENOMINATOR;
use ainet_types::{PoolId, PoolShare, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TokenError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub total: TokenAmount,
    pub released: TokenAmount,
    pub active: bool,
}

impl Pool {
    pub fn remaining(&self) -> TokenAmount {
        self.total.saturating_sub(self.released)
    }

    pub fn info(&self) -> PoolInfo {
        PoolInfo {
            total: self.total,
            released: self.released,
            remaining: self.remaining(),
            active: self.active,
        }
    }
}

/// Read-only view returned by `get_pool_info`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub total: TokenAmount,
    pub released: TokenAmount,
    pub remaining: TokenAmount,
    pub active: bool,
}

/// All pools, kept in allocation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolBook {
    pools: Vec<Pool>,
}

impl PoolBook {
    /// Partition `supply` across `shares`.
    ///
    /// Shares must be non-empty, list each pool once, and sum to exactly
    /// 10,000 basis points. Integer-division dust goes to the first pool so
    /// the totals add up to `supply` exactly.
    pub fn allocate(supply: TokenAmount, shares: &[PoolShare]) -> Result<Self, TokenError> {
        if shares.is_empty() {
            return Err(TokenError::InvalidAllocation("no pools configured".into()));
        }

        let mut seen = HashSet::new();
        for share in shares {
            if !seen.insert(share.pool) {
                return Err(TokenError::InvalidAllocation(format!(
                    "pool {} listed twice",
                    share.pool
                )));
            }
        }

        let total_bps: u64 = shares.iter().map(|s| s.share_bps as u64).sum();
        if total_bps != BPS_DENOMINATOR as u64 {
            return Err(TokenError::InvalidAllocation(format!(
                "shares sum to {total_bps} bps, expected {BPS_DENOMINATOR}"
            )));
        }

        let mut pools: Vec<Pool> = shares
            .iter()
            .map(|s| Pool {
                id: s.pool,
                total: supply.share_bps(s.share_bps),
                released: TokenAmount::ZERO,
                active: true,
            })
            .collect();

        let allocated = pools
            .iter()
            .try_fold(TokenAmount::ZERO, |acc, p| acc.checked_add(p.total))
            .ok_or(TokenError::Overflow)?;
        let dust = supply.checked_sub(allocated).ok_or(TokenError::Overflow)?;
        pools[0].total = pools[0].total.checked_add(dust).ok_or(TokenError::Overflow)?;

        Ok(Self { pools })
    }

    pub fn get(&self, id: PoolId) -> Option<&Pool> {
        self.pools.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.pools.iter()
    }

    /// Sum of every pool's total.
    pub fn total_allocated(&self) -> TokenAmount {
        self.pools
            .iter()
            .fold(TokenAmount::ZERO, |acc, p| acc.checked_add(p.total).unwrap_or(acc))
    }

    /// Check that `amount` can be released from `id` without applying it.
    pub fn check_release(&self, id: PoolId, amount: TokenAmount) -> Result<&Pool, TokenError> {
        if amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }
        let pool = self.get(id).ok_or(TokenError::UnknownPool(id))?;
        if !pool.active {
            return Err(TokenError::PoolInactive(id));
        }
        let requested_total = pool.released.checked_add(amount);
        if requested_total.map_or(true, |t| t > pool.total) {
            return Err(TokenError::ExceedsAllocation {
                pool: id,
                requested: amount.raw(),
                remaining: pool.remaining().raw(),
            });
        }
        Ok(pool)
    }

    /// Apply a release previously accepted by [`check_release`](Self::check_release).
    /// Returns the pool's new released total.
    pub fn record_release(&mut self, id: PoolId, amount: TokenAmount) -> Result<TokenAmount, TokenError> {
        self.check_release(id, amount)?;
        let pool = self
            .pools
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TokenError::UnknownPool(id))?;
        pool.released = pool
            .released
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        Ok(pool.released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ainet_types::TokenParams;

    fn default_book() -> PoolBook {
        let params = TokenParams::ainet_defaults();
        PoolBook::allocate(params.total_supply, &params.pools).unwrap()
    }

    #[test]
    fn reference_split() {
        let book = default_book();
        let whole = |id| book.get(id).unwrap().total.whole();
        assert_eq!(whole(PoolId::Community), 500_000_000);
        assert_eq!(whole(PoolId::Development), 250_000_000);
        assert_eq!(whole(PoolId::Liquidity), 150_000_000);
        assert_eq!(whole(PoolId::Founder), 50_000_000);
        assert_eq!(whole(PoolId::Human), 50_000_000);
        assert_eq!(book.total_allocated(), TokenAmount::from_whole(1_000_000_000));
    }

    #[test]
    fn dust_goes_to_first_pool() {
        let shares = [
            PoolShare { pool: PoolId::Founder, share_bps: 3333 },
            PoolShare { pool: PoolId::Human, share_bps: 3333 },
            PoolShare { pool: PoolId::Liquidity, share_bps: 3334 },
        ];
        let supply = TokenAmount::new(10);
        let book = PoolBook::allocate(supply, &shares).unwrap();
        assert_eq!(book.total_allocated(), supply);
        assert_eq!(book.get(PoolId::Founder).unwrap().total, TokenAmount::new(4));
    }

    #[test]
    fn rejects_shares_not_summing_to_whole() {
        let shares = [PoolShare { pool: PoolId::Community, share_bps: 9000 }];
        let err = PoolBook::allocate(TokenAmount::new(100), &shares).unwrap_err();
        assert!(matches!(err, TokenError::InvalidAllocation(_)));
    }

    #[test]
    fn rejects_duplicate_pools() {
        let shares = [
            PoolShare { pool: PoolId::Community, share_bps: 5000 },
            PoolShare { pool: PoolId::Community, share_bps: 5000 },
        ];
        assert!(matches!(
            PoolBook::allocate(TokenAmount::new(100), &shares),
            Err(TokenError::InvalidAllocation(_))
        ));
    }

    #[test]
    fn rejects_empty_shares() {
        assert!(PoolBook::allocate(TokenAmount::new(100), &[]).is_err());
    }

    #[test]
    fn release_up_to_total_then_reject() {
        let mut book = default_book();
        let total = book.get(PoolId::Human).unwrap().total;
        let half = TokenAmount::new(total.raw() / 2);
        book.record_release(PoolId::Human, half).unwrap();
        book.record_release(PoolId::Human, total.saturating_sub(half)).unwrap();
        assert!(book.get(PoolId::Human).unwrap().remaining().is_zero());

        let err = book.record_release(PoolId::Human, TokenAmount::new(1)).unwrap_err();
        assert!(matches!(err, TokenError::ExceedsAllocation { remaining: 0, .. }));
        assert_eq!(book.get(PoolId::Human).unwrap().released, total);
    }

    #[test]
    fn zero_release_rejected() {
        let book = default_book();
        assert_eq!(
            book.check_release(PoolId::Community, TokenAmount::ZERO).unwrap_err(),
            TokenError::ZeroAmount
        );
    }

    #[test]
    fn unknown_pool_rejected() {
        let shares = [PoolShare { pool: PoolId::Community, share_bps: 10_000 }];
        let book = PoolBook::allocate(TokenAmount::new(100), &shares).unwrap();
        assert_eq!(
            book.check_release(PoolId::Human, TokenAmount::new(1)).unwrap_err(),
            TokenError::UnknownPool(PoolId::Human)
        );
    }

    #[test]
    fn pool_info_reports_remaining() {
        let mut book = default_book();
        book.record_release(PoolId::Founder, TokenAmount::from_whole(10)).unwrap();
        let info = book.get(PoolId::Founder).unwrap().info();
        assert_eq!(info.released, TokenAmount::from_whole(10));
        assert_eq!(info.remaining, TokenAmount::from_whole(49_999_990));
        assert!(info.active);
    }
}
