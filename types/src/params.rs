//! Deployment parameters for the token and the verifier.
//!
//! These are the values supplied at deployment (pool shares, initial pause)
//! and the tuning knobs the owner sets afterwards (difficulties, attempt
//! limits, cooldown). The runtime loads them from TOML.

use crate::{PoolId, TokenAmount};
use serde::{Deserialize, Serialize};

/// Basis points that make up the whole supply.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// One pool's share of the total supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolShare {
    pub pool: PoolId,
    /// Share of the total supply in basis points (5000 = 50%).
    pub share_bps: u32,
}

/// Construction parameters for the AINET token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Fixed total supply, in raw units.
    pub total_supply: TokenAmount,
    /// Pool shares in allocation order. The first pool absorbs any
    /// rounding remainder so the pools always sum to `total_supply`.
    pub pools: Vec<PoolShare>,
    /// Deploy with transfers paused.
    pub start_paused: bool,
}

impl TokenParams {
    /// Reference allocation: 50 / 25 / 15 / 5 / 5.
    pub fn ainet_defaults() -> Self {
        Self {
            name: "AI Network Token".to_string(),
            symbol: "AINET".to_string(),
            decimals: TokenAmount::DECIMALS,
            total_supply: TokenAmount::from_whole(1_000_000_000),
            pools: vec![
                PoolShare { pool: PoolId::Community, share_bps: 5000 },
                PoolShare { pool: PoolId::Development, share_bps: 2500 },
                PoolShare { pool: PoolId::Liquidity, share_bps: 1500 },
                PoolShare { pool: PoolId::Founder, share_bps: 500 },
                PoolShare { pool: PoolId::Human, share_bps: 500 },
            ],
            start_paused: false,
        }
    }

    /// Sum of all configured shares.
    pub fn total_share_bps(&self) -> u64 {
        self.pools.iter().map(|p| p.share_bps as u64).sum()
    }
}

impl Default for TokenParams {
    fn default() -> Self {
        Self::ainet_defaults()
    }
}

/// A difficulty tuple as configured by the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub label: String,
    pub min_time_required_secs: u64,
    pub max_time_allowed_secs: u64,
    pub min_checkpoints: u32,
}

impl DifficultyConfig {
    pub fn new(label: impl Into<String>, min_secs: u64, max_secs: u64, checkpoints: u32) -> Self {
        Self {
            label: label.into(),
            min_time_required_secs: min_secs,
            max_time_allowed_secs: max_secs,
            min_checkpoints: checkpoints,
        }
    }
}

/// Verifier tuning applied right after deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierParams {
    /// Failed completions before a cooldown is imposed.
    pub max_attempts: u32,
    /// Cooldown length in seconds.
    pub cooldown_period_secs: u64,
    pub difficulties: Vec<DifficultyConfig>,
}

impl VerifierParams {
    pub fn ainet_defaults() -> Self {
        Self {
            max_attempts: 3,
            cooldown_period_secs: 3600, // 1 hour
            difficulties: vec![
                DifficultyConfig::new("easy", 3, 30, 1),
                DifficultyConfig::new("medium", 10, 60, 3),
                DifficultyConfig::new("hard", 30, 120, 5),
            ],
        }
    }
}

impl Default for VerifierParams {
    fn default() -> Self {
        Self::ainet_defaults()
    }
}
