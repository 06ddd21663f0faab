use proptest::prelude::*;

use ainet_token::{AinetToken, TokenError};
use ainet_types::{Address, CallContext, PoolId, PoolShare, Timestamp, TokenAmount, TokenParams};

const OWNER: u64 = 1;
const TOKEN: u64 = 1000;

fn ctx(sender: u64) -> CallContext {
    CallContext::new(Address::from_low_u64(sender), Timestamp::new(0))
}

fn pool_strategy() -> impl Strategy<Value = PoolId> {
    prop::sample::select(PoolId::ALL.to_vec())
}

/// Random split of 10,000 bps over the five pools (some may get zero).
fn shares_strategy() -> impl Strategy<Value = Vec<PoolShare>> {
    prop::collection::vec(0u32..=10_000, 4).prop_map(|mut cuts| {
        cuts.sort_unstable();
        let mut bounds = vec![0];
        bounds.extend(cuts);
        bounds.push(10_000);
        PoolId::ALL
            .iter()
            .zip(bounds.windows(2))
            .map(|(pool, w)| PoolShare {
                pool: *pool,
                share_bps: w[1] - w[0],
            })
            .collect()
    })
}

proptest! {
    /// Pool totals always sum to the declared supply, whatever the split.
    #[test]
    fn pool_totals_sum_to_supply(
        supply in 1u128..u128::MAX / 2,
        shares in shares_strategy(),
    ) {
        let params = TokenParams {
            total_supply: TokenAmount::new(supply),
            pools: shares,
            ..TokenParams::ainet_defaults()
        };
        let token = AinetToken::new(
            Address::from_low_u64(OWNER),
            Address::from_low_u64(TOKEN),
            &params,
        ).unwrap();
        let sum: u128 = token.pools().map(|p| p.total.raw()).sum();
        prop_assert_eq!(sum, supply);
    }

    /// `released` never decreases and never exceeds `total`; over-allocation
    /// attempts revert without touching the pool.
    #[test]
    fn released_is_monotonic_and_bounded(
        releases in prop::collection::vec((pool_strategy(), 1u128..200_000_000), 1..40),
    ) {
        let mut token = AinetToken::new(
            Address::from_low_u64(OWNER),
            Address::from_low_u64(TOKEN),
            &TokenParams::ainet_defaults(),
        ).unwrap();

        for (i, (pool, whole)) in releases.into_iter().enumerate() {
            let before = token.get_pool_info(pool).unwrap();
            let amount = TokenAmount::from_whole(whole);
            let recipient = Address::from_low_u64(10 + i as u64);
            let result = token.release_from_pool(&ctx(OWNER), pool, recipient, amount);
            let after = token.get_pool_info(pool).unwrap();

            prop_assert!(after.released >= before.released);
            prop_assert!(after.released <= after.total);

            if before.released.raw() + amount.raw() > before.total.raw() {
                let is_exceeds = matches!(result, Err(TokenError::ExceedsAllocation { .. }));
                prop_assert!(is_exceeds);
                prop_assert_eq!(after, before);
            } else {
                prop_assert!(result.is_ok());
                prop_assert_eq!(after.released.raw(), before.released.raw() + amount.raw());
            }
        }

        let circulating: u128 = token.pools().map(|p| p.released.raw()).sum();
        let treasury = token.balance_of(&Address::from_low_u64(TOKEN)).raw();
        prop_assert_eq!(treasury + circulating, token.total_supply().raw());
    }

    /// Transfers conserve the total of all balances.
    #[test]
    fn transfers_conserve_supply(
        moves in prop::collection::vec((0u64..4, 0u64..4, 0u128..50), 1..30),
    ) {
        let mut token = AinetToken::new(
            Address::from_low_u64(OWNER),
            Address::from_low_u64(TOKEN),
            &TokenParams::ainet_defaults(),
        ).unwrap();
        for holder in 0..4u64 {
            token.release_from_pool(
                &ctx(OWNER),
                PoolId::Community,
                Address::from_low_u64(100 + holder),
                TokenAmount::new(100),
            ).unwrap();
        }

        for (from, to, amount) in moves {
            let _ = token.transfer(
                &ctx(100 + from),
                Address::from_low_u64(100 + to),
                TokenAmount::new(amount),
            );
        }

        let held: u128 = (0..4u64)
            .map(|h| token.balance_of(&Address::from_low_u64(100 + h)).raw())
            .sum();
        prop_assert_eq!(held, 400);
    }
}
