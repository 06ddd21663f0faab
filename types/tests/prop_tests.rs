use proptest::prelude::*;

use ainet_types::{Address, ChallengeId, Timestamp, TokenAmount};

proptest! {
    /// Address display -> parse returns the same address.
    #[test]
    fn address_display_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Address bincode serialization goes through the hex string form.
    #[test]
    fn address_bincode_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let encoded = bincode::serialize(&addr).unwrap();
        let decoded: Address = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, addr);
    }

    /// ChallengeId::is_zero is true only for all-zero bytes.
    #[test]
    fn challenge_id_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let id = ChallengeId::new(bytes);
        prop_assert_eq!(id.is_zero(), bytes == [0u8; 32]);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
        prop_assert_eq!(now.elapsed_since(t), 0);
    }

    /// Timestamp has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired(start in 0u64..1_000_000, dur in 0u64..1_000_000, now in 0u64..3_000_000) {
        let t = Timestamp::new(start);
        prop_assert_eq!(t.has_expired(dur, Timestamp::new(now)), now >= start + dur);
    }

    /// Splitting an amount by basis points never exceeds the amount and is
    /// monotonic in the share.
    #[test]
    fn share_bps_bounded_and_monotonic(raw in 0u128..u128::MAX / 2, a in 0u32..=10_000, b in 0u32..=10_000) {
        let amount = TokenAmount::new(raw);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(amount.share_bps(hi) <= amount);
        prop_assert!(amount.share_bps(lo) <= amount.share_bps(hi));
    }
}
