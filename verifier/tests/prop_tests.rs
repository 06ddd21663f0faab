use proptest::prelude::*;

use ainet_token::AinetToken;
use ainet_types::{Address, CallContext, Timestamp, TokenParams};
use ainet_verifier::{AiVerifier, CompletionOutcome, VerifierError};

const DEPLOYER: u64 = 1;
const TOKEN: u64 = 1000;
const VERIFIER: u64 = 1001;

fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

fn ctx(sender: u64, now: u64) -> CallContext {
    CallContext::new(addr(sender), Timestamp::new(now))
}

/// "easy" window is [3, 30] seconds with one checkpoint.
fn setup(max_attempts: u32, cooldown_secs: u64) -> (AinetToken, AiVerifier) {
    let owner = ctx(DEPLOYER, 0);
    let mut token =
        AinetToken::new(addr(DEPLOYER), addr(TOKEN), &TokenParams::ainet_defaults()).unwrap();
    let mut verifier = AiVerifier::new(addr(DEPLOYER), addr(VERIFIER), addr(TOKEN));
    verifier.set_difficulty_params(&owner, "easy", 3, 30, 1).unwrap();
    verifier.set_max_attempts(&owner, max_attempts).unwrap();
    verifier.set_cooldown_period(&owner, cooldown_secs).unwrap();
    token.transfer_ownership(&owner, addr(VERIFIER)).unwrap();
    (token, verifier)
}

/// Elapsed times that fall outside the easy window.
fn out_of_window() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..3, 31u64..10_000]
}

proptest! {
    /// Each out-of-window completion bumps the counter by exactly one and
    /// never marks the agent verified.
    #[test]
    fn out_of_window_counts_once_and_never_verifies(
        agent in 10u64..1_000,
        start in 0u64..1_000_000,
        elapsed in out_of_window(),
        proof_words in 1usize..4,
    ) {
        let (mut token, mut verifier) = setup(u32::MAX, 60);
        let id = verifier.start_session(&ctx(agent, start), "easy").unwrap();
        let before = verifier.get_attempt_info(&addr(agent)).attempt_count;

        let outcome = verifier
            .complete_session(&ctx(agent, start + elapsed), &mut token, id, &vec![0u8; proof_words * 32])
            .unwrap();

        prop_assert!(!outcome.is_verified());
        prop_assert_eq!(verifier.get_attempt_info(&addr(agent)).attempt_count, before + 1);
        prop_assert!(!token.is_verified_ai(&addr(agent)));
    }

    /// Any elapsed time inside the inclusive window verifies.
    #[test]
    fn in_window_verifies(
        agent in 10u64..1_000,
        start in 0u64..1_000_000,
        elapsed in 3u64..=30,
    ) {
        let (mut token, mut verifier) = setup(3, 60);
        let id = verifier.start_session(&ctx(agent, start), "easy").unwrap();
        let outcome = verifier
            .complete_session(&ctx(agent, start + elapsed), &mut token, id, &[1u8; 32])
            .unwrap();
        prop_assert_eq!(outcome, CompletionOutcome::Verified);
        prop_assert!(token.is_verified_ai(&addr(agent)));
    }

    /// After `max_attempts` failures, new sessions revert until exactly
    /// `cooldown_end`.
    #[test]
    fn cooldown_holds_until_its_end(
        max_attempts in 1u32..6,
        cooldown in 1u64..100_000,
        probe in 0u64..100_000,
    ) {
        let (mut token, mut verifier) = setup(max_attempts, cooldown);
        let agent = 77;
        let now = 500;
        for _ in 0..max_attempts {
            let id = verifier.start_session(&ctx(agent, now), "easy").unwrap();
            verifier
                .complete_session(&ctx(agent, now), &mut token, id, &[1u8; 32])
                .unwrap();
        }

        let info = verifier.get_attempt_info(&addr(agent));
        prop_assert_eq!(info.attempt_count, 0);
        prop_assert_eq!(info.cooldown_end, Timestamp::new(now + cooldown));

        let at = now + probe;
        let result = verifier.start_session(&ctx(agent, at), "easy");
        if at < now + cooldown {
            let is_cooldown = matches!(result, Err(VerifierError::InCooldown { .. }));
            prop_assert!(is_cooldown);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Structural reverts leave the attempt record untouched.
    #[test]
    fn reverts_do_not_count(agent in 10u64..1_000, bytes in any::<[u8; 32]>()) {
        let (mut token, mut verifier) = setup(3, 60);
        let id = verifier.start_session(&ctx(agent, 0), "easy").unwrap();
        prop_assume!(id.as_bytes() != &bytes);

        let bogus = ainet_types::ChallengeId::new(bytes);
        prop_assert!(verifier.complete_session(&ctx(agent, 0), &mut token, bogus, &[]).is_err());
        prop_assert_eq!(verifier.get_attempt_info(&addr(agent)).attempt_count, 0);
    }
}
