//! The chain runtime: one token, one verifier, and a block clock.
//!
//! The runtime plays the role of the EVM for the two contracts. It derives
//! their addresses, runs the deployment flow, executes each [`Call`] as an
//! all-or-nothing transaction, and publishes the resulting events.

use ainet_crypto::contract_address;
use ainet_nullables::{Clock, NullClock};
use ainet_token::AinetToken;
use ainet_types::{Address, CallContext, Timestamp};
use ainet_verifier::AiVerifier;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::call::{Call, CallOutput};
use crate::config::NodeConfig;
use crate::event::{ChainEvent, EventBus};
use crate::ChainError;

/// Record of one committed call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub block_time: Timestamp,
    pub sender: Address,
    pub call: Call,
    pub outcome: CallOutput,
    pub events: Vec<ChainEvent>,
}

/// Full contract state at one block time, encodable with bincode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub block_time: Timestamp,
    pub deployer: Address,
    pub deploy_nonce: u64,
    pub token: AinetToken,
    pub verifier: AiVerifier,
}

impl ChainSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, ChainError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

pub struct Chain<C: Clock = NullClock> {
    clock: C,
    deployer: Address,
    /// Contracts created by `deployer` so far; feeds address derivation.
    deploy_nonce: u64,
    token: AinetToken,
    verifier: AiVerifier,
    genesis_events: Vec<ChainEvent>,
    receipts: Vec<Receipt>,
    bus: EventBus,
}

impl<C: Clock> Chain<C> {
    /// Deploy the token, then the verifier bound to it, configure the
    /// verifier, and (unless disabled) hand token ownership to the verifier.
    pub fn deploy(config: &NodeConfig, clock: C) -> Result<Self, ChainError> {
        let deployer = config.deployer;
        let ctx = CallContext::new(deployer, clock.now());

        let token_address = contract_address(&deployer, 0);
        let verifier_address = contract_address(&deployer, 1);

        let mut token = AinetToken::new(deployer, token_address, &config.token.to_params())?;
        let mut verifier = AiVerifier::new(deployer, verifier_address, token_address);

        let params = config.verifier.to_params();
        for d in &params.difficulties {
            verifier.set_difficulty_params(
                &ctx,
                &d.label,
                d.min_time_required_secs,
                d.max_time_allowed_secs,
                d.min_checkpoints,
            )?;
        }
        verifier.set_max_attempts(&ctx, params.max_attempts)?;
        verifier.set_cooldown_period(&ctx, params.cooldown_period_secs)?;

        if config.hand_over_token {
            token.transfer_ownership(&ctx, verifier_address)?;
        }

        let mut chain = Self {
            clock,
            deployer,
            deploy_nonce: 2,
            token,
            verifier,
            genesis_events: Vec::new(),
            receipts: Vec::new(),
            bus: EventBus::new(),
        };
        chain.genesis_events = chain.collect_events();

        info!(
            token = %token_address,
            verifier = %verifier_address,
            %deployer,
            block_time = %ctx.now,
            handed_over = config.hand_over_token,
            "chain deployed"
        );
        Ok(chain)
    }

    /// Rebuild a chain from a snapshot. No receipts or subscribers carry over.
    pub fn from_snapshot(snapshot: ChainSnapshot, clock: C) -> Self {
        Self {
            clock,
            deployer: snapshot.deployer,
            deploy_nonce: snapshot.deploy_nonce,
            token: snapshot.token,
            verifier: snapshot.verifier,
            genesis_events: Vec::new(),
            receipts: Vec::new(),
            bus: EventBus::new(),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn token(&self) -> &AinetToken {
        &self.token
    }

    pub fn verifier(&self) -> &AiVerifier {
        &self.verifier
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    pub fn deploy_nonce(&self) -> u64 {
        self.deploy_nonce
    }

    /// Events emitted during deployment.
    pub fn genesis_events(&self) -> &[ChainEvent] {
        &self.genesis_events
    }

    /// Receipts of every committed call, oldest first.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ChainEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    // ── Execution ───────────────────────────────────────────────────────

    /// Execute `call` from `sender` at the current block time.
    ///
    /// Both contracts are restored to their prior state if the call fails,
    /// and no events are published. Contract addresses cannot be senders.
    pub fn submit(&mut self, sender: Address, call: Call) -> Result<Receipt, ChainError> {
        if sender == self.token.address() || sender == self.verifier.address() {
            debug!(%sender, op = call.name(), "call from contract address rejected");
            return Err(ChainError::ContractSender(sender));
        }
        let ctx = CallContext::new(sender, self.clock.now());
        let token_before = self.token.clone();
        let verifier_before = self.verifier.clone();

        let outcome = match self.execute(&ctx, &call) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.token = token_before;
                self.verifier = verifier_before;
                debug!(%sender, op = call.name(), error = %e, "call reverted");
                return Err(e);
            }
        };

        let events = self.collect_events();
        for event in &events {
            self.bus.emit(event);
        }

        let receipt = Receipt {
            block_time: ctx.now,
            sender,
            call,
            outcome,
            events,
        };
        debug!(%sender, op = receipt.call.name(), events = receipt.events.len(), "call committed");
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }

    fn execute(&mut self, ctx: &CallContext, call: &Call) -> Result<CallOutput, ChainError> {
        let token = &mut self.token;
        let verifier = &mut self.verifier;
        match call {
            Call::Transfer { to, amount } => token.transfer(ctx, *to, *amount)?,
            Call::TransferFrom { from, to, amount } => {
                token.transfer_from(ctx, *from, *to, *amount)?
            }
            Call::Approve { spender, amount } => token.approve(ctx, *spender, *amount)?,
            Call::ReleaseFromPool {
                pool,
                recipient,
                amount,
            } => token.release_from_pool(ctx, *pool, *recipient, *amount)?,
            Call::VerifyAi { address } => token.verify_ai(ctx, *address)?,
            Call::BlacklistAi { address } => token.blacklist_ai(ctx, *address)?,
            Call::PauseToken => token.pause(ctx)?,
            Call::UnpauseToken => token.unpause(ctx)?,
            Call::TransferTokenOwnership { new_owner } => {
                token.transfer_ownership(ctx, *new_owner)?
            }

            Call::StartSession { difficulty } => {
                let challenge_id = verifier.start_session(ctx, difficulty)?;
                return Ok(CallOutput::SessionStarted { challenge_id });
            }
            Call::CompleteSession {
                challenge_id,
                proof,
            } => {
                let outcome = verifier.complete_session(ctx, token, *challenge_id, proof)?;
                return Ok(CallOutput::Completion { outcome });
            }
            Call::SetDifficultyParams {
                label,
                min_time_required,
                max_time_allowed,
                min_checkpoints,
            } => verifier.set_difficulty_params(
                ctx,
                label,
                *min_time_required,
                *max_time_allowed,
                *min_checkpoints,
            )?,
            Call::DeactivateDifficulty { label } => verifier.deactivate_difficulty(ctx, label)?,
            Call::SetMaxAttempts { max_attempts } => verifier.set_max_attempts(ctx, *max_attempts)?,
            Call::SetCooldownPeriod { cooldown_secs } => {
                verifier.set_cooldown_period(ctx, *cooldown_secs)?
            }
            Call::PauseVerifier => verifier.pause(ctx)?,
            Call::UnpauseVerifier => verifier.unpause(ctx)?,
            Call::TransferVerifierOwnership { new_owner } => {
                verifier.transfer_ownership(ctx, *new_owner)?
            }
        }
        Ok(CallOutput::Done)
    }

    /// Token events first, then verifier events, each in emission order.
    fn collect_events(&mut self) -> Vec<ChainEvent> {
        let token = self.token.address();
        let verifier = self.verifier.address();
        let mut events: Vec<ChainEvent> = self
            .token
            .drain_events()
            .into_iter()
            .map(|event| ChainEvent::Token {
                address: token,
                event,
            })
            .collect();
        events.extend(
            self.verifier
                .drain_events()
                .into_iter()
                .map(|event| ChainEvent::Verifier {
                    address: verifier,
                    event,
                }),
        );
        events
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            block_time: self.clock.now(),
            deployer: self.deployer,
            deploy_nonce: self.deploy_nonce,
            token: self.token.clone(),
            verifier: self.verifier.clone(),
        }
    }

    /// Replace contract state with `snapshot`. Block time is left alone.
    pub fn restore(&mut self, snapshot: ChainSnapshot) {
        info!(taken_at = %snapshot.block_time, now = %self.clock.now(), "restoring snapshot");
        self.deployer = snapshot.deployer;
        self.deploy_nonce = snapshot.deploy_nonce;
        self.token = snapshot.token;
        self.verifier = snapshot.verifier;
    }
}

impl Chain<NullClock> {
    /// Move block time forward.
    pub fn advance_time(&mut self, secs: u64) {
        self.clock.advance(secs);
        debug!(now = %self.clock.now(), "block time advanced");
    }

    /// Jump to an absolute block time. Time never moves backwards.
    pub fn set_time(&mut self, secs: u64) -> Result<(), ChainError> {
        let current = self.clock.now().as_secs();
        if secs < current {
            return Err(ChainError::TimeWentBackwards {
                current,
                requested: secs,
            });
        }
        self.clock.set(secs);
        Ok(())
    }
}

impl<C: Clock> std::fmt::Debug for Chain<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("now", &self.clock.now())
            .field("token", &self.token.address())
            .field("verifier", &self.verifier.address())
            .field("receipts", &self.receipts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ainet_token::TokenEvent;
    use ainet_types::{PoolId, TokenAmount};
    use ainet_verifier::{VerifierError, VerifierEvent};
    use std::sync::{Arc, Mutex};

    const GENESIS: u64 = 1_700_000_000;

    fn deployer() -> Address {
        NodeConfig::default().deployer
    }

    fn chain() -> Chain {
        Chain::deploy(&NodeConfig::default(), NullClock::new(GENESIS)).unwrap()
    }

    #[test]
    fn deploy_derives_distinct_addresses_and_hands_over() {
        let chain = chain();
        let token = chain.token().address();
        let verifier = chain.verifier().address();
        assert_eq!(token, contract_address(&deployer(), 0));
        assert_eq!(verifier, contract_address(&deployer(), 1));
        assert_ne!(token, verifier);
        assert_eq!(chain.verifier().token(), token);
        assert_eq!(chain.token().owner(), verifier);
        assert_eq!(chain.verifier().owner(), deployer());
        assert!(chain.verifier().difficulty("medium").is_some());
        assert_eq!(chain.deploy_nonce(), 2);
    }

    #[test]
    fn deploy_without_hand_over_keeps_deployer_as_owner() {
        let config = NodeConfig {
            hand_over_token: false,
            ..NodeConfig::default()
        };
        let chain = Chain::deploy(&config, NullClock::new(GENESIS)).unwrap();
        assert_eq!(chain.token().owner(), deployer());
    }

    #[test]
    fn genesis_events_start_with_mint() {
        let chain = chain();
        let first = chain.genesis_events().first().and_then(|e| e.as_token());
        assert!(matches!(
            first,
            Some(TokenEvent::Transfer { from, .. }) if from.is_zero()
        ));
        assert!(chain
            .genesis_events()
            .iter()
            .any(|e| matches!(e.as_verifier(), Some(VerifierEvent::DifficultyUpdated { .. }))));
    }

    #[test]
    fn bad_pool_config_fails_deploy() {
        let mut config = NodeConfig::default();
        config.token.pools.pop();
        let err = Chain::deploy(&config, NullClock::new(GENESIS)).unwrap_err();
        assert!(matches!(err, ChainError::Token(_)));
    }

    #[test]
    fn start_session_returns_challenge_id() {
        let mut chain = chain();
        let agent = Address::from_low_u64(42);
        let receipt = chain
            .submit(agent, Call::StartSession { difficulty: "easy".into() })
            .unwrap();
        assert_eq!(receipt.block_time, Timestamp::new(GENESIS));
        let id = receipt.outcome.challenge_id().unwrap();
        assert_eq!(chain.verifier().session(&agent).unwrap().challenge_id, id);
        assert_eq!(chain.receipts().len(), 1);
    }

    #[test]
    fn failed_call_changes_nothing_and_publishes_nothing() {
        let mut chain = chain();
        let seen = Arc::new(Mutex::new(0usize));
        let s = Arc::clone(&seen);
        chain.subscribe(Box::new(move |_| {
            *s.lock().unwrap() += 1;
        }));

        let stranger = Address::from_low_u64(99);
        let err = chain
            .submit(
                stranger,
                Call::ReleaseFromPool {
                    pool: PoolId::Community,
                    recipient: stranger,
                    amount: TokenAmount::from_whole(1),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ChainError::Token(_)));
        assert_eq!(*seen.lock().unwrap(), 0);
        assert!(chain.receipts().is_empty());
        assert_eq!(chain.token().balance_of(&stranger), TokenAmount::ZERO);
    }

    #[test]
    fn committed_events_reach_subscribers() {
        let mut chain = chain();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        chain.subscribe(Box::new(move |e| {
            s.lock().unwrap().push(e.clone());
        }));
        chain
            .submit(Address::from_low_u64(42), Call::StartSession { difficulty: "easy".into() })
            .unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(
            seen[0].as_verifier(),
            Some(VerifierEvent::SessionStarted { .. })
        ));
    }

    #[test]
    fn cooldown_error_surfaces_through_chain() {
        let mut chain = chain();
        let owner = deployer();
        chain.submit(owner, Call::SetMaxAttempts { max_attempts: 1 }).unwrap();
        let agent = Address::from_low_u64(42);
        let id = chain
            .submit(agent, Call::StartSession { difficulty: "easy".into() })
            .unwrap()
            .outcome
            .challenge_id()
            .unwrap();
        chain
            .submit(agent, Call::CompleteSession { challenge_id: id, proof: vec![0; 32] })
            .unwrap();
        let err = chain
            .submit(agent, Call::StartSession { difficulty: "easy".into() })
            .unwrap_err();
        assert!(matches!(err, ChainError::Verifier(VerifierError::InCooldown { .. })));
    }

    #[test]
    fn time_only_moves_forward() {
        let mut chain = chain();
        chain.advance_time(10);
        assert_eq!(chain.now(), Timestamp::new(GENESIS + 10));
        assert!(chain.set_time(GENESIS).is_err());
        chain.set_time(GENESIS + 100).unwrap();
        assert_eq!(chain.now().as_secs(), GENESIS + 100);
    }

    #[test]
    fn snapshot_roundtrips_through_bincode() {
        let mut chain = chain();
        let agent = Address::from_low_u64(42);
        chain
            .submit(agent, Call::StartSession { difficulty: "easy".into() })
            .unwrap();

        let bytes = chain.snapshot().to_bytes().unwrap();
        let snapshot = ChainSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot.block_time, Timestamp::new(GENESIS));

        let restored = Chain::from_snapshot(snapshot, NullClock::new(GENESIS));
        assert_eq!(restored.token().address(), chain.token().address());
        assert_eq!(
            restored.verifier().session(&agent),
            chain.verifier().session(&agent)
        );
        assert_eq!(
            restored.token().total_supply(),
            chain.token().total_supply()
        );
    }

    #[test]
    fn restore_rolls_back_state() {
        let mut chain = chain();
        let before = chain.snapshot();
        chain.submit(deployer(), Call::PauseVerifier).unwrap();
        assert!(chain.verifier().is_paused());
        chain.restore(before);
        assert!(!chain.verifier().is_paused());
    }

    #[test]
    fn garbage_snapshot_bytes_are_rejected() {
        let err = ChainSnapshot::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ChainError::Serialization(_)));
    }
}
