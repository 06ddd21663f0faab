//! Write operations accepted by the chain, and what they return.

use ainet_types::{Address, ChallengeId, PoolId, TokenAmount};
use ainet_verifier::CompletionOutcome;
use serde::{Deserialize, Serialize};

/// One state-changing call against either contract.
///
/// Serialized with an `op` tag so scripts and frontends can submit calls as
/// plain JSON or TOML tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    // Token
    Transfer {
        to: Address,
        amount: TokenAmount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        amount: TokenAmount,
    },
    Approve {
        spender: Address,
        amount: TokenAmount,
    },
    ReleaseFromPool {
        pool: PoolId,
        recipient: Address,
        amount: TokenAmount,
    },
    VerifyAi {
        address: Address,
    },
    BlacklistAi {
        address: Address,
    },
    PauseToken,
    UnpauseToken,
    TransferTokenOwnership {
        new_owner: Address,
    },

    // Verifier
    StartSession {
        difficulty: String,
    },
    CompleteSession {
        challenge_id: ChallengeId,
        /// Hex-encoded proof bytes.
        #[serde(with = "proof_hex", default)]
        proof: Vec<u8>,
    },
    SetDifficultyParams {
        label: String,
        min_time_required: u64,
        max_time_allowed: u64,
        min_checkpoints: u32,
    },
    DeactivateDifficulty {
        label: String,
    },
    SetMaxAttempts {
        max_attempts: u32,
    },
    SetCooldownPeriod {
        cooldown_secs: u64,
    },
    PauseVerifier,
    UnpauseVerifier,
    TransferVerifierOwnership {
        new_owner: Address,
    },
}

impl Call {
    /// The `op` tag, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Approve { .. } => "approve",
            Self::ReleaseFromPool { .. } => "release_from_pool",
            Self::VerifyAi { .. } => "verify_ai",
            Self::BlacklistAi { .. } => "blacklist_ai",
            Self::PauseToken => "pause_token",
            Self::UnpauseToken => "unpause_token",
            Self::TransferTokenOwnership { .. } => "transfer_token_ownership",
            Self::StartSession { .. } => "start_session",
            Self::CompleteSession { .. } => "complete_session",
            Self::SetDifficultyParams { .. } => "set_difficulty_params",
            Self::DeactivateDifficulty { .. } => "deactivate_difficulty",
            Self::SetMaxAttempts { .. } => "set_max_attempts",
            Self::SetCooldownPeriod { .. } => "set_cooldown_period",
            Self::PauseVerifier => "pause_verifier",
            Self::UnpauseVerifier => "unpause_verifier",
            Self::TransferVerifierOwnership { .. } => "transfer_verifier_ownership",
        }
    }
}

/// Value returned by a successful call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CallOutput {
    /// The call has no return value.
    Done,
    SessionStarted { challenge_id: ChallengeId },
    Completion { outcome: CompletionOutcome },
}

impl CallOutput {
    pub fn challenge_id(&self) -> Option<ChallengeId> {
        match self {
            Self::SessionStarted { challenge_id } => Some(*challenge_id),
            _ => None,
        }
    }

    pub fn completion(&self) -> Option<&CompletionOutcome> {
        match self {
            Self::Completion { outcome } => Some(outcome),
            _ => None,
        }
    }
}

mod proof_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(digits).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calls_are_op_tagged() {
        let call = Call::ReleaseFromPool {
            pool: PoolId::Community,
            recipient: Address::from_low_u64(5),
            amount: TokenAmount::new(100),
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["op"], "release_from_pool");
        assert_eq!(json["pool"], "community");
        assert_eq!(json["amount"], "100");
        assert_eq!(call.name(), "release_from_pool");

        let unit = serde_json::to_value(Call::PauseToken).unwrap();
        assert_eq!(unit["op"], "pause_token");
    }

    #[test]
    fn proof_is_hex_with_optional_prefix() {
        let call: Call = serde_json::from_str(&format!(
            r#"{{"op":"complete_session","challenge_id":"{}","proof":"abcd"}}"#,
            ChallengeId::new([1; 32])
        ))
        .unwrap();
        match &call {
            Call::CompleteSession { proof, .. } => assert_eq!(proof, &vec![0xab, 0xcd]),
            other => panic!("unexpected {other:?}"),
        }
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["proof"], "0xabcd");
    }

    #[test]
    fn bad_proof_hex_is_rejected() {
        let raw = format!(
            r#"{{"op":"complete_session","challenge_id":"{}","proof":"zz"}}"#,
            ChallengeId::ZERO
        );
        assert!(serde_json::from_str::<Call>(&raw).is_err());
    }

    #[test]
    fn calls_parse_from_toml() {
        let call: Call = toml::from_str(
            r#"
            op = "set_difficulty_params"
            label = "easy"
            min_time_required = 3
            max_time_allowed = 30
            min_checkpoints = 1
            "#,
        )
        .unwrap();
        assert_eq!(call.name(), "set_difficulty_params");
    }
}
