use ainet_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("token error: {0}")]
    Token(#[from] ainet_token::TokenError),

    #[error("verifier error: {0}")]
    Verifier(#[from] ainet_verifier::VerifierError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{0} is a contract and cannot send calls")]
    ContractSender(Address),

    #[error("block time {requested} is before current block time {current}")]
    TimeWentBackwards { current: u64, requested: u64 },
}

impl ChainError {
    /// Whether the call was rejected because a contract is paused.
    pub fn is_paused(&self) -> bool {
        match self {
            Self::Token(e) => e.is_paused(),
            Self::Verifier(e) => e.is_paused(),
            _ => false,
        }
    }
}

impl From<bincode::Error> for ChainError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
