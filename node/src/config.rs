//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};

use ainet_types::{
    Address, DifficultyConfig, PoolShare, TokenAmount, TokenParams, VerifierParams,
};

use crate::logging::LogFormat;
use crate::ChainError;

/// Configuration for an AINET chain deployment.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Account that deploys both contracts and initially owns them.
    #[serde(default = "default_deployer")]
    pub deployer: Address,

    /// Block time at deployment, in seconds. Zero means "use the wall clock".
    #[serde(default)]
    pub genesis_time: u64,

    /// Hand token ownership to the verifier after deployment.
    #[serde(default = "default_true")]
    pub hand_over_token: bool,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// `[token]` section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_token_name")]
    pub name: String,

    #[serde(default = "default_token_symbol")]
    pub symbol: String,

    /// Total supply in whole tokens.
    #[serde(default = "default_total_supply_tokens")]
    pub total_supply_tokens: u64,

    #[serde(default)]
    pub start_paused: bool,

    /// Pool shares in basis points; must sum to 10,000.
    #[serde(default = "default_pools")]
    pub pools: Vec<PoolShare>,
}

/// `[verifier]` section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifierConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_cooldown_secs")]
    pub cooldown_period_secs: u64,

    #[serde(default = "default_difficulties")]
    pub difficulties: Vec<DifficultyConfig>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_deployer() -> Address {
    Address::from_low_u64(1)
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_token_name() -> String {
    TokenParams::ainet_defaults().name
}

fn default_token_symbol() -> String {
    TokenParams::ainet_defaults().symbol
}

fn default_total_supply_tokens() -> u64 {
    1_000_000_000
}

fn default_pools() -> Vec<PoolShare> {
    TokenParams::ainet_defaults().pools
}

fn default_max_attempts() -> u32 {
    VerifierParams::ainet_defaults().max_attempts
}

fn default_cooldown_secs() -> u64 {
    VerifierParams::ainet_defaults().cooldown_period_secs
}

fn default_difficulties() -> Vec<DifficultyConfig> {
    VerifierParams::ainet_defaults().difficulties
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ChainError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ChainError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ChainError> {
        let config: Self = toml::from_str(s).map_err(|e| ChainError::Config(e.to_string()))?;
        config.parsed_log_format()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ChainError> {
        toml::to_string_pretty(self).map_err(|e| ChainError::Config(e.to_string()))
    }

    /// Parsed `log_format`.
    pub fn parsed_log_format(&self) -> Result<LogFormat, ChainError> {
        self.log_format.parse().map_err(ChainError::Config)
    }
}

impl TokenConfig {
    pub fn to_params(&self) -> TokenParams {
        TokenParams {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: TokenAmount::DECIMALS,
            total_supply: TokenAmount::from_whole(self.total_supply_tokens as u128),
            pools: self.pools.clone(),
            start_paused: self.start_paused,
        }
    }
}

impl VerifierConfig {
    pub fn to_params(&self) -> VerifierParams {
        VerifierParams {
            max_attempts: self.max_attempts,
            cooldown_period_secs: self.cooldown_period_secs,
            difficulties: self.difficulties.clone(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            deployer: default_deployer(),
            genesis_time: 0,
            hand_over_token: default_true(),
            token: TokenConfig::default(),
            verifier: VerifierConfig::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_token_name(),
            symbol: default_token_symbol(),
            total_supply_tokens: default_total_supply_tokens(),
            pools: default_pools(),
            start_paused: false,
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            cooldown_period_secs: default_cooldown_secs(),
            difficulties: default_difficulties(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ainet_types::PoolId;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.deployer, config.deployer);
        assert_eq!(parsed.token.pools, config.token.pools);
        assert_eq!(parsed.verifier.difficulties, config.verifier.difficulties);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert!(config.hand_over_token);
        assert_eq!(config.token.to_params(), TokenParams::ainet_defaults());
        assert_eq!(config.verifier.to_params(), VerifierParams::ainet_defaults());
        assert_eq!(config.log_format, "human");
        assert_eq!(config.parsed_log_format().unwrap(), LogFormat::Human);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = NodeConfig::from_toml_str(r#"log_format = "jsno""#).unwrap_err();
        assert!(matches!(err, ChainError::Config(ref msg) if msg.contains("jsno")));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            deployer = "0x00000000000000000000000000000000000000aa"
            log_format = "json"

            [token]
            total_supply_tokens = 1000
            pools = [
                { pool = "community", share_bps = 6000 },
                { pool = "human", share_bps = 4000 },
            ]

            [verifier]
            max_attempts = 5
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.deployer, Address::from_low_u64(0xaa));
        assert_eq!(config.parsed_log_format().unwrap(), LogFormat::Json);

        let token = config.token.to_params();
        assert_eq!(token.total_supply, TokenAmount::from_whole(1000));
        assert_eq!(token.pools.len(), 2);
        assert_eq!(token.pools[1].pool, PoolId::Human);
        assert_eq!(token.symbol, "AINET"); // default

        assert_eq!(config.verifier.max_attempts, 5);
        assert_eq!(config.verifier.cooldown_period_secs, 3600); // default
    }

    #[test]
    fn difficulties_parse_from_array_of_tables() {
        let toml = r#"
            [[verifier.difficulties]]
            label = "quick"
            min_time_required_secs = 1
            max_time_allowed_secs = 5
            min_checkpoints = 0
        "#;
        let config = NodeConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config.verifier.difficulties,
            vec![DifficultyConfig::new("quick", 1, 5, 0)]
        );
    }

    #[test]
    fn bad_address_is_config_error() {
        let err = NodeConfig::from_toml_str(r#"deployer = "nope""#).unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let err = NodeConfig::from_toml_file("/nonexistent/ainet.toml").unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ainet.toml");
        std::fs::write(&path, "genesis_time = 1700000000\nhand_over_token = false\n").unwrap();

        let config = NodeConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.genesis_time, 1_700_000_000);
        assert!(!config.hand_over_token);
    }
}
