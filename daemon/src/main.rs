//! AINET daemon: deploy the token and verifier and drive them from the CLI.

use ainet_node::{init_logging, Call, Chain, LogFormat, NodeConfig, CHECKPOINT_BYTES};
use ainet_nullables::NullClock;
use ainet_types::{Address, Timestamp};
use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ainet-daemon", about = "AINET token and AI verifier runtime")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "AINET_CONFIG")]
    config: Option<PathBuf>,

    /// Deploying account (0x-prefixed, 40 hex digits).
    #[arg(long, env = "AINET_DEPLOYER")]
    deployer: Option<Address>,

    /// Block time at deployment, in seconds since the epoch.
    #[arg(long, env = "AINET_GENESIS_TIME")]
    genesis_time: Option<u64>,

    /// Keep token ownership with the deployer instead of the verifier.
    #[arg(long, env = "AINET_KEEP_TOKEN_OWNERSHIP")]
    keep_token_ownership: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AINET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AINET_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy and print every allocation pool.
    Pools,

    /// Deploy, start a session, wait, and complete it.
    Simulate {
        /// Agent address.
        #[arg(long, default_value = "0x00000000000000000000000000000000000000a1")]
        agent: Address,

        /// Difficulty label to start the session with.
        #[arg(long, default_value = "easy")]
        difficulty: String,

        /// Seconds between start and completion.
        #[arg(long, default_value_t = 4)]
        wait: u64,

        /// Number of 32-byte checkpoint words in the proof.
        #[arg(long, default_value_t = 1)]
        checkpoints: usize,
    },

    /// Deploy and replay the steps of a TOML script, one JSON line per step.
    Run {
        /// Script file with `[[step]]` tables.
        script: PathBuf,
    },
}

/// A replay script.
#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

/// One scripted call.
///
/// Either `call` is given, or `complete_open_session` carries a hex proof to
/// submit against the sender's current session (its challenge id is not
/// known when the script is written).
#[derive(Debug, Deserialize)]
struct Step {
    sender: Address,
    #[serde(default)]
    advance_secs: u64,
    call: Option<Call>,
    complete_open_session: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => Some(
            NodeConfig::from_toml_file(&path.to_string_lossy())
                .with_context(|| format!("loading config {}", path.display()))?,
        ),
        None => None,
    };
    let base = file_config.unwrap_or_default();

    let config = NodeConfig {
        deployer: cli.deployer.unwrap_or(base.deployer),
        genesis_time: cli.genesis_time.unwrap_or(base.genesis_time),
        hand_over_token: base.hand_over_token && !cli.keep_token_ownership,
        log_level: cli.log_level.clone().unwrap_or_else(|| base.log_level.clone()),
        log_format: match cli.log_format {
            Some(LogFormat::Json) => "json".to_string(),
            Some(LogFormat::Human) => "human".to_string(),
            None => base.log_format.clone(),
        },
        ..base
    };

    init_logging(config.parsed_log_format()?, &config.log_level);
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let genesis = if config.genesis_time == 0 {
        Timestamp::now().as_secs()
    } else {
        config.genesis_time
    };
    let clock = NullClock::new(genesis);
    let mut chain = Chain::deploy(&config, clock.clone()).context("deploying contracts")?;

    match cli.command {
        Command::Pools => {
            let token = chain.token();
            println!(
                "{} ({}) supply {}, owner {}",
                token.name(),
                token.symbol(),
                token.total_supply(),
                token.owner()
            );
            println!(
                "{:<12} {:>28} {:>28} {:>28} {}",
                "pool", "total", "released", "remaining", "active"
            );
            for pool in token.pools() {
                let info = pool.info();
                println!(
                    "{:<12} {:>28} {:>28} {:>28} {}",
                    pool.id.to_string(),
                    info.total.to_string(),
                    info.released.to_string(),
                    info.remaining.to_string(),
                    info.active
                );
            }
        }

        Command::Simulate {
            agent,
            difficulty,
            wait,
            checkpoints,
        } => {
            let started = chain.submit(agent, Call::StartSession { difficulty })?;
            println!("{}", serde_json::to_string(&started)?);
            let challenge_id = started
                .outcome
                .challenge_id()
                .context("start_session returned no challenge id")?;

            tracing::info!(
                "waiting {} before completing",
                ainet_utils::format_duration(wait)
            );
            clock.advance(wait);

            let completed = chain.submit(
                agent,
                Call::CompleteSession {
                    challenge_id,
                    proof: zero_proof(checkpoints)?,
                },
            )?;
            println!("{}", serde_json::to_string(&completed)?);
            println!(
                "{}",
                serde_json::json!({
                    "agent": agent,
                    "verified": chain.token().is_verified_ai(&agent),
                    "attempts": chain.verifier().get_attempt_info(&agent),
                })
            );
        }

        Command::Run { script } => {
            let raw = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let script: Script = toml::from_str(&raw).context("parsing script")?;
            tracing::info!(steps = script.steps.len(), "replaying script");

            for (index, step) in script.steps.into_iter().enumerate() {
                chain.advance_time(step.advance_secs);
                let call = resolve_call(&chain, &step)
                    .with_context(|| format!("step {index}"))?;
                let line = match chain.submit(step.sender, call.clone()) {
                    Ok(receipt) => serde_json::json!({ "step": index, "receipt": receipt }),
                    Err(e) => serde_json::json!({
                        "step": index,
                        "block_time": chain.now(),
                        "sender": step.sender,
                        "call": call,
                        "reverted": e.to_string(),
                    }),
                };
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// A proof of `checkpoints` zeroed checkpoint words.
fn zero_proof(checkpoints: usize) -> anyhow::Result<Vec<u8>> {
    let len = checkpoints
        .checked_mul(CHECKPOINT_BYTES)
        .with_context(|| format!("{checkpoints} checkpoints is too large a proof"))?;
    Ok(vec![0u8; len])
}

fn resolve_call(chain: &Chain, step: &Step) -> anyhow::Result<Call> {
    match (&step.call, &step.complete_open_session) {
        (Some(call), None) => Ok(call.clone()),
        (None, Some(proof)) => {
            let session = chain
                .verifier()
                .session(&step.sender)
                .with_context(|| format!("{} has no session", step.sender))?;
            let proof = hex::decode(proof.strip_prefix("0x").unwrap_or(proof))
                .context("proof is not hex")?;
            Ok(Call::CompleteSession {
                challenge_id: session.challenge_id,
                proof,
            })
        }
        _ => bail!("exactly one of `call` or `complete_open_session` is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_proof_is_sized_in_checkpoint_words() {
        assert_eq!(zero_proof(2).unwrap().len(), 2 * CHECKPOINT_BYTES);
        assert!(zero_proof(0).unwrap().is_empty());
    }

    #[test]
    fn oversized_checkpoint_count_is_an_error() {
        let err = zero_proof(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
