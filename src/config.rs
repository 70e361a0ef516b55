use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{str::FromStr, time::Duration};
use thiserror::Error;

use crate::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_RPC_URL, METAPLEX_PROGRAM_ID};

pub const CONFIG_FILE: &str = "nft-holdings";
pub const ENV_PREFIX: &str = "NFT_HOLDINGS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid metadata program id: {0}")]
    InvalidProgramId(String),

    #[error("invalid commitment level: {0}")]
    InvalidCommitment(String),

    #[error("max_concurrency must be at least 1")]
    InvalidConcurrency,
}

/// Everything the resolver and server need, passed in explicitly at
/// construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub rpc_url: String,
    pub metadata_program_id: String,
    pub commitment: String,
    /// Upper bound on metadata fetches in flight across all requests.
    pub max_concurrency: usize,
    pub fetch_timeout_ms: u64,
    pub rpc_timeout_secs: u64,
    pub rpc_retries: usize,
    pub include_empty_accounts: bool,
    pub bind_address: String,
    pub request_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            metadata_program_id: METAPLEX_PROGRAM_ID.to_string(),
            commitment: "confirmed".to_string(),
            max_concurrency: 8,
            fetch_timeout_ms: 5_000,
            rpc_timeout_secs: 10,
            rpc_retries: 3,
            include_empty_accounts: false,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ResolverConfig {
    /// Optional `nft-holdings.{toml,json,yaml}` in the working directory,
    /// overridden by `NFT_HOLDINGS_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config: ResolverConfig = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.program_id()?;
        self.commitment()?;
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey, ConfigError> {
        Pubkey::from_str(&self.metadata_program_id)
            .map_err(|_| ConfigError::InvalidProgramId(self.metadata_program_id.clone()))
    }

    pub fn commitment(&self) -> Result<CommitmentConfig, ConfigError> {
        CommitmentConfig::from_str(&self.commitment)
            .map_err(|_| ConfigError::InvalidCommitment(self.commitment.clone()))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
