//! # Node Configuration
//!
//! Unified configuration for consensus, execution and the runtime.
//!
//! Sources, later wins:
//! 1. Defaults
//! 2. Optional JSON file (`NX_CONFIG`)
//! 3. Environment: `NX_K`, `NX_FINALITY_DEPTH`, `NX_ORPHAN_TIMEOUT_ROUNDS`,
//!    `NX_EXECUTION_STRATEGY`, `NX_LOG_LEVEL`, `NX_EVENT_LOG_CAPACITY`

use crate::genesis::GenesisAllocation;
use nx_02_blockdag_consensus::ConsensusConfig;
use nx_03_transaction_executor::{ExecutionStrategy, ExecutorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub consensus: ConsensusConfig,
    pub executor: ExecutorConfig,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    pub genesis_allocations: Vec<GenesisAllocation>,
    /// Bound of the proposal channel
    pub channel_capacity: usize,
    /// Undrained node events kept before the oldest are dropped
    pub event_log_capacity: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            consensus: ConsensusConfig::default(),
            executor: ExecutorConfig::default(),
            log_level: "info".to_string(),
            genesis_allocations: Vec::new(),
            channel_capacity: 256,
            event_log_capacity: 4096,
        }
    }
}

impl NodeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Defaults, then `NX_CONFIG` if set, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("NX_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply `NX_*` overrides read through `lookup`.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("NX_K") {
            self.consensus.k = parse_env("NX_K", value)?;
        }
        if let Some(value) = lookup("NX_FINALITY_DEPTH") {
            self.consensus.finality_depth = parse_env("NX_FINALITY_DEPTH", value)?;
        }
        if let Some(value) = lookup("NX_ORPHAN_TIMEOUT_ROUNDS") {
            self.consensus.orphan_timeout_rounds = parse_env("NX_ORPHAN_TIMEOUT_ROUNDS", value)?;
        }
        if let Some(value) = lookup("NX_EXECUTION_STRATEGY") {
            self.executor.strategy = value
                .parse::<ExecutionStrategy>()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: "NX_EXECUTION_STRATEGY",
                    value,
                })?;
        }
        if let Some(value) = lookup("NX_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("NX_EVENT_LOG_CAPACITY") {
            self.event_log_capacity = parse_env("NX_EVENT_LOG_CAPACITY", value)?;
        }
        Ok(())
    }

    /// `k = 0` is allowed (a pure chain); zero timeouts, batch sizes and
    /// capacities are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consensus.orphan_timeout_rounds == 0 {
            return Err(ConfigError::Invalid(
                "consensus.orphan_timeout_rounds must be at least 1".into(),
            ));
        }
        if self.executor.max_batch_size == 0 {
            return Err(ConfigError::Invalid(
                "executor.max_batch_size must be at least 1".into(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid("channel_capacity must be at least 1".into()));
        }
        if self.event_log_capacity == 0 || self.consensus.log_capacity == 0 {
            return Err(ConfigError::Invalid("log capacities must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
