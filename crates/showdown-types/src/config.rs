//! Configuration types for the settlement engine and its oracle boundary.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, ShowdownError, constants};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum hands per round, and participants required for a finish.
    pub min_participants: usize,
    /// Consensus reconciliation settings.
    pub consensus: ConsensusConfig,
    /// Oracle call settings.
    pub oracle: OracleConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_participants: constants::DEFAULT_MIN_PARTICIPANTS,
            consensus: ConsensusConfig::default(),
            oracle: OracleConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ShowdownError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.min_participants < constants::DEFAULT_MIN_PARTICIPANTS {
            return Err(ShowdownError::Configuration(format!(
                "min_participants must be at least {}, got {}",
                constants::DEFAULT_MIN_PARTICIPANTS,
                self.min_participants
            )));
        }
        if self.consensus.evaluators == 0 {
            return Err(ShowdownError::Configuration(
                "consensus.evaluators must be at least 1".into(),
            ));
        }
        if self.oracle.timeout_ms == 0 {
            return Err(ShowdownError::Configuration(
                "oracle.timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// How many independent evaluations must agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    pub evaluators: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            evaluators: constants::DEFAULT_EVALUATORS,
        }
    }
}

/// Format the oracle is asked to answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Json,
}

/// Oracle call settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Budget for a whole reconciliation, handed to every query.
    pub timeout_ms: u64,
    pub response_format: ResponseFormat,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: constants::DEFAULT_ORACLE_TIMEOUT_MS,
            response_format: ResponseFormat::Json,
        }
    }
}

impl OracleConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
