// Configuration module for reading Bot.toml
// All tunable search and scoring constants live here instead of in the engine

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::rings::{TargetSearchStrategy, ThreatModel};
use crate::scoring::ThreatAggregation;
use crate::types::{Move, Position};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub identity: IdentityConfig,
    pub search: SearchConfig,
    pub scores: ScoresConfig,
    pub history: HistoryConfig,
    pub debug: DebugConfig,
}

/// Display metadata returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub name: String,
    pub author: String,
    pub color: String,
}

/// Ring search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub strategy: TargetSearchStrategy,
    /// Ranked strategy keeps scanning whole rings until this many candidates are found
    pub min_candidates: usize,
    /// Largest precomputed ring radius
    pub max_radius: i32,
    pub threat_model: ThreatModel,
    /// Manhattan model: an enemy closer than this threatens a cell
    pub threat_distance: i32,
    /// Target used when no candidate exists anywhere on the board
    pub fallback: Position,
}

/// Candidate and direction scoring constants
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    /// Added once per ring beyond the first
    pub ring_penalty: i32,
    /// Candidate has at least one capturable neighbour
    pub flexibility_bonus: i32,
    /// Enemies at or beyond this distance add no penalty
    pub threat_horizon: i32,
    pub threat_aggregation: ThreatAggregation,
    /// Direction steps onto a capturable cell
    pub win_bonus: i32,
}

/// Move history seeding
#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    pub initial_order: [Move; 4],
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads and validates configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Bot.toml in the project root
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file("Bot.toml")
    }

    /// Checks constraints that the TOML schema cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_radius < 1 {
            return Err(ConfigError::Invalid(format!(
                "search.max_radius must be at least 1, got {}",
                self.search.max_radius
            )));
        }
        if self.search.min_candidates == 0 {
            return Err(ConfigError::Invalid(
                "search.min_candidates must be at least 1".to_string(),
            ));
        }
        if crate::history::MoveHistory::with_order(self.history.initial_order).is_none() {
            return Err(ConfigError::Invalid(format!(
                "history.initial_order must list up, down, left and right exactly once, got {:?}",
                self.history.initial_order
            )));
        }
        Ok(())
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Bot.toml
    pub fn default_hardcoded() -> Self {
        Config {
            identity: IdentityConfig {
                name: "Ringside".to_string(),
                author: "territory-bot".to_string(),
                color: "#3FA34D".to_string(),
            },
            search: SearchConfig {
                strategy: TargetSearchStrategy::Ranked,
                min_candidates: 5,
                max_radius: 31,
                threat_model: ThreatModel::Manhattan,
                threat_distance: 3,
                fallback: Position::ORIGIN,
            },
            scores: ScoresConfig {
                ring_penalty: -500,
                flexibility_bonus: 1000,
                threat_horizon: 100,
                threat_aggregation: ThreatAggregation::Sum,
                win_bonus: 1000,
            },
            history: HistoryConfig {
                initial_order: crate::history::MoveHistory::DEFAULT_ORDER,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "territory_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Bot.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
