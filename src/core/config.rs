//! Simulation configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values can be overridden from a
//! TOML file; any field left out keeps its default.

use crate::core::error::{PoliticsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one game store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === TERM ===
    /// Length of a term in seconds
    ///
    /// The clock decrements once per real second while the term runs.
    pub term_seconds: u32,

    // === STAT LEDGER ===
    /// Value every headline stat starts a term at
    pub starting_stat: i32,

    /// All three stats at or above this value win the term
    pub win_threshold: i32,

    // === HISTORY ===
    /// Maximum economy snapshots kept
    pub economy_history_cap: usize,

    /// Maximum points kept in every bloc, poll, cabinet and legacy trend
    pub trend_cap: usize,

    // === MINI-GAME ===
    /// Rounds the front end plays per policy decision
    pub minigame_rounds: u32,

    // === CABINET ===
    /// Active ministers whose loyalty drops below this resign
    pub resignation_threshold: i32,

    // === WORLD EVENTS ===
    /// How many recent headlines are avoided when picking a new one
    pub headline_window: usize,

    // === EXIT POLL ===
    /// Running seconds between background poll drift updates
    ///
    /// Zero disables drift.
    pub poll_drift_interval: u32,

    // === ADVISOR ===
    /// Upper bound on a single advisor request in milliseconds
    pub advisor_timeout_ms: u64,

    // === DATA ===
    /// Effect table to load instead of the bundled one
    pub policy_effects_path: Option<PathBuf>,

    /// Card pool to load instead of the bundled one
    pub policy_pool_path: Option<PathBuf>,

    /// Where the best legacy record is stored
    pub legacy_path: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            term_seconds: 120,
            starting_stat: 50,
            win_threshold: 70,
            minigame_rounds: 3,
            economy_history_cap: 60,
            trend_cap: 40,
            resignation_threshold: 40,
            headline_window: 15,
            poll_drift_interval: 10,
            advisor_timeout_ms: 5000,
            policy_effects_path: None,
            policy_pool_path: None,
            legacy_path: PathBuf::from("pp_legacy_best.json"),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.term_seconds == 0 {
            return Err(PoliticsError::InvalidConfig(
                "term_seconds must be positive".into(),
            ));
        }

        if !(1..=100).contains(&self.starting_stat) {
            return Err(PoliticsError::InvalidConfig(format!(
                "starting_stat ({}) must be within 1..=100",
                self.starting_stat
            )));
        }

        // A term that starts already won would end on the first resolution
        if self.win_threshold <= self.starting_stat || self.win_threshold > 100 {
            return Err(PoliticsError::InvalidConfig(format!(
                "win_threshold ({}) must be above starting_stat ({}) and at most 100",
                self.win_threshold, self.starting_stat
            )));
        }

        if self.minigame_rounds == 0 {
            return Err(PoliticsError::InvalidConfig(
                "minigame_rounds must be positive".into(),
            ));
        }

        if !(0..=100).contains(&self.resignation_threshold) {
            return Err(PoliticsError::InvalidConfig(format!(
                "resignation_threshold ({}) must be within 0..=100",
                self.resignation_threshold
            )));
        }

        if self.economy_history_cap == 0 || self.trend_cap == 0 {
            return Err(PoliticsError::InvalidConfig(
                "history caps must be positive".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.term_seconds, 120);
        assert_eq!(config.headline_window, 15);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str("term_seconds = 90\n").unwrap();
        assert_eq!(config.term_seconds, 90);
        assert_eq!(config.trend_cap, 40);
        assert_eq!(config.resignation_threshold, 40);
        assert_eq!(config.minigame_rounds, 3);

        let config = SimulationConfig::from_toml_str("minigame_rounds = 5\n").unwrap();
        assert_eq!(config.minigame_rounds, 5);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let result = SimulationConfig::from_toml_str("win_threshold = 40\n");
        assert!(matches!(result, Err(PoliticsError::InvalidConfig(_))));

        let result = SimulationConfig::from_toml_str("term_seconds = 0\n");
        assert!(result.is_err());

        let result = SimulationConfig::from_toml_str("minigame_rounds = 0\n");
        assert!(matches!(result, Err(PoliticsError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = SimulationConfig::from_toml_str("term_seconds = \"long\"\n");
        assert!(matches!(result, Err(PoliticsError::TomlError(_))));
    }
}
