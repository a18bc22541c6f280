//! Agent configuration.
//!
//! Loaded from an optional JSON file; every field has a default so a file
//! only needs the values it changes:
//!
//! ```json
//! { "strategy": "defensive", "weights": "degree", "seed": 42 }
//! ```

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::strategy::{DEFAULT_DEADLINE, StrategyKind};
use crate::weights::WeightsKind;

/// Settings for one agent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Strategy to play.
    pub strategy: StrategyKind,
    /// Canonical weight table.
    pub weights: WeightsKind,
    /// Seed for random choices; drawn from the clock when absent.
    pub seed: Option<u64>,
    /// Soft limit on the attack/transfer search in milliseconds.
    pub attack_deadline_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            weights: WeightsKind::default(),
            seed: None,
            attack_deadline_ms: u64::try_from(DEFAULT_DEADLINE.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl AgentConfig {
    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid
    /// configuration JSON. Unknown fields are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The attack/transfer deadline.
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        Duration::from_millis(self.attack_deadline_ms)
    }

    /// The configured seed, or one derived from the current time.
    #[must_use]
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.strategy, StrategyKind::Aggressive);
        assert_eq!(config.weights, WeightsKind::Uniform);
        assert_eq!(config.seed, None);
        assert_eq!(config.deadline(), Duration::from_millis(1800));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"strategy": "defensive", "seed": 42}}"#).unwrap();

        let config = AgentConfig::load(file.path()).unwrap();

        assert_eq!(config.strategy, StrategyKind::Defensive);
        assert_eq!(config.weights, WeightsKind::Uniform);
        assert_eq!(config.seed_or_clock(), 42);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"strategy": "random", "cheat": true}}"#).unwrap();

        assert!(matches!(
            AgentConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AgentConfig::load(&dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = AgentConfig {
            strategy: StrategyKind::Random,
            weights: WeightsKind::Degree,
            seed: Some(7),
            attack_deadline_ms: 900,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""strategy":"random""#));
        assert_eq!(serde_json::from_str::<AgentConfig>(&json).unwrap(), config);
    }
}
