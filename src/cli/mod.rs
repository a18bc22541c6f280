//! CLI command implementations for Warlight.

pub(crate) mod check;
pub(crate) mod play;

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use warlight::{AgentConfig, StrategyKind, WeightsKind};

/// Agent options shared by every command.
///
/// Flags override the values read from `--config`.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct AgentOptions {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strategy to play
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Weight table
    #[arg(long, value_enum)]
    weights: Option<WeightsKind>,

    /// Random seed (default: from the clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Soft limit on the attack/transfer search in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,
}

impl AgentOptions {
    /// Merge the configuration file, if any, with the command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub(crate) fn resolve(&self) -> Result<AgentConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::load(path).map_err(|e| {
                CliError::new(format!("Failed to load {}: {e}", path.display()))
            })?,
            None => AgentConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(weights) = self.weights {
            config.weights = weights;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(ms) = self.deadline_ms {
            config.attack_deadline_ms = ms;
        }
        Ok(config)
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<warlight::AgentError> for CliError {
    fn from(e: warlight::AgentError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> AgentOptions {
        AgentOptions {
            config: None,
            strategy: None,
            weights: None,
            seed: None,
            deadline_ms: None,
        }
    }

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(options().resolve().unwrap(), AgentConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, r#"{"strategy": "random", "seed": 3, "weights": "degree"}"#).unwrap();

        let resolved = AgentOptions {
            config: Some(path),
            strategy: Some(StrategyKind::Defensive),
            seed: Some(9),
            ..options()
        }
        .resolve()
        .unwrap();

        assert_eq!(resolved.strategy, StrategyKind::Defensive);
        assert_eq!(resolved.weights, WeightsKind::Degree);
        assert_eq!(resolved.seed, Some(9));
    }

    #[test]
    fn test_bad_config_names_the_file() {
        let options = AgentOptions {
            config: Some(PathBuf::from("/nonexistent/agent.json")),
            ..options()
        };
        let err = options.resolve().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/agent.json"));
    }
}
