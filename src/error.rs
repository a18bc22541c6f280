//! Error types for the agent.
//!
//! Three classes of failure exist and they are handled differently:
//! - [`ProtocolError`]: a malformed or unknown command. Rendered back to the
//!   host as a descriptive line; the session continues.
//! - [`MapError`]: setup data, or update data naming unknown territories,
//!   that does not describe a consistent map. Fatal, the session ends.
//!   Malformed `update_map`/`opponent_moves` payloads are wrapped in
//!   [`ProtocolError::InvalidData`] instead.
//! - Logic errors (undo on an empty log, broken strategy contracts) panic.

use thiserror::Error;

use crate::map::{GroupId, TerritoryId};

/// Data describing the map could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A token that should have been a number was not.
    #[error("invalid number {token:?} in {section}")]
    InvalidNumber {
        /// Section of the protocol the token came from.
        section: &'static str,
        /// The offending token.
        token: String,
    },
    /// The data did not split into whole records.
    #[error("{section} expects records of {width} tokens, got {len} tokens")]
    Truncated {
        /// Section of the protocol the data came from.
        section: &'static str,
        /// Tokens per record.
        width: usize,
        /// Total tokens received.
        len: usize,
    },
    /// A territory id was referenced before being defined.
    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),
    /// A group id was referenced before being defined.
    #[error("unknown super region {0}")]
    UnknownGroup(GroupId),
    /// A territory id was defined twice.
    #[error("territory {0} defined twice")]
    DuplicateTerritory(TerritoryId),
    /// A group id was defined twice.
    #[error("super region {0} defined twice")]
    DuplicateGroup(GroupId),
    /// A territory was listed as its own neighbour.
    #[error("territory {0} listed as its own neighbour")]
    SelfAdjacent(TerritoryId),
    /// An opponent move used a verb other than placement or attack/transfer.
    #[error("unknown opponent move {0:?}")]
    UnknownMove(String),
}

impl MapError {
    /// Check whether the error is about token shape rather than map identity.
    ///
    /// Non-numeric tokens, truncated records and unknown opponent verbs are
    /// malformed; unknown or duplicate ids are not.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. } | Self::Truncated { .. } | Self::UnknownMove(_)
        )
    }
}

/// A host command the agent cannot act on.
///
/// The `Display` form of each variant is the exact line written back to the
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The first token is not a known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    /// The second token is not a known sub command of the first.
    #[error("Unknown sub command: {0}")]
    UnknownSubCommand(String),
    /// The command ended before a required argument.
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
    /// A scalar argument was not a number.
    #[error("Invalid number for {command}: {token}")]
    InvalidNumber {
        /// Command the argument belongs to.
        command: &'static str,
        /// The offending token.
        token: String,
    },
    /// A snapshot payload was malformed and was ignored.
    #[error("Invalid data: {0}")]
    InvalidData(MapError),
}

/// Failure that ends an agent session.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Map data from the host was inconsistent.
    #[error("map error: {0}")]
    Map(#[from] MapError),
    /// Reading from or writing to the host failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure loading an [`AgentConfig`](crate::config::AgentConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_wire_form() {
        assert_eq!(
            ProtocolError::UnknownCommand("dance".to_string()).to_string(),
            "Unknown command: dance"
        );
        assert_eq!(
            ProtocolError::UnknownSubCommand("timebank".to_string()).to_string(),
            "Unknown sub command: timebank"
        );
    }

    #[test]
    fn test_map_error_display() {
        let err = MapError::Truncated {
            section: "update_map",
            width: 3,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "update_map expects records of 3 tokens, got 4 tokens"
        );
        assert_eq!(
            MapError::UnknownTerritory(TerritoryId(7)).to_string(),
            "unknown territory 7"
        );
    }

    #[test]
    fn test_malformed_classification() {
        let bad_number = MapError::InvalidNumber {
            section: "opponent_moves",
            token: "many".to_string(),
        };
        assert!(bad_number.is_malformed());
        assert!(MapError::UnknownMove("dance".to_string()).is_malformed());
        assert!(!MapError::UnknownTerritory(TerritoryId(99)).is_malformed());
        assert!(!MapError::UnknownGroup(GroupId(9)).is_malformed());
        assert_eq!(
            ProtocolError::InvalidData(bad_number).to_string(),
            "Invalid data: invalid number \"many\" in opponent_moves"
        );
    }
}
