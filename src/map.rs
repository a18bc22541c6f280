//! Map model for the agent.
//!
//! - Territories and groups with symmetric adjacency
//! - The visible snapshot the host sends every round
//! - A do/undo log for speculative mutations
//! - Opponent moves revealed by the host
//! - Scratch troop counts for decisions in progress

mod graph;
mod opponents;
pub mod standard;
mod territory;
mod working;

pub use graph::{Map, Partition};
pub use opponents::OpponentMoves;
pub use territory::{GroupId, NEUTRAL, STARTING_TROOPS, Territory, TerritoryId};
pub use working::Working;

use std::str::FromStr;

use crate::error::MapError;

/// Parse a numeric token from the `section` payload.
pub(crate) fn parse_number<T: FromStr>(section: &'static str, token: &str) -> Result<T, MapError> {
    token.parse().map_err(|_| MapError::InvalidNumber {
        section,
        token: token.to_string(),
    })
}

/// Split `tokens` into records of exactly `width` tokens.
pub(crate) fn records<'a, 'b>(
    section: &'static str,
    tokens: &'a [&'b str],
    width: usize,
) -> Result<std::slice::ChunksExact<'a, &'b str>, MapError> {
    if tokens.len() % width != 0 {
        return Err(MapError::Truncated {
            section,
            width,
            len: tokens.len(),
        });
    }
    Ok(tokens.chunks_exact(width))
}
