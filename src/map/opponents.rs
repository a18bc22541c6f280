//! Opponent moves revealed by the host.

use std::collections::BTreeMap;

use crate::error::MapError;
use crate::map::{TerritoryId, parse_number};
use crate::moves::{ATTACK_TRANSFER, Movement, PLACE_ARMIES, Placement};

const SECTION: &str = "opponent_moves";

/// Moves the host showed us from other players last round, keyed by actor.
#[derive(Debug, Clone, Default)]
pub struct OpponentMoves {
    placements: BTreeMap<String, Vec<Placement>>,
    movements: BTreeMap<String, Vec<Movement>>,
}

impl OpponentMoves {
    /// Parse `actor place_armies id n` and `actor attack/transfer from to n`
    /// records.
    ///
    /// An empty token list means nothing was observed.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown verb, a truncated record or a
    /// non-numeric operand.
    pub fn parse(tokens: &[&str]) -> Result<Self, MapError> {
        let mut moves = Self::default();
        let mut rest = tokens;

        while let [actor, verb, tail @ ..] = rest {
            match *verb {
                PLACE_ARMIES => {
                    let [territory, armies, remaining @ ..] = tail else {
                        return Err(truncated(tokens.len()));
                    };
                    moves
                        .placements
                        .entry((*actor).to_string())
                        .or_default()
                        .push(Placement {
                            territory: TerritoryId(parse_number(SECTION, territory)?),
                            armies: parse_number(SECTION, armies)?,
                        });
                    rest = remaining;
                }
                ATTACK_TRANSFER => {
                    let [from, to, armies, remaining @ ..] = tail else {
                        return Err(truncated(tokens.len()));
                    };
                    moves
                        .movements
                        .entry((*actor).to_string())
                        .or_default()
                        .push(Movement {
                            from: TerritoryId(parse_number(SECTION, from)?),
                            to: TerritoryId(parse_number(SECTION, to)?),
                            armies: parse_number(SECTION, armies)?,
                        });
                    rest = remaining;
                }
                other => return Err(MapError::UnknownMove(other.to_string())),
            }
        }

        if rest.is_empty() {
            Ok(moves)
        } else {
            Err(truncated(tokens.len()))
        }
    }

    /// Placements made by `actor`.
    #[must_use]
    pub fn placements_by(&self, actor: &str) -> &[Placement] {
        self.placements.get(actor).map_or(&[], Vec::as_slice)
    }

    /// Attacks and transfers made by `actor`.
    #[must_use]
    pub fn movements_by(&self, actor: &str) -> &[Movement] {
        self.movements.get(actor).map_or(&[], Vec::as_slice)
    }

    /// Actors with at least one recorded move.
    pub fn actors(&self) -> impl Iterator<Item = &str> {
        let mut actors: Vec<&str> = self
            .placements
            .keys()
            .chain(self.movements.keys())
            .map(String::as_str)
            .collect();
        actors.sort_unstable();
        actors.dedup();
        actors.into_iter()
    }

    /// Check whether no moves were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.movements.is_empty()
    }
}

fn truncated(len: usize) -> MapError {
    MapError::Truncated {
        section: SECTION,
        width: 4,
        len,
    }
}
