//! Move records and their wire rendering.
//!
//! Strategies accumulate [`Placements`] and [`Movements`] while deciding; the
//! agent renders them with the player name once the decision is complete.

use std::fmt::Write as _;

use crate::map::TerritoryId;

/// Response sent when a phase produces no moves.
pub const NO_MOVES: &str = "No moves";

/// Wire verb for army placement.
pub const PLACE_ARMIES: &str = "place_armies";

/// Wire verb for attacks and transfers.
pub const ATTACK_TRANSFER: &str = "attack/transfer";

/// Armies added to one territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Territory receiving the armies.
    pub territory: TerritoryId,
    /// Number of armies.
    pub armies: u32,
}

/// Armies sent from one territory to a neighbour.
///
/// An attack when the destination belongs to someone else, a transfer
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// Source territory.
    pub from: TerritoryId,
    /// Destination territory.
    pub to: TerritoryId,
    /// Number of armies sent.
    pub armies: u32,
}

/// Ordered list of placements for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placements {
    items: Vec<Placement>,
}

impl Placements {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Queue `armies` onto `territory`.
    pub fn add(&mut self, territory: TerritoryId, armies: u32) {
        self.items.push(Placement { territory, armies });
    }

    /// Sum of all queued armies.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.items.iter().map(|p| p.armies).sum()
    }

    /// Number of queued placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queued placements in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Placement] {
        &self.items
    }

    /// Render as `"{player} place_armies {id} {n}"` entries joined by `", "`.
    #[must_use]
    pub fn render(&self, player: &str) -> String {
        if self.items.is_empty() {
            return NO_MOVES.to_string();
        }
        let mut out = String::new();
        for (i, p) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{player} {PLACE_ARMIES} {} {}", p.territory, p.armies);
        }
        out
    }
}

/// Ordered list of attacks and transfers for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movements {
    items: Vec<Movement>,
}

impl Movements {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Queue a movement of `armies` from `from` to `to`.
    pub fn add(&mut self, from: TerritoryId, to: TerritoryId, armies: u32) {
        self.items.push(Movement { from, to, armies });
    }

    /// Number of queued movements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queued movements in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Movement] {
        &self.items
    }

    /// Render as `"{player} attack/transfer {from} {to} {n}"` entries joined
    /// by `", "`, or [`NO_MOVES`] when empty.
    #[must_use]
    pub fn render(&self, player: &str) -> String {
        if self.items.is_empty() {
            return NO_MOVES.to_string();
        }
        let mut out = String::new();
        for (i, m) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(
                out,
                "{player} {ATTACK_TRANSFER} {} {} {}",
                m.from, m.to, m.armies
            );
        }
        out
    }
}

/// Render starting picks as space-separated ids.
#[must_use]
pub fn render_picks(picks: &[TerritoryId]) -> String {
    picks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
