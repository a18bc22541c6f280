//! Territory and group types.

use std::fmt;
use std::str::FromStr;

/// Owner name the host uses for unclaimed territories.
pub const NEUTRAL: &str = "neutral";

/// Troops on every territory before the host reports otherwise.
pub const STARTING_TROOPS: u32 = 2;

/// Identifier of a territory (a "region" on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerritoryId(pub u32);

/// Identifier of a group of territories (a "super region" on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TerritoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for GroupId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A set of territories granting bonus armies when fully owned.
#[derive(Debug, Clone)]
pub struct Group {
    /// Unique identifier.
    pub id: GroupId,
    /// Extra armies per turn for owning every member.
    pub bonus: u32,
    /// Member territories in definition order.
    pub(crate) members: Vec<TerritoryId>,
}

impl Group {
    /// Create an empty group.
    #[must_use]
    pub const fn new(id: GroupId, bonus: u32) -> Self {
        Self {
            id,
            bonus,
            members: Vec::new(),
        }
    }

    /// Member territories in definition order.
    #[must_use]
    pub fn members(&self) -> &[TerritoryId] {
        &self.members
    }
}

/// The smallest ownable unit of the map.
#[derive(Debug, Clone)]
pub struct Territory {
    /// Unique identifier.
    pub id: TerritoryId,
    /// Group this territory belongs to.
    pub group: GroupId,
    /// Owning player name, or [`NEUTRAL`].
    pub owner: String,
    /// Troops stationed here.
    pub troops: u32,
    /// Bordering territories, deduplicated, in the order they were declared.
    pub(crate) neighbors: Vec<TerritoryId>,
    /// Owners of the neighbours as of the last map update.
    pub(crate) neighbor_owners: Vec<String>,
    /// Set once any neighbour belongs to a different group.
    pub(crate) on_group_border: bool,
}

impl Territory {
    /// Create a neutral territory with the starting garrison.
    #[must_use]
    pub fn new(id: TerritoryId, group: GroupId) -> Self {
        Self {
            id,
            group,
            owner: NEUTRAL.to_string(),
            troops: STARTING_TROOPS,
            neighbors: Vec::new(),
            neighbor_owners: Vec::new(),
            on_group_border: false,
        }
    }

    /// Bordering territories.
    #[must_use]
    pub fn neighbors(&self) -> &[TerritoryId] {
        &self.neighbors
    }

    /// Number of bordering territories.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Check whether `other` borders this territory.
    #[must_use]
    pub fn borders(&self, other: TerritoryId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Check whether this territory borders a territory of another group.
    #[must_use]
    pub const fn is_on_group_border(&self) -> bool {
        self.on_group_border
    }

    /// Check whether `player` owns this territory.
    #[must_use]
    pub fn is_owned_by(&self, player: &str) -> bool {
        self.owner == player
    }

    /// Owner names of the neighbours, refreshed on every map update.
    ///
    /// This is the marker the host state gives for "this territory touches
    /// player X"; the frontier partition reads it directly.
    #[must_use]
    pub fn neighbor_owners(&self) -> &[String] {
        &self.neighbor_owners
    }

    /// Record a new neighbour, ignoring duplicates.
    pub(crate) fn link(&mut self, other: TerritoryId) {
        if !self.neighbors.contains(&other) {
            self.neighbors.push(other);
        }
    }
}
