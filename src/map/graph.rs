//! The territory graph and its per-round snapshot.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::MapError;
use crate::map::territory::Group;
use crate::map::{
    GroupId, NEUTRAL, OpponentMoves, STARTING_TROOPS, Territory, TerritoryId, parse_number,
    records, standard,
};

/// One reversible speculative mutation.
#[derive(Debug, Clone)]
struct Tentative {
    from: TerritoryId,
    from_troops: u32,
    to: TerritoryId,
    to_troops: u32,
    previous_owner: String,
}

/// The visible snapshot split by relation to one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Territories the player owns.
    pub owned: Vec<TerritoryId>,
    /// Territories the player does not own but that touch one of theirs.
    pub frontier: Vec<TerritoryId>,
    /// Everything else the host showed (usually territories lost last round).
    pub outliers: Vec<TerritoryId>,
}

/// All territories and groups of a game.
#[derive(Debug, Clone, Default)]
pub struct Map {
    territories: BTreeMap<TerritoryId, Territory>,
    groups: BTreeMap<GroupId, Group>,
    /// Territories revealed by the last `update_map`, in host order.
    visible: Vec<TerritoryId>,
    undo: Vec<Tentative>,
    opponents: OpponentMoves,
}

impl Map {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the reference 42-territory world map.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in data is inconsistent.
    pub fn standard() -> Result<Self, MapError> {
        let mut map = Self::new();
        map.setup_groups(&split(standard::SUPER_REGIONS))?;
        map.setup_territories(&split(standard::REGIONS))?;
        map.setup_adjacency(&split(standard::NEIGHBORS))?;
        Ok(map)
    }

    /// Define groups from `id bonus` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed data or a repeated id.
    pub fn setup_groups(&mut self, tokens: &[&str]) -> Result<(), MapError> {
        const SECTION: &str = "super_regions";

        for record in records(SECTION, tokens, 2)? {
            let id = GroupId(parse_number(SECTION, record[0])?);
            let bonus = parse_number(SECTION, record[1])?;
            if self.groups.contains_key(&id) {
                return Err(MapError::DuplicateGroup(id));
            }
            self.groups.insert(id, Group::new(id, bonus));
        }

        debug!("{} super regions defined", self.groups.len());
        Ok(())
    }

    /// Define territories from `id group` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed data, a repeated id or an unknown group.
    pub fn setup_territories(&mut self, tokens: &[&str]) -> Result<(), MapError> {
        const SECTION: &str = "regions";

        for record in records(SECTION, tokens, 2)? {
            let id = TerritoryId(parse_number(SECTION, record[0])?);
            let group_id = GroupId(parse_number(SECTION, record[1])?);
            if self.territories.contains_key(&id) {
                return Err(MapError::DuplicateTerritory(id));
            }
            let group = self
                .groups
                .get_mut(&group_id)
                .ok_or(MapError::UnknownGroup(group_id))?;
            group.members.push(id);
            self.territories.insert(id, Territory::new(id, group_id));
        }

        debug!("{} regions defined", self.territories.len());
        Ok(())
    }

    /// Define borders from `id a,b,c` pairs and mark group-border territories.
    ///
    /// Every border is recorded in both directions.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed data, an unknown territory or a
    /// territory listed as its own neighbour.
    pub fn setup_adjacency(&mut self, tokens: &[&str]) -> Result<(), MapError> {
        const SECTION: &str = "neighbors";

        let mut links = Vec::new();
        for record in records(SECTION, tokens, 2)? {
            let id = self.known(parse_number(SECTION, record[0])?)?;
            for token in record[1].split(',').filter(|s| !s.is_empty()) {
                let other = self.known(parse_number(SECTION, token)?)?;
                if other == id {
                    return Err(MapError::SelfAdjacent(id));
                }
                links.push((id, other));
            }
        }

        for (a, b) in links {
            if let Some(territory) = self.territories.get_mut(&a) {
                territory.link(b);
            }
            if let Some(territory) = self.territories.get_mut(&b) {
                territory.link(a);
            }
        }

        let groups: HashMap<TerritoryId, GroupId> =
            self.territories.values().map(|t| (t.id, t.group)).collect();
        for territory in self.territories.values_mut() {
            if territory
                .neighbors
                .iter()
                .any(|n| groups.get(n) != Some(&territory.group))
            {
                territory.on_group_border = true;
            }
        }

        self.refresh_neighbor_owners();
        Ok(())
    }

    /// Replace the visible snapshot with `id owner troops` triples.
    ///
    /// The host's values are authoritative: any pending speculative
    /// mutations are discarded first.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed data or an unknown territory. The map is
    /// left untouched in that case.
    pub fn update_visible(&mut self, tokens: &[&str]) -> Result<(), MapError> {
        const SECTION: &str = "update_map";

        let mut updates = Vec::with_capacity(tokens.len() / 3);
        for record in records(SECTION, tokens, 3)? {
            let id = self.known(parse_number(SECTION, record[0])?)?;
            let troops: u32 = parse_number(SECTION, record[2])?;
            updates.push((id, record[1], troops));
        }

        self.undo_all();
        self.visible.clear();
        for (id, owner, troops) in updates {
            if let Some(territory) = self.territories.get_mut(&id) {
                owner.clone_into(&mut territory.owner);
                territory.troops = troops;
            }
            self.visible.push(id);
        }

        self.refresh_neighbor_owners();
        Ok(())
    }

    /// Replace the stored opponent moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the moves cannot be parsed; the previous store is
    /// kept in that case.
    pub fn record_opponent_moves(&mut self, tokens: &[&str]) -> Result<(), MapError> {
        self.opponents = OpponentMoves::parse(tokens)?;
        Ok(())
    }

    /// Opponent moves from the last `opponent_moves` command.
    #[must_use]
    pub const fn opponent_moves(&self) -> &OpponentMoves {
        &self.opponents
    }

    /// Look up a territory.
    #[must_use]
    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(&id)
    }

    /// Look up a group.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// All territories in id order.
    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.values()
    }

    /// All groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Number of territories.
    #[must_use]
    pub fn territory_count(&self) -> usize {
        self.territories.len()
    }

    /// Territories revealed by the last update, in host order.
    pub fn visible(&self) -> impl Iterator<Item = &Territory> {
        self.visible.iter().filter_map(|id| self.territories.get(id))
    }

    /// Visible territories owned by `player`.
    #[must_use]
    pub fn owned_by(&self, player: &str) -> Vec<&Territory> {
        self.visible().filter(|t| t.is_owned_by(player)).collect()
    }

    /// Split the visible snapshot into owned, frontier and outlier ids.
    ///
    /// A territory is frontier when `player` appears among its neighbours'
    /// owner names, speculative ownership included.
    #[must_use]
    pub fn partition(&self, player: &str) -> Partition {
        let mut partition = Partition::default();
        for territory in self.visible() {
            if territory.is_owned_by(player) {
                partition.owned.push(territory.id);
            } else if territory.neighbor_owners.iter().any(|o| o == player) {
                partition.frontier.push(territory.id);
            } else {
                partition.outliers.push(territory.id);
            }
        }
        partition
    }

    /// The ids among `ids` owned by `player`, in input order.
    #[must_use]
    pub fn owned_in(&self, ids: &[TerritoryId], player: &str) -> Vec<TerritoryId> {
        ids.iter()
            .copied()
            .filter(|id| self.territory(*id).is_some_and(|t| t.is_owned_by(player)))
            .collect()
    }

    /// Number of neighbours of `id` not owned by `player`.
    #[must_use]
    pub fn enemy_neighbor_count(&self, id: TerritoryId, player: &str) -> usize {
        self.territory(id).map_or(0, |t| {
            t.neighbors
                .iter()
                .filter_map(|n| self.territory(*n))
                .filter(|n| !n.is_owned_by(player))
                .count()
        })
    }

    /// Number of members of `group` not owned by `player`.
    #[must_use]
    pub fn unowned_in_group(&self, group: GroupId, player: &str) -> usize {
        self.group(group).map_or(0, |g| {
            g.members.len() - self.owned_in(&g.members, player).len()
        })
    }

    /// Territories `player` has yet to capture, judged from the snapshot.
    #[must_use]
    pub fn uncaptured_count(&self, player: &str) -> usize {
        self.territory_count() - self.owned_by(player).len()
    }

    /// Speculatively move troops and ownership, recording how to undo it.
    ///
    /// `from` loses `from_qty` troops, `to` gains `to_qty` and passes to
    /// `new_owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if either territory is unknown; nothing is changed.
    pub fn apply_tentative(
        &mut self,
        from: TerritoryId,
        from_qty: u32,
        to: TerritoryId,
        to_qty: u32,
        new_owner: &str,
    ) -> Result<(), MapError> {
        let from_troops = self.known_territory(from)?.troops;
        let target = self.known_territory(to)?;
        let step = Tentative {
            from,
            from_troops,
            to,
            to_troops: target.troops,
            previous_owner: target.owner.clone(),
        };

        if let Some(source) = self.territories.get_mut(&from) {
            source.troops = source.troops.saturating_sub(from_qty);
        }
        if let Some(target) = self.territories.get_mut(&to) {
            target.troops = target.troops.saturating_add(to_qty);
            new_owner.clone_into(&mut target.owner);
        }
        self.undo.push(step);
        self.refresh_neighbor_owners();
        Ok(())
    }

    /// Reverse the most recent speculative mutation.
    ///
    /// # Panics
    ///
    /// Panics if there is nothing to undo; callers must pair every undo with
    /// an earlier [`Map::apply_tentative`].
    pub fn undo_last(&mut self) {
        let Some(step) = self.undo.pop() else {
            panic!("undo_last called with an empty undo log");
        };
        if let Some(target) = self.territories.get_mut(&step.to) {
            target.troops = step.to_troops;
            target.owner = step.previous_owner;
        }
        if let Some(source) = self.territories.get_mut(&step.from) {
            source.troops = step.from_troops;
        }
        self.refresh_neighbor_owners();
    }

    /// Reverse every pending speculative mutation.
    pub fn undo_all(&mut self) {
        while !self.undo.is_empty() {
            self.undo_last();
        }
    }

    /// Number of speculative mutations not yet undone.
    #[must_use]
    pub fn pending_undo(&self) -> usize {
        self.undo.len()
    }

    /// Return every territory to neutral with the starting garrison and
    /// forget the snapshot.
    pub fn reset_snapshot(&mut self) {
        self.undo.clear();
        self.visible.clear();
        self.opponents = OpponentMoves::default();
        for territory in self.territories.values_mut() {
            NEUTRAL.clone_into(&mut territory.owner);
            territory.troops = STARTING_TROOPS;
        }
        self.refresh_neighbor_owners();
    }

    fn known(&self, id: u32) -> Result<TerritoryId, MapError> {
        let id = TerritoryId(id);
        self.known_territory(id).map(|t| t.id)
    }

    fn known_territory(&self, id: TerritoryId) -> Result<&Territory, MapError> {
        self.territories
            .get(&id)
            .ok_or(MapError::UnknownTerritory(id))
    }

    fn refresh_neighbor_owners(&mut self) {
        let owners: HashMap<TerritoryId, String> = self
            .territories
            .values()
            .map(|t| (t.id, t.owner.clone()))
            .collect();
        for territory in self.territories.values_mut() {
            territory.neighbor_owners = territory
                .neighbors
                .iter()
                .filter_map(|n| owners.get(n).cloned())
                .collect();
        }
    }
}

fn split(data: &str) -> Vec<&str> {
    data.split_whitespace().collect()
}
