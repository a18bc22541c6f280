//! Scratch troop counts for a decision in progress.

use std::collections::BTreeMap;

use crate::map::{Map, TerritoryId};
use crate::moves::Placement;

/// Troop counts a strategy may freely mutate while deciding.
///
/// Built from the map at the start of a decision and dropped with it; the
/// map's own counts stay as the host reported them.
#[derive(Debug, Clone, Default)]
pub struct Working {
    troops: BTreeMap<TerritoryId, u32>,
}

impl Working {
    /// Snapshot the troop count of every territory on `map`.
    #[must_use]
    pub fn from_map(map: &Map) -> Self {
        Self {
            troops: map.territories().map(|t| (t.id, t.troops)).collect(),
        }
    }

    /// Troops on `id`, or 0 for a territory the map does not know.
    #[must_use]
    pub fn troops(&self, id: TerritoryId) -> u32 {
        self.troops.get(&id).copied().unwrap_or(0)
    }

    /// Overwrite the troops on `id`.
    pub fn set(&mut self, id: TerritoryId, troops: u32) {
        self.troops.insert(id, troops);
    }

    /// Add `armies` to `id`.
    pub fn add(&mut self, id: TerritoryId, armies: u32) {
        let entry = self.troops.entry(id).or_insert(0);
        *entry = entry.saturating_add(armies);
    }

    /// Remove up to `armies` from `id`.
    pub fn remove(&mut self, id: TerritoryId, armies: u32) {
        if let Some(entry) = self.troops.get_mut(&id) {
            *entry = entry.saturating_sub(armies);
        }
    }

    /// Replay placements made earlier in the same turn.
    pub fn apply_placements(&mut self, placements: &[Placement]) {
        for p in placements {
            self.add(p.territory, p.armies);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_do_not_touch_map() {
        let map = Map::standard().unwrap();
        let mut working = Working::from_map(&map);

        working.add(TerritoryId(1), 5);
        working.remove(TerritoryId(2), 1);
        assert_eq!(working.troops(TerritoryId(1)), 7);
        assert_eq!(working.troops(TerritoryId(2)), 1);

        let territory = map.territory(TerritoryId(1)).unwrap();
        assert_eq!(territory.troops, 2);
    }

    #[test]
    fn test_apply_placements() {
        let map = Map::standard().unwrap();
        let mut working = Working::from_map(&map);
        working.apply_placements(&[
            Placement {
                territory: TerritoryId(3),
                armies: 2,
            },
            Placement {
                territory: TerritoryId(3),
                armies: 1,
            },
        ]);
        assert_eq!(working.troops(TerritoryId(3)), 5);
        assert_eq!(working.troops(TerritoryId(999)), 0);
    }
}
