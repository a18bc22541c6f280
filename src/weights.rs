//! Static priority weights for territories and groups.
//!
//! Both canonical tables describe the standard 42-territory map. Ids a table
//! does not list weigh [`FALLBACK_WEIGHT`], so the tables stay usable on other
//! maps (where every territory then ties and the sorter keeps input order).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::map::{GroupId, TerritoryId};

/// Weight of any id a table does not list.
pub const FALLBACK_WEIGHT: u32 = 1;

/// Bonus-derived group weights of the standard map, by group id 1..=6.
const STANDARD_GROUP_BONUS: [u32; 6] = [5, 2, 5, 3, 7, 2];

/// Hand-tuned degree of each standard territory, by territory id 1..=42.
const STANDARD_DEGREES: [u32; 42] = [
    3, 4, 4, 4, 6, 3, 4, 4, 3, // North America
    3, 3, 4, 2, // South America
    3, 4, 4, 6, 4, 5, 6, // Europe
    6, 4, 6, 4, 3, 2, // Africa
    4, 5, 3, 4, 4, 5, 6, 5, 2, 6, 4, 3, // Asia
    2, 3, 2, 2, // Australia
];

/// Which canonical weight table to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightsKind {
    /// Every territory weighs 1.
    #[default]
    Uniform,
    /// Territories weigh their hand-tuned degree.
    Degree,
}

/// Immutable mapping from ids to integer priority weights.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    territories: HashMap<TerritoryId, u32>,
    groups: HashMap<GroupId, u32>,
}

impl WeightTable {
    /// Build a table from explicit weights.
    #[must_use]
    pub fn new(
        territories: impl IntoIterator<Item = (TerritoryId, u32)>,
        groups: impl IntoIterator<Item = (GroupId, u32)>,
    ) -> Self {
        Self {
            territories: territories.into_iter().collect(),
            groups: groups.into_iter().collect(),
        }
    }

    /// Flat weight of 1 on every standard territory; groups weigh their bonus.
    #[must_use]
    pub fn uniform() -> Self {
        Self::new(
            (1..=42).map(|id| (TerritoryId(id), 1)),
            standard_groups(|bonus| bonus),
        )
    }

    /// Degree-informed weights of the standard map; every group weighs 1.
    #[must_use]
    pub fn degree() -> Self {
        Self::new(
            (1..).map(TerritoryId).zip(STANDARD_DEGREES),
            standard_groups(|_| 1),
        )
    }

    /// The canonical table for `kind`.
    #[must_use]
    pub fn for_kind(kind: WeightsKind) -> Self {
        match kind {
            WeightsKind::Uniform => Self::uniform(),
            WeightsKind::Degree => Self::degree(),
        }
    }

    /// Weight of a territory.
    #[must_use]
    pub fn territory(&self, id: TerritoryId) -> u32 {
        self.territories.get(&id).copied().unwrap_or(FALLBACK_WEIGHT)
    }

    /// Weight of a group.
    #[must_use]
    pub fn group(&self, id: GroupId) -> u32 {
        self.groups.get(&id).copied().unwrap_or(FALLBACK_WEIGHT)
    }
}

fn standard_groups(weight: impl Fn(u32) -> u32) -> Vec<(GroupId, u32)> {
    (1..)
        .map(GroupId)
        .zip(STANDARD_GROUP_BONUS)
        .map(|(id, bonus)| (id, weight(bonus)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_table() {
        let table = WeightTable::uniform();
        assert!((1..=42).all(|id| table.territory(TerritoryId(id)) == 1));
        assert_eq!(table.group(GroupId(5)), 7);
        assert_eq!(table.group(GroupId(2)), 2);
    }

    #[test]
    fn test_degree_table() {
        let table = WeightTable::degree();
        assert_eq!(table.territory(TerritoryId(1)), 3); // Alaska
        assert_eq!(table.territory(TerritoryId(5)), 6); // Ontario
        assert_eq!(table.territory(TerritoryId(26)), 2); // Madagascar
        assert_eq!(table.territory(TerritoryId(42)), 2); // Eastern Australia
        assert_eq!(table.group(GroupId(3)), 1);
    }

    #[test]
    fn test_fallback_for_unlisted_ids() {
        let table = WeightTable::degree();
        assert_eq!(table.territory(TerritoryId(100)), FALLBACK_WEIGHT);
        assert_eq!(table.group(GroupId(9)), FALLBACK_WEIGHT);
    }

    #[test]
    fn test_for_kind() {
        let table = WeightTable::for_kind(WeightsKind::Degree);
        assert_eq!(table.territory(TerritoryId(17)), 6);
    }
}
