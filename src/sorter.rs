//! Weight ordering of territories.

use crate::map::TerritoryId;
use crate::weights::WeightTable;

/// Direction of a weight ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Lightest first.
    Ascending,
    /// Heaviest first.
    Descending,
}

/// Order `ids` by territory weight.
///
/// The sort is stable: ids of equal weight keep their relative input order,
/// which keeps starting picks reproducible.
#[must_use]
pub fn sort_by_weight(
    ids: &[TerritoryId],
    weights: &WeightTable,
    order: Order,
) -> Vec<TerritoryId> {
    let mut sorted = ids.to_vec();
    match order {
        Order::Ascending => sorted.sort_by_key(|id| weights.territory(*id)),
        Order::Descending => {
            sorted.sort_by(|a, b| weights.territory(*b).cmp(&weights.territory(*a)));
        }
    }
    sorted
}
