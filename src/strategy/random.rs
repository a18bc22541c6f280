//! Random strategy.

use std::time::Duration;

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::map::{TerritoryId, Working};
use crate::moves::{Movements, Placements};
use crate::strategy::{Context, STARTING_PICKS, Strategy};

/// Troops a territory must exceed before it attacks.
const ATTACK_THRESHOLD: u32 = 6;

/// Troops sent in every attack.
const ATTACK_SIZE: u32 = 5;

/// Makes every choice at random.
///
/// Useful as a baseline opponent and as a smoke test of the protocol.
#[derive(Debug, Clone)]
pub struct RandomBot<R> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    /// Create a bot drawing from `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for RandomBot<R> {
    fn pick_starting(
        &mut self,
        _ctx: &Context<'_>,
        candidates: &[TerritoryId],
        _budget: Duration,
    ) -> Vec<TerritoryId> {
        let mut picks = candidates.to_vec();
        picks.sort_unstable();
        picks.dedup();
        picks.shuffle(&mut self.rng);
        picks.truncate(STARTING_PICKS);
        picks
    }

    fn place_armies(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        _budget: Duration,
    ) -> Placements {
        let mut placements = Placements::new();
        if ctx.armies == 0 {
            return placements;
        }
        let mut owned: Vec<TerritoryId> =
            ctx.map.owned_by(ctx.player).iter().map(|t| t.id).collect();
        if owned.is_empty() {
            warn!("no owned territory to place {} armies on", ctx.armies);
            return placements;
        }
        owned.shuffle(&mut self.rng);

        let mut remaining = ctx.armies;
        for &id in owned.iter().cycle() {
            if remaining == 0 {
                break;
            }
            let qty = remaining.min(2);
            placements.add(id, qty);
            working.add(id, qty);
            remaining -= qty;
        }
        placements
    }

    fn attack_transfer(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        _budget: Duration,
    ) -> Movements {
        let mut movements = Movements::new();

        for source in ctx.map.owned_by(ctx.player) {
            let mut options = source.neighbors().to_vec();
            while !options.is_empty() {
                let index = self.rng.random_range(0..options.len());
                let target = options[index];
                let friendly = ctx
                    .map
                    .territory(target)
                    .is_some_and(|t| t.is_owned_by(ctx.player));
                let troops = working.troops(source.id);

                if !friendly && troops > ATTACK_THRESHOLD {
                    movements.add(source.id, target, ATTACK_SIZE);
                    working.remove(source.id, ATTACK_SIZE);
                } else if friendly && troops > 1 {
                    movements.add(source.id, target, troops - 1);
                    working.set(source.id, 1);
                } else {
                    options.swap_remove(index);
                }
            }
        }

        movements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GroupId, Map};
    use crate::strategy::fixtures::standard_map;
    use crate::weights::WeightTable;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn bot(seed: u64) -> RandomBot<SmallRng> {
        RandomBot::new(SmallRng::seed_from_u64(seed))
    }

    fn ctx<'a>(map: &'a Map, weights: &'a WeightTable, armies: u32) -> Context<'a> {
        Context {
            map,
            weights,
            player: "x",
            opponents: &[],
            armies,
            turn: 2,
        }
    }

    fn tokens(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn test_pick_starting_is_subset() {
        let map = Map::standard().unwrap();
        let weights = WeightTable::uniform();
        let candidates: Vec<TerritoryId> = [3, 2, 10, 12, 20, 17, 24, 25, 31, 36, 42, 39]
            .into_iter()
            .map(TerritoryId)
            .collect();

        let picks = bot(1).pick_starting(&ctx(&map, &weights, 0), &candidates, Duration::ZERO);

        assert_eq!(picks.len(), STARTING_PICKS);
        assert!(picks.iter().all(|p| candidates.contains(p)));
        let mut unique = picks.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), STARTING_PICKS);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let map = Map::standard().unwrap();
        let weights = WeightTable::uniform();
        let candidates: Vec<TerritoryId> = (1..=12).map(TerritoryId).collect();
        let c = ctx(&map, &weights, 0);
        assert_eq!(
            bot(9).pick_starting(&c, &candidates, Duration::ZERO),
            bot(9).pick_starting(&c, &candidates, Duration::ZERO)
        );
    }

    #[test]
    fn test_placement_two_two_one() {
        // Territories 1-5 in one group, all starting neutral with 2 troops.
        let mut map = Map::new();
        map.setup_groups(&tokens("1 3")).unwrap();
        map.setup_territories(&tokens("1 1 2 1 3 1 4 1 5 1")).unwrap();
        map.setup_adjacency(&tokens("1 2 2 3 3 4 4 5")).unwrap();
        map.update_visible(&tokens("1 x 2 2 x 2 3 x 2 4 neutral 2 5 neutral 2"))
            .unwrap();
        let weights = WeightTable::uniform();
        let mut working = Working::from_map(&map);

        let placements =
            bot(3).place_armies(&ctx(&map, &weights, 5), &mut working, Duration::ZERO);

        let amounts: Vec<u32> = placements.as_slice().iter().map(|p| p.armies).collect();
        assert_eq!(amounts, vec![2, 2, 1]);
        let mut targets: Vec<u32> = placements.as_slice().iter().map(|p| p.territory.0).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![1, 2, 3]);
        assert_eq!(map.group(GroupId(1)).unwrap().members().len(), 5);
    }

    #[test]
    fn test_placement_cycles_when_short_of_territories() {
        let map = standard_map("1 x 3");
        let weights = WeightTable::uniform();
        let mut working = Working::from_map(&map);

        let placements =
            bot(4).place_armies(&ctx(&map, &weights, 5), &mut working, Duration::ZERO);

        assert_eq!(placements.total(), 5);
        assert_eq!(working.troops(TerritoryId(1)), 8);
    }

    #[test]
    fn test_single_attack_against_lone_neighbor() {
        let mut map = Map::new();
        map.setup_groups(&tokens("1 1")).unwrap();
        map.setup_territories(&tokens("1 1 2 1")).unwrap();
        map.setup_adjacency(&tokens("1 2")).unwrap();
        map.update_visible(&tokens("1 x 7 2 y 1")).unwrap();
        let weights = WeightTable::uniform();
        let mut working = Working::from_map(&map);

        let movements =
            bot(5).attack_transfer(&ctx(&map, &weights, 0), &mut working, Duration::ZERO);

        assert_eq!(movements.len(), 1);
        let attack = movements.as_slice()[0];
        assert_eq!(
            (attack.from, attack.to, attack.armies),
            (TerritoryId(1), TerritoryId(2), 5)
        );
        assert_eq!(working.troops(TerritoryId(1)), 2);
    }

    #[test]
    fn test_transfer_leaves_one_behind() {
        let mut map = Map::new();
        map.setup_groups(&tokens("1 1")).unwrap();
        map.setup_territories(&tokens("1 1 2 1")).unwrap();
        map.setup_adjacency(&tokens("1 2")).unwrap();
        map.update_visible(&tokens("1 x 4 2 x 1")).unwrap();
        let weights = WeightTable::uniform();
        let mut working = Working::from_map(&map);

        let movements =
            bot(6).attack_transfer(&ctx(&map, &weights, 0), &mut working, Duration::ZERO);

        assert_eq!(movements.as_slice()[0].armies, 3);
        assert_eq!(movements.len(), 1);
        assert_eq!(working.troops(TerritoryId(1)), 1);
    }
}
