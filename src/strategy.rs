//! Decision making.
//!
//! Every strategy answers the same three questions each game:
//! - which six territories to start from
//! - where to place this turn's armies
//! - which attacks and transfers to make
//!
//! Strategies read the map through a [`Context`] and only ever mutate a
//! [`Working`] copy of troop counts, so a decision never disturbs the
//! snapshot the host sent.

mod aggressive;
mod defensive;
mod random;

pub use aggressive::{AggressiveBot, DEFAULT_DEADLINE};
pub use defensive::DefensiveBot;
pub use random::RandomBot;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::map::{Map, TerritoryId, Working};
use crate::moves::{Movements, Placements};
use crate::weights::WeightTable;

/// Number of starting territories the host asks for.
pub const STARTING_PICKS: usize = 6;

/// Read-only view of the game handed to a strategy for one decision.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// The map as last reported by the host.
    pub map: &'a Map,
    /// Priority weights.
    pub weights: &'a WeightTable,
    /// Our player name.
    pub player: &'a str,
    /// Opponent player names.
    pub opponents: &'a [String],
    /// Armies available for this placement phase.
    pub armies: u32,
    /// Placement turn number, starting at 1.
    pub turn: u32,
}

/// The decision contract shared by all strategies.
pub trait Strategy {
    /// Choose [`STARTING_PICKS`] distinct ids from `candidates`, or all of
    /// them when fewer are offered.
    fn pick_starting(
        &mut self,
        ctx: &Context<'_>,
        candidates: &[TerritoryId],
        budget: Duration,
    ) -> Vec<TerritoryId>;

    /// Distribute `ctx.armies` over owned territories.
    ///
    /// The placements sum to `ctx.armies` whenever the player owns a visible
    /// territory. Placed armies are also added to `working`.
    fn place_armies(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        budget: Duration,
    ) -> Placements;

    /// Choose attacks and transfers, draining sources in `working`.
    fn attack_transfer(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        budget: Duration,
    ) -> Movements;
}

/// Which strategy the agent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Uniformly random choices.
    Random,
    /// Concentrate on the most contested front and attack greedily.
    #[default]
    Aggressive,
    /// Complete nearly-owned groups and hold chokepoints.
    Defensive,
}

/// The closed set of strategies.
#[derive(Debug, Clone)]
pub enum Bot {
    /// See [`RandomBot`].
    Random(RandomBot<SmallRng>),
    /// See [`AggressiveBot`].
    Aggressive(AggressiveBot),
    /// See [`DefensiveBot`].
    Defensive(DefensiveBot),
}

impl Bot {
    /// Build the strategy for `kind`.
    ///
    /// `seed` drives every random choice; `deadline` bounds the aggressive
    /// attack/transfer search.
    #[must_use]
    pub fn new(kind: StrategyKind, seed: u64, deadline: Duration) -> Self {
        match kind {
            StrategyKind::Random => Self::Random(RandomBot::new(SmallRng::seed_from_u64(seed))),
            StrategyKind::Aggressive => Self::Aggressive(AggressiveBot::new(deadline)),
            StrategyKind::Defensive => Self::Defensive(DefensiveBot),
        }
    }

    /// The kind of this strategy.
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Random(_) => StrategyKind::Random,
            Self::Aggressive(_) => StrategyKind::Aggressive,
            Self::Defensive(_) => StrategyKind::Defensive,
        }
    }
}

impl Strategy for Bot {
    fn pick_starting(
        &mut self,
        ctx: &Context<'_>,
        candidates: &[TerritoryId],
        budget: Duration,
    ) -> Vec<TerritoryId> {
        match self {
            Self::Random(bot) => bot.pick_starting(ctx, candidates, budget),
            Self::Aggressive(bot) => bot.pick_starting(ctx, candidates, budget),
            Self::Defensive(bot) => bot.pick_starting(ctx, candidates, budget),
        }
    }

    fn place_armies(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        budget: Duration,
    ) -> Placements {
        match self {
            Self::Random(bot) => bot.place_armies(ctx, working, budget),
            Self::Aggressive(bot) => bot.place_armies(ctx, working, budget),
            Self::Defensive(bot) => bot.place_armies(ctx, working, budget),
        }
    }

    fn attack_transfer(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        budget: Duration,
    ) -> Movements {
        match self {
            Self::Random(bot) => bot.attack_transfer(ctx, working, budget),
            Self::Aggressive(bot) => bot.attack_transfer(ctx, working, budget),
            Self::Defensive(bot) => bot.attack_transfer(ctx, working, budget),
        }
    }
}

/// `ids` without repeats, first occurrence kept.
fn distinct(ids: &[TerritoryId]) -> Vec<TerritoryId> {
    let mut seen = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        let ids = [TerritoryId(3), TerritoryId(1), TerritoryId(3)];
        assert_eq!(distinct(&ids), vec![TerritoryId(3), TerritoryId(1)]);
    }

    #[test]
    fn test_bot_kind_round_trip() {
        for kind in [
            StrategyKind::Random,
            StrategyKind::Aggressive,
            StrategyKind::Defensive,
        ] {
            assert_eq!(Bot::new(kind, 7, DEFAULT_DEADLINE).kind(), kind);
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::map::Map;

    /// The standard map after an `update_map` with `update`.
    pub(crate) fn standard_map(update: &str) -> Map {
        let mut map = Map::standard().unwrap();
        let tokens: Vec<&str> = update.split_whitespace().collect();
        map.update_visible(&tokens).unwrap();
        map
    }
}
