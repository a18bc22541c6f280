#![no_main]

//! Decision fuzzer.
//!
//! Builds an arbitrary position on the standard map and checks the decision
//! invariants for every strategy:
//! 1. Placements spend exactly the budget on owned territories
//! 2. Moves leave from owned territories along borders
//! 3. No source sends more than it holds minus one

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use warlight::strategy::DEFAULT_DEADLINE;
use warlight::{Bot, Context, Map, Strategy, StrategyKind, TerritoryId, WeightTable, Working};

/// Structured input for one turn.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    /// Owner of each territory: 0 us, 1 opponent, otherwise neutral.
    owners: [u8; 42],
    /// Troops on each territory.
    troops: [u8; 42],
    /// Armies to place.
    armies: u8,
    /// Placement turn.
    turn: u8,
    /// Seed for the random strategy.
    seed: u64,
}

fuzz_target!(|input: TurnInput| {
    let mut update = Vec::new();
    for (i, (owner, troops)) in input.owners.iter().zip(input.troops).enumerate() {
        update.push((i + 1).to_string());
        update.push(match owner % 3 {
            0 => "player1".to_string(),
            1 => "player2".to_string(),
            _ => "neutral".to_string(),
        });
        update.push(troops.max(1).to_string());
    }
    let tokens: Vec<&str> = update.iter().map(String::as_str).collect();
    let Ok(mut map) = Map::standard() else {
        return;
    };
    if map.update_visible(&tokens).is_err() {
        return;
    }

    let weights = WeightTable::degree();
    let ctx = Context {
        map: &map,
        weights: &weights,
        player: "player1",
        opponents: &[],
        armies: u32::from(input.armies),
        turn: u32::from(input.turn).max(1),
    };
    let owns_any = !map.owned_by("player1").is_empty();

    for kind in [StrategyKind::Random, StrategyKind::Aggressive, StrategyKind::Defensive] {
        let mut bot = Bot::new(kind, input.seed, DEFAULT_DEADLINE);

        let mut working = Working::from_map(&map);
        let placements = bot.place_armies(&ctx, &mut working, Duration::from_millis(2000));
        if owns_any {
            assert_eq!(placements.total(), ctx.armies);
        }
        for p in placements.as_slice() {
            assert!(map.territory(p.territory).is_some_and(|t| t.is_owned_by("player1")));
        }

        let mut working = Working::from_map(&map);
        let movements = bot.attack_transfer(&ctx, &mut working, Duration::from_millis(2000));
        let mut sent = [0u32; 43];
        for m in movements.as_slice() {
            let source = map.territory(m.from);
            assert!(source.is_some_and(|t| t.is_owned_by("player1") && t.borders(m.to)));
            sent[m.from.0 as usize] += m.armies;
        }
        for (id, total) in sent.iter().enumerate().skip(1) {
            let held = map.territory(TerritoryId(id as u32)).map_or(0, |t| t.troops);
            assert!(*total == 0 || *total < held);
        }
    }
});
