//! Benchmarks for single decisions on the sample position.
//!
//! The host allows 2000 ms per `go`; these measure how far below that each
//! strategy stays.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use warlight::combat::capture_chance;
use warlight::map::standard::{SAMPLE_ARMIES, SAMPLE_UPDATE};
use warlight::strategy::DEFAULT_DEADLINE;
use warlight::{Bot, Context, Map, Strategy, StrategyKind, WeightTable, Working};

const KINDS: [(&str, StrategyKind); 3] = [
    ("random", StrategyKind::Random),
    ("aggressive", StrategyKind::Aggressive),
    ("defensive", StrategyKind::Defensive),
];

fn sample_map() -> Map {
    let mut map = Map::standard().unwrap();
    let tokens: Vec<&str> = SAMPLE_UPDATE.split_whitespace().collect();
    map.update_visible(&tokens).unwrap();
    map
}

fn context<'a>(map: &'a Map, weights: &'a WeightTable) -> Context<'a> {
    Context {
        map,
        weights,
        player: "player1",
        opponents: &[],
        armies: SAMPLE_ARMIES,
        turn: 2,
    }
}

fn bench_place_armies(c: &mut Criterion) {
    let map = sample_map();
    let weights = WeightTable::degree();

    for (name, kind) in KINDS {
        let mut bot = Bot::new(kind, 42, DEFAULT_DEADLINE);
        c.bench_function(&format!("place_armies_{name}"), |b| {
            b.iter(|| {
                let mut working = Working::from_map(&map);
                let placements =
                    bot.place_armies(&context(&map, &weights), &mut working, Duration::ZERO);
                black_box(placements)
            });
        });
    }
}

fn bench_attack_transfer(c: &mut Criterion) {
    let map = sample_map();
    let weights = WeightTable::degree();

    for (name, kind) in KINDS {
        let mut bot = Bot::new(kind, 42, DEFAULT_DEADLINE);
        c.bench_function(&format!("attack_transfer_{name}"), |b| {
            b.iter(|| {
                let mut working = Working::from_map(&map);
                let movements = bot.attack_transfer(
                    &context(&map, &weights),
                    &mut working,
                    Duration::from_millis(2000),
                );
                black_box(movements)
            });
        });
    }
}

fn bench_capture_chance(c: &mut Criterion) {
    c.bench_function("capture_chance_35_vs_6", |b| {
        b.iter(|| black_box(capture_chance(black_box(35), black_box(6))));
    });
    c.bench_function("capture_chance_2000_vs_1500", |b| {
        b.iter(|| black_box(capture_chance(black_box(2000), black_box(1500))));
    });
}

criterion_group!(
    benches,
    bench_place_armies,
    bench_attack_transfer,
    bench_capture_chance
);
criterion_main!(benches);
