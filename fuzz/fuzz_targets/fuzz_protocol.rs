#![no_main]

//! Protocol fuzzer.
//!
//! Feeds arbitrary lines to an agent that already knows the standard map.
//! Any line may be rejected, but none may panic, and every `go` answer must
//! be a well-formed response line.

use libfuzzer_sys::fuzz_target;
use warlight::map::standard::{NEIGHBORS, REGIONS, SUPER_REGIONS};
use warlight::strategy::DEFAULT_DEADLINE;
use warlight::{Agent, Bot, StrategyKind, WeightTable};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let kind = match data.first().map(|b| b % 3) {
        Some(0) => StrategyKind::Random,
        Some(1) => StrategyKind::Aggressive,
        _ => StrategyKind::Defensive,
    };

    let mut agent = Agent::new(Bot::new(kind, 7, DEFAULT_DEADLINE), WeightTable::degree());
    for line in [
        format!("setup_map super_regions {SUPER_REGIONS}"),
        format!("setup_map regions {REGIONS}"),
        format!("setup_map neighbors {NEIGHBORS}"),
    ] {
        if agent.handle_line(&line).is_err() {
            return;
        }
    }

    for line in text.lines().take(64) {
        match agent.handle_line(line) {
            Ok(Some(response)) => assert!(!response.contains('\n')),
            Ok(None) => {}
            // Inconsistent map data ends the session.
            Err(_) => return,
        }
    }
});
