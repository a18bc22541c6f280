//! Offline check of a strategy against a recorded position.

use warlight::Agent;
use warlight::map::standard::{
    GO_TIME, NEIGHBORS, OPPONENT_NAME, PICK_STARTING_TIME, PLAYER_NAME, REGIONS, SAMPLE_ARMIES,
    SAMPLE_CANDIDATES, SAMPLE_OPPONENT_MOVES, SAMPLE_UPDATE, SUPER_REGIONS,
};
use warlight::moves::NO_MOVES;
use warlight::strategy::STARTING_PICKS;

use super::{AgentOptions, CliError};

/// Execute the check command.
///
/// Sets up the standard map, asks for starting picks from the sample offer,
/// then plays `turns` rounds on the sample position, printing every exchange
/// and checking the answers against the protocol rules.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or an answer breaks
/// the protocol rules.
pub(crate) fn execute(options: &AgentOptions, turns: u32) -> Result<(), CliError> {
    let config = options.resolve()?;
    let mut agent = Agent::from_config(&config);

    println!("Strategy: {:?}", config.strategy);
    println!("Weights:  {:?}", config.weights);
    println!();

    for line in [
        format!("setup_map super_regions {SUPER_REGIONS}"),
        format!("setup_map regions {REGIONS}"),
        format!("setup_map neighbors {NEIGHBORS}"),
        format!("settings your_bot {PLAYER_NAME}"),
        format!("settings opponent_bot {OPPONENT_NAME}"),
    ] {
        agent.handle_line(&line)?;
    }
    print_check("Standard map", agent.map().territory_count() == 42);

    let picks = send(
        &mut agent,
        &format!("pick_starting_regions {PICK_STARTING_TIME} {SAMPLE_CANDIDATES}"),
    )?;
    let offered: Vec<&str> = SAMPLE_CANDIDATES.split_whitespace().collect();
    let chosen: Vec<&str> = picks.split_whitespace().collect();
    let picks_ok = chosen.len() == STARTING_PICKS && chosen.iter().all(|p| offered.contains(p));
    print_check("Starting picks", picks_ok);
    if !picks_ok {
        return Err(CliError::new(format!("Invalid starting picks: {picks}")));
    }

    for _ in 0..turns {
        for line in [
            format!("settings starting_armies {SAMPLE_ARMIES}"),
            format!("update_map {SAMPLE_UPDATE}"),
            format!("opponent_moves {SAMPLE_OPPONENT_MOVES}"),
        ] {
            agent.handle_line(&line)?;
        }

        let placed = send(&mut agent, &format!("go place_armies {GO_TIME}"))?;
        let total = placed_total(&placed);
        print_check("Placement uses every army", total == SAMPLE_ARMIES);
        if total != SAMPLE_ARMIES {
            return Err(CliError::new(format!(
                "Placed {total} of {SAMPLE_ARMIES} armies"
            )));
        }

        send(&mut agent, &format!("go attack/transfer {GO_TIME}"))?;
    }

    println!();
    println!("Check successful!");
    Ok(())
}

/// Send `line` and print the exchange; a silent command answers "".
fn send(agent: &mut Agent, line: &str) -> Result<String, CliError> {
    println!("> {line}");
    let response = agent.handle_line(line)?.unwrap_or_default();
    println!("< {response}");
    Ok(response)
}

/// Sum of the armies in a placement response.
fn placed_total(response: &str) -> u32 {
    if response == NO_MOVES {
        return 0;
    }
    response
        .split(", ")
        .filter_map(|entry| entry.rsplit(' ').next())
        .filter_map(|qty| qty.parse::<u32>().ok())
        .sum()
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
