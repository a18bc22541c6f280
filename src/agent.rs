//! The protocol-driven agent.
//!
//! [`Agent`] owns the map, the weight table and the strategy, and turns each
//! host line into at most one response line. Decisions work on a fresh
//! [`Working`] copy of troop counts; the placements of the current turn are
//! remembered so the attack/transfer decision sees them.

use std::io::{BufRead, Write};
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::AgentConfig;
use crate::error::{AgentError, MapError, ProtocolError};
use crate::map::{Map, Working, standard};
use crate::moves::{Placement, render_picks};
use crate::protocol::{self, Command, GoPhase, MapSection, Setting};
use crate::strategy::{Bot, Context, Strategy};
use crate::weights::WeightTable;

/// Where the agent is in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Map and settings are still arriving.
    AwaitingSetup,
    /// Next decision is army placement.
    AwaitingPlacement,
    /// Next decision is attack/transfer.
    AwaitingAttackTransfer,
}

/// A game agent speaking the host's line protocol.
#[derive(Debug)]
pub struct Agent {
    map: Map,
    weights: WeightTable,
    bot: Bot,
    name: String,
    opponents: Vec<String>,
    armies: u32,
    turn: u32,
    phase: Phase,
    placed: Vec<Placement>,
}

/// Build the decision context from disjoint agent fields.
macro_rules! context {
    ($agent:expr) => {
        Context {
            map: &$agent.map,
            weights: &$agent.weights,
            player: &$agent.name,
            opponents: &$agent.opponents,
            armies: $agent.armies,
            turn: $agent.turn,
        }
    };
}

impl Agent {
    /// Create an agent with an empty map.
    ///
    /// The player name defaults to the host's first seat until a
    /// `settings your_bot` command arrives.
    #[must_use]
    pub fn new(bot: Bot, weights: WeightTable) -> Self {
        Self {
            map: Map::new(),
            weights,
            bot,
            name: standard::PLAYER_NAME.to_string(),
            opponents: Vec::new(),
            armies: 0,
            turn: 1,
            phase: Phase::AwaitingSetup,
            placed: Vec::new(),
        }
    }

    /// Create an agent as described by `config`.
    #[must_use]
    pub fn from_config(config: &AgentConfig) -> Self {
        let seed = config.seed_or_clock();
        info!(
            "agent: strategy {:?}, weights {:?}, seed {seed}",
            config.strategy, config.weights
        );
        Self::new(
            Bot::new(config.strategy, seed, config.deadline()),
            WeightTable::for_kind(config.weights),
        )
    }

    /// The map as last reported by the host.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Our player name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opponent names announced so far.
    #[must_use]
    pub fn opponents(&self) -> &[String] {
        &self.opponents
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Placement turn number, starting at 1.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Handle one line from the host.
    ///
    /// Returns the response line, if the command calls for one. Protocol
    /// errors are answered with their wire string.
    ///
    /// # Errors
    ///
    /// Returns an error if the host sent map data that cannot be applied.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<String>, AgentError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        match protocol::parse(&tokens) {
            Ok(command) => self.execute(command),
            Err(err) => {
                warn!("rejected {line:?}: {err}");
                Ok(Some(err.to_string()))
            }
        }
    }

    /// Serve the host until `input` ends, flushing after every response.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or inconsistent map data.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), AgentError> {
        for line in input.lines() {
            let line = line?;
            if let Some(response) = self.handle_line(&line)? {
                writeln!(output, "{response}")?;
                output.flush()?;
            }
        }
        info!("input closed after {} turns", self.turn - 1);
        Ok(())
    }

    fn execute(&mut self, command: Command<'_>) -> Result<Option<String>, AgentError> {
        match command {
            Command::SetupMap { section, data } => {
                match section {
                    MapSection::SuperRegions => self.map.setup_groups(data)?,
                    MapSection::Regions => self.map.setup_territories(data)?,
                    MapSection::Neighbors => self.map.setup_adjacency(data)?,
                }
                info!("setup {section:?}: {} territories", self.map.territory_count());
                Ok(None)
            }
            Command::Settings(setting) => {
                match setting {
                    Setting::StartingArmies(armies) => self.armies = armies,
                    Setting::YourBot(name) => name.clone_into(&mut self.name),
                    Setting::OpponentBot(name) => self.opponents.push(name.to_string()),
                }
                debug!("settings: {setting:?}");
                Ok(None)
            }
            Command::PickStartingRegions { budget, candidates } => {
                let unknown = candidates.iter().find(|id| self.map.territory(**id).is_none());
                if let Some(&id) = unknown {
                    return Err(MapError::UnknownTerritory(id).into());
                }
                let picks = self.bot.pick_starting(&context!(self), &candidates, budget);
                info!("picked {picks:?} from {} candidates", candidates.len());
                self.phase = Phase::AwaitingPlacement;
                Ok(Some(render_picks(&picks)))
            }
            Command::UpdateMap(data) => {
                if let Err(err) = self.map.update_visible(data) {
                    return reject_data(err);
                }
                self.placed.clear();
                debug!("update: {} visible territories", self.map.visible().count());
                Ok(None)
            }
            Command::OpponentMoves(data) => match self.map.record_opponent_moves(data) {
                Ok(()) => Ok(None),
                Err(err) => reject_data(err),
            },
            Command::Go { phase, budget } => Ok(Some(self.go(phase, budget))),
        }
    }

    fn go(&mut self, phase: GoPhase, budget: Duration) -> String {
        let expected = match phase {
            GoPhase::PlaceArmies => Phase::AwaitingPlacement,
            GoPhase::AttackTransfer => Phase::AwaitingAttackTransfer,
        };
        if self.phase != expected {
            warn!("go {phase:?} while {:?}", self.phase);
        }

        let mut working = Working::from_map(&self.map);
        match phase {
            GoPhase::PlaceArmies => {
                let placements = self.bot.place_armies(&context!(self), &mut working, budget);
                debug!(
                    "turn {}: placed {} of {} armies",
                    self.turn,
                    placements.total(),
                    self.armies
                );
                self.placed = placements.as_slice().to_vec();
                self.turn += 1;
                self.phase = Phase::AwaitingAttackTransfer;
                placements.render(&self.name)
            }
            GoPhase::AttackTransfer => {
                working.apply_placements(&self.placed);
                let movements = self.bot.attack_transfer(&context!(self), &mut working, budget);
                debug!("turn {}: {} movements", self.turn - 1, movements.len());
                self.phase = Phase::AwaitingPlacement;
                movements.render(&self.name)
            }
        }
    }
}

/// Answer a malformed snapshot payload and keep the previous state.
///
/// Errors naming ids the map does not know stay fatal.
fn reject_data(err: MapError) -> Result<Option<String>, AgentError> {
    if !err.is_malformed() {
        return Err(err.into());
    }
    let err = ProtocolError::InvalidData(err);
    warn!("ignored payload: {err}");
    Ok(Some(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TerritoryId;
    use crate::strategy::{DEFAULT_DEADLINE, StrategyKind};
    use std::io::Cursor;

    fn agent(kind: StrategyKind) -> Agent {
        let bot = Bot::new(kind, 11, DEFAULT_DEADLINE);
        let mut agent = Agent::new(bot, WeightTable::degree());
        for line in [
            format!("setup_map super_regions {}", standard::SUPER_REGIONS),
            format!("setup_map regions {}", standard::REGIONS),
            format!("setup_map neighbors {}", standard::NEIGHBORS),
            "settings your_bot player1".to_string(),
            "settings opponent_bot player2".to_string(),
        ] {
            assert_eq!(agent.handle_line(&line).unwrap(), None);
        }
        agent
    }

    #[test]
    fn test_setup_builds_standard_map() {
        let agent = agent(StrategyKind::Aggressive);
        assert_eq!(agent.map().territory_count(), 42);
        assert_eq!(agent.name(), "player1");
        assert_eq!(agent.opponents(), ["player2".to_string()]);
        assert_eq!(agent.phase(), Phase::AwaitingSetup);
    }

    #[test]
    fn test_protocol_errors_are_answered() {
        let mut agent = agent(StrategyKind::Random);
        assert_eq!(
            agent.handle_line("dance 1 2").unwrap().as_deref(),
            Some("Unknown command: dance")
        );
        assert_eq!(
            agent.handle_line("settings timebank 10000").unwrap().as_deref(),
            Some("Unknown sub command: timebank")
        );
        assert_eq!(agent.handle_line("   ").unwrap(), None);
    }

    #[test]
    fn test_map_errors_are_fatal() {
        let mut agent = agent(StrategyKind::Random);
        let err = agent.handle_line("update_map 99 player1 2").unwrap_err();
        assert!(matches!(
            err,
            AgentError::Map(MapError::UnknownTerritory(TerritoryId(99)))
        ));
    }

    #[test]
    fn test_malformed_snapshot_is_answered_and_ignored() {
        let mut agent = agent(StrategyKind::Aggressive);
        agent.handle_line("update_map 41 player1 3").unwrap();

        assert_eq!(
            agent.handle_line("update_map 41 player1 lots").unwrap().as_deref(),
            Some("Invalid data: invalid number \"lots\" in update_map")
        );
        assert_eq!(agent.map().territory(TerritoryId(41)).unwrap().troops, 3);

        assert_eq!(
            agent
                .handle_line("opponent_moves player2 place_armies 3 many")
                .unwrap()
                .as_deref(),
            Some("Invalid data: invalid number \"many\" in opponent_moves")
        );
        let answer = agent
            .handle_line("opponent_moves player2 retreat 3 4")
            .unwrap()
            .unwrap();
        assert_eq!(answer, "Invalid data: unknown opponent move \"retreat\"");
        let answer = agent.handle_line("update_map 41 player1").unwrap().unwrap();
        assert!(answer.starts_with("Invalid data: update_map expects records of 3"));
    }

    #[test]
    fn test_pick_starting_answers_six() {
        let mut agent = agent(StrategyKind::Defensive);
        let response = agent
            .handle_line("pick_starting_regions 10000 3 2 10 12 20 17 24 25 31 36 42 39")
            .unwrap()
            .unwrap();
        assert_eq!(response, "42 39 10 25 3 2");
        assert_eq!(agent.phase(), Phase::AwaitingPlacement);
    }

    #[test]
    fn test_attack_sees_this_turns_placements() {
        let mut agent = agent(StrategyKind::Aggressive);
        agent.handle_line("settings starting_armies 5").unwrap();
        agent.handle_line("update_map 41 player1 1 39 player2 1").unwrap();

        let placed = agent.handle_line("go place_armies 2000").unwrap().unwrap();
        assert_eq!(placed, "player1 place_armies 41 5");
        assert_eq!(agent.turn(), 2);
        assert_eq!(agent.phase(), Phase::AwaitingAttackTransfer);

        let moved = agent.handle_line("go attack/transfer 2000").unwrap().unwrap();
        assert_eq!(moved, "player1 attack/transfer 41 39 5");
        assert_eq!(agent.phase(), Phase::AwaitingPlacement);
        // The host's snapshot is untouched.
        assert_eq!(agent.map().territory(TerritoryId(41)).unwrap().troops, 1);
    }

    #[test]
    fn test_no_moves_when_nothing_owned() {
        let mut agent = agent(StrategyKind::Defensive);
        agent.handle_line("update_map 1 player2 4").unwrap();
        assert_eq!(
            agent.handle_line("go place_armies 2000").unwrap().as_deref(),
            Some("No moves")
        );
        assert_eq!(
            agent.handle_line("go attack/transfer 2000").unwrap().as_deref(),
            Some("No moves")
        );
    }

    #[test]
    fn test_run_writes_one_line_per_response() {
        let mut agent = agent(StrategyKind::Random);
        let input = Cursor::new(
            "\nsettings starting_armies 5\nupdate_map 1 player1 2\ngo place_armies 2000\n\ndance\n",
        );
        let mut output = Vec::new();

        agent.run(input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "player1 place_armies 1 2, player1 place_armies 1 2, player1 place_armies 1 1",
                "Unknown command: dance",
            ]
        );
    }
}
