//! The host's line protocol.
//!
//! Each line from the host is one command, tokenised on whitespace:
//!
//! ```text
//! setup_map super_regions 1 5 2 2
//! setup_map regions 1 1 2 1
//! setup_map neighbors 1 2,3 2 3
//! settings your_bot player1
//! settings opponent_bot player2
//! settings starting_armies 5
//! pick_starting_regions 10000 3 2 10 12 20 17
//! update_map 1 player1 2 2 neutral 2
//! opponent_moves player2 place_armies 3 5
//! go place_armies 2000
//! go attack/transfer 2000
//! ```
//!
//! [`parse`] turns the tokens into a [`Command`]. Map payloads are passed on
//! untouched; the map validates them.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ProtocolError;
use crate::map::TerritoryId;

const SETUP_MAP: &str = "setup_map";
const SETTINGS: &str = "settings";
const PICK_STARTING_REGIONS: &str = "pick_starting_regions";
const UPDATE_MAP: &str = "update_map";
const OPPONENT_MOVES: &str = "opponent_moves";
const GO: &str = "go";

/// Which part of the map a `setup_map` command defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSection {
    /// Groups and their bonuses.
    SuperRegions,
    /// Territories and their groups.
    Regions,
    /// Borders between territories.
    Neighbors,
}

/// A `settings` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting<'a> {
    /// Armies available for the coming placement.
    StartingArmies(u32),
    /// Our player name.
    YourBot(&'a str),
    /// An opponent's player name.
    OpponentBot(&'a str),
}

/// Which decision a `go` command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoPhase {
    /// Place this turn's armies.
    PlaceArmies,
    /// Attack and transfer.
    AttackTransfer,
}

/// One parsed host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Define part of the map.
    SetupMap {
        /// The part being defined.
        section: MapSection,
        /// Raw payload tokens.
        data: &'a [&'a str],
    },
    /// Change a setting.
    Settings(Setting<'a>),
    /// Choose starting territories.
    PickStartingRegions {
        /// Time allowed for the answer.
        budget: Duration,
        /// Territories on offer.
        candidates: Vec<TerritoryId>,
    },
    /// Replace the visible snapshot.
    UpdateMap(&'a [&'a str]),
    /// Record what opponents did last turn.
    OpponentMoves(&'a [&'a str]),
    /// Make a decision.
    Go {
        /// The decision asked for.
        phase: GoPhase,
        /// Time allowed for the answer.
        budget: Duration,
    },
}

/// Parse one tokenised line.
///
/// # Errors
///
/// Returns the [`ProtocolError`] whose display form should be sent back to
/// the host.
pub fn parse<'a>(tokens: &'a [&'a str]) -> Result<Command<'a>, ProtocolError> {
    let Some((&name, args)) = tokens.split_first() else {
        return Err(ProtocolError::MissingArgument("command"));
    };

    match name {
        SETUP_MAP => {
            let (sub, data) = sub_command(SETUP_MAP, args)?;
            let section = match sub {
                "super_regions" => MapSection::SuperRegions,
                "regions" => MapSection::Regions,
                "neighbors" => MapSection::Neighbors,
                other => return Err(ProtocolError::UnknownSubCommand(other.to_string())),
            };
            Ok(Command::SetupMap { section, data })
        }
        SETTINGS => {
            let (sub, rest) = sub_command(SETTINGS, args)?;
            let setting = match sub {
                "starting_armies" => {
                    let armies = first("starting_armies", rest)?;
                    Setting::StartingArmies(number("starting_armies", armies)?)
                }
                "your_bot" => Setting::YourBot(first("your_bot", rest)?),
                "opponent_bot" => Setting::OpponentBot(first("opponent_bot", rest)?),
                other => return Err(ProtocolError::UnknownSubCommand(other.to_string())),
            };
            Ok(Command::Settings(setting))
        }
        PICK_STARTING_REGIONS => {
            let (&time, ids) = args
                .split_first()
                .ok_or(ProtocolError::MissingArgument(PICK_STARTING_REGIONS))?;
            let budget = millis(PICK_STARTING_REGIONS, time)?;
            let candidates = ids
                .iter()
                .map(|id| number(PICK_STARTING_REGIONS, id))
                .collect::<Result<Vec<TerritoryId>, _>>()?;
            Ok(Command::PickStartingRegions { budget, candidates })
        }
        UPDATE_MAP => Ok(Command::UpdateMap(args)),
        OPPONENT_MOVES => Ok(Command::OpponentMoves(args)),
        GO => {
            let (sub, rest) = sub_command(GO, args)?;
            let phase = match sub {
                "place_armies" => GoPhase::PlaceArmies,
                "attack/transfer" => GoPhase::AttackTransfer,
                other => return Err(ProtocolError::UnknownSubCommand(other.to_string())),
            };
            let budget = millis(GO, first(GO, rest)?)?;
            Ok(Command::Go { phase, budget })
        }
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

fn sub_command<'a>(
    command: &'static str,
    args: &'a [&'a str],
) -> Result<(&'a str, &'a [&'a str]), ProtocolError> {
    args.split_first()
        .map(|(&sub, rest)| (sub, rest))
        .ok_or(ProtocolError::MissingArgument(command))
}

fn first<'a>(command: &'static str, args: &[&'a str]) -> Result<&'a str, ProtocolError> {
    args.first()
        .copied()
        .ok_or(ProtocolError::MissingArgument(command))
}

fn number<T: FromStr>(command: &'static str, token: &str) -> Result<T, ProtocolError> {
    token.parse().map_err(|_| ProtocolError::InvalidNumber {
        command,
        token: token.to_string(),
    })
}

fn millis(command: &'static str, token: &str) -> Result<Duration, ProtocolError> {
    number(command, token).map(Duration::from_millis)
}
