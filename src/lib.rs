// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Warlight: a game agent for the Warlight territorial-conquest line protocol.
//!
//! The host streams the map, settings and per-turn snapshots over stdin; the
//! agent answers starting picks, army placements and attacks over stdout.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Agent (protocol state machine)    │
//! ├─────────────────────────────────────┤
//! │   Strategies: random / aggressive   │
//! │               / defensive           │
//! ├─────────────────────────────────────┤
//! │   Map · weights · sorter · combat   │
//! └─────────────────────────────────────┘
//! ```

pub mod agent;
pub mod combat;
pub mod config;
pub mod error;
pub mod map;
pub mod moves;
pub mod protocol;
pub mod sorter;
pub mod strategy;
pub mod weights;

pub use agent::{Agent, Phase};
pub use config::AgentConfig;
pub use error::{AgentError, ConfigError, MapError, ProtocolError};

// Re-export key map and decision types at crate root for convenience
pub use map::{GroupId, Map, Territory, TerritoryId, Working};
pub use moves::{Movements, Placements};
pub use strategy::{Bot, Context, Strategy, StrategyKind};
pub use weights::{WeightTable, WeightsKind};
