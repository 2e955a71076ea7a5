//! arena_core - Combat resolution and character progression
//!
//! This library provides:
//! - Character: hero/villain combatants with level-derived stats
//! - Duel resolution: alternating 1v1 turns with shield and ultimate mechanics
//! - Team battles: scripted and simulated front-line modes with continuation
//! - Progression: experience grants with multi-level carryover
//! - FightService: orchestration over pluggable character and fight stores

pub mod character;
pub mod combat;
pub mod config;
pub mod error;
pub mod progression;
pub mod service;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use character::Character;
pub use combat::{
    DuelReport, FightDetail, FightRecord, MemberHealth, RoundEntry, ScriptedRound, TeamOutcome,
    TeamReport, TurnEntry,
};
pub use config::{load_toml, parse_toml, CombatConstants, ConfigError};
pub use error::FightError;
pub use service::FightService;
pub use store::{CharacterRepository, FightStore, StoreError, StoreResult};
pub use types::{CharacterId, FightId, Kind, MoveKind, Side};
