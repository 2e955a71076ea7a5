//! Core identifier and enum types shared across the crate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier for a persisted character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a stored fight record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FightId(pub u64);

impl fmt::Display for FightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a character fights as a hero or a villain
///
/// A valid matchup always pits one kind against the other; two characters
/// of the same kind never fight each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Hero,
    Villain,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Hero => write!(f, "hero"),
            Kind::Villain => write!(f, "villain"),
        }
    }
}

/// Which team an attacker in a team battle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    TeamA,
    TeamB,
}

impl Side {
    /// The opposing side
    pub fn other(self) -> Side {
        match self {
            Side::TeamA => Side::TeamB,
            Side::TeamB => Side::TeamA,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::TeamA => write!(f, "Team A"),
            Side::TeamB => write!(f, "Team B"),
        }
    }
}

/// Raised when a scripted round names an attacker side that does not exist
#[derive(Debug, Error)]
#[error("unrecognized attacker side: '{0}'")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "team_a" => Ok(Side::TeamA),
            "b" | "team_b" => Ok(Side::TeamB),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// The move an attacker throws in a single exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Basic,
    Special,
    Critical,
    Ultimate,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Basic => write!(f, "basic attack"),
            MoveKind::Special => write!(f, "special attack"),
            MoveKind::Critical => write!(f, "critical attack"),
            MoveKind::Ultimate => write!(f, "ultimate"),
        }
    }
}

/// Raised when a scripted round names a move the engine does not know
#[derive(Debug, Error)]
#[error("unrecognized move: '{0}'")]
pub struct ParseMoveError(pub String);

impl FromStr for MoveKind {
    type Err = ParseMoveError;

    /// Scripted rounds may only name the three flat-damage moves; the
    /// ultimate is never available in scripted mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(MoveKind::Basic),
            "special" => Ok(MoveKind::Special),
            "critical" => Ok(MoveKind::Critical),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}
