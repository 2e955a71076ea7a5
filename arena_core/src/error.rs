//! Errors raised by fight resolution

use crate::store::StoreError;
use crate::types::{CharacterId, FightId, Kind};
use thiserror::Error;

/// Failure modes of fight resolution
///
/// `NotFound`-style and matchup errors reject a request before any
/// simulation runs and leave no state mutated. `InvalidMoveSpec` is the
/// one partial-application case: rounds applied before the faulty one keep
/// their side effects.
#[derive(Debug, Error)]
pub enum FightError {
    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),

    #[error("team '{0}' not found")]
    TeamNotFound(String),

    #[error("fight {0} not found")]
    FightNotFound(FightId),

    #[error("invalid matchup: both sides are {0}s")]
    InvalidMatchup(Kind),

    #[error("team '{name}' must field exactly 3 members of one kind, found {found}")]
    InvalidRoster { name: String, found: usize },

    #[error("invalid round {round}: {reason}")]
    InvalidMoveSpec { round: u32, reason: String },

    #[error("fight {0} is not a team battle")]
    NotATeamFight(FightId),

    #[error("fight {0} is already concluded")]
    AlreadyConcluded(FightId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, FightError>;
