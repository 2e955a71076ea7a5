//! Repository contracts consumed by fight resolution
//!
//! The engine reads and writes characters and fight records exclusively
//! through these traits. Backends live elsewhere (in-memory, JSON files);
//! the engine performs no retries and treats every failure as opaque.

use crate::character::Character;
use crate::combat::{FightDetail, FightRecord};
use crate::types::{CharacterId, FightId};
use thiserror::Error;

/// Errors surfaced by repository implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("no record with id {0}")]
    MissingRecord(u64),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read/write access to the persisted character roster
///
/// The repository is the sole owner of persisted identity: `add` assigns
/// the next id (max existing + 1) and returns the stored character.
pub trait CharacterRepository: Send + Sync {
    /// All persisted characters
    fn list(&self) -> StoreResult<Vec<Character>>;

    /// A character by id, if present
    fn get(&self, id: CharacterId) -> StoreResult<Option<Character>>;

    /// Persist a new character, assigning its id
    fn add(&self, character: Character) -> StoreResult<Character>;

    /// Overwrite an existing character record
    fn update(&self, character: &Character) -> StoreResult<()>;

    /// Delete a character by id
    fn remove(&self, id: CharacterId) -> StoreResult<()>;

    /// Bulk rewrite of the whole roster, used by battle-reset flows
    fn replace_all(&self, characters: &[Character]) -> StoreResult<()>;
}

/// Persistence for fight records
///
/// `add` assigns monotonically increasing fight ids; continuation flows
/// `get` a record, append rounds, and `update` it in place.
pub trait FightStore: Send + Sync {
    /// All stored fight records
    fn list(&self) -> StoreResult<Vec<FightRecord>>;

    /// A fight record by id, if present
    fn get(&self, id: FightId) -> StoreResult<Option<FightRecord>>;

    /// Store a new fight, assigning its id
    fn add(&self, detail: FightDetail) -> StoreResult<FightRecord>;

    /// Overwrite an existing fight record
    fn update(&self, record: &FightRecord) -> StoreResult<()>;

    /// Delete a fight record by id
    fn remove(&self, id: FightId) -> StoreResult<()>;
}
