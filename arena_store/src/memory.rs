//! In-memory repositories for tests and local runs

use arena_core::character::Character;
use arena_core::combat::{FightDetail, FightRecord};
use arena_core::store::{CharacterRepository, FightStore, StoreError, StoreResult};
use arena_core::types::{CharacterId, FightId};
use std::sync::RwLock;

/// In-memory implementation of `CharacterRepository`
pub struct InMemoryCharacterRepository {
    characters: RwLock<Vec<Character>>,
}

impl InMemoryCharacterRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        InMemoryCharacterRepository {
            characters: RwLock::new(Vec::new()),
        }
    }

    /// Create a repository seeded with existing characters
    ///
    /// The seeds keep the ids they carry; `add` continues from the highest.
    pub fn with_characters(characters: Vec<Character>) -> Self {
        InMemoryCharacterRepository {
            characters: RwLock::new(characters),
        }
    }
}

impl Default for InMemoryCharacterRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterRepository for InMemoryCharacterRepository {
    fn list(&self) -> StoreResult<Vec<Character>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(characters.clone())
    }

    fn get(&self, id: CharacterId) -> StoreResult<Option<Character>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(characters.iter().find(|c| c.id == id).cloned())
    }

    fn add(&self, mut character: Character) -> StoreResult<Character> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        character.id = next_character_id(&characters);
        characters.push(character.clone());
        Ok(character)
    }

    fn update(&self, character: &Character) -> StoreResult<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let slot = characters
            .iter_mut()
            .find(|c| c.id == character.id)
            .ok_or(StoreError::MissingRecord(character.id.0))?;
        *slot = character.clone();
        Ok(())
    }

    fn remove(&self, id: CharacterId) -> StoreResult<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let before = characters.len();
        characters.retain(|c| c.id != id);
        if characters.len() == before {
            return Err(StoreError::MissingRecord(id.0));
        }
        Ok(())
    }

    fn replace_all(&self, replacement: &[Character]) -> StoreResult<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        *characters = replacement.to_vec();
        Ok(())
    }
}

/// In-memory implementation of `FightStore`
pub struct InMemoryFightStore {
    fights: RwLock<Vec<FightRecord>>,
}

impl InMemoryFightStore {
    /// Create a new empty store
    pub fn new() -> Self {
        InMemoryFightStore {
            fights: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryFightStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FightStore for InMemoryFightStore {
    fn list(&self) -> StoreResult<Vec<FightRecord>> {
        let fights = self.fights.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(fights.clone())
    }

    fn get(&self, id: FightId) -> StoreResult<Option<FightRecord>> {
        let fights = self.fights.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(fights.iter().find(|f| f.id == id).cloned())
    }

    fn add(&self, detail: FightDetail) -> StoreResult<FightRecord> {
        let mut fights = self.fights.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = FightRecord {
            id: next_fight_id(&fights),
            detail,
        };
        fights.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: &FightRecord) -> StoreResult<()> {
        let mut fights = self.fights.write().map_err(|_| StoreError::LockPoisoned)?;
        let slot = fights
            .iter_mut()
            .find(|f| f.id == record.id)
            .ok_or(StoreError::MissingRecord(record.id.0))?;
        *slot = record.clone();
        Ok(())
    }

    fn remove(&self, id: FightId) -> StoreResult<()> {
        let mut fights = self.fights.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = fights.len();
        fights.retain(|f| f.id != id);
        if fights.len() == before {
            return Err(StoreError::MissingRecord(id.0));
        }
        Ok(())
    }
}

pub(crate) fn next_character_id(characters: &[Character]) -> CharacterId {
    CharacterId(characters.iter().map(|c| c.id.0).max().unwrap_or(0) + 1)
}

pub(crate) fn next_fight_id(fights: &[FightRecord]) -> FightId {
    FightId(fights.iter().map(|f| f.id.0).max().unwrap_or(0) + 1)
}
