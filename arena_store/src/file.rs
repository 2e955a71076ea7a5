//! JSON-file repositories
//!
//! Each repository owns one JSON file holding the full record list. Writes
//! serialize the whole list to a temp file and atomically rename it over
//! the original, so readers never observe a partial write. An internal
//! mutex serializes the read-modify-write cycles of a single process.

use crate::memory::{next_character_id, next_fight_id};
use arena_core::character::Character;
use arena_core::combat::{FightDetail, FightRecord};
use arena_core::store::{CharacterRepository, FightStore, StoreError, StoreResult};
use arena_core::types::{CharacterId, FightId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn read_list<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn write_list<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    let json =
        serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialization(e.to_string()))?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn prepare(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        fs::write(path, "[]")?;
    }
    Ok(())
}

/// File-based implementation of `CharacterRepository`
///
/// Characters are stored as one pretty-printed JSON array.
pub struct JsonCharacterRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonCharacterRepository {
    /// Open (or create) the character file at `path`
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        prepare(&path)?;
        Ok(JsonCharacterRepository {
            path,
            lock: Mutex::new(()),
        })
    }

    fn read(&self) -> StoreResult<Vec<Character>> {
        read_list(&self.path)
    }

    fn write(&self, characters: &[Character]) -> StoreResult<()> {
        write_list(&self.path, characters)?;
        tracing::debug!(
            "Saved {} characters to {}",
            characters.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl CharacterRepository for JsonCharacterRepository {
    fn list(&self) -> StoreResult<Vec<Character>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.read()
    }

    fn get(&self, id: CharacterId) -> StoreResult<Option<Character>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(self.read()?.into_iter().find(|c| c.id == id))
    }

    fn add(&self, mut character: Character) -> StoreResult<Character> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut characters = self.read()?;
        character.id = next_character_id(&characters);
        characters.push(character.clone());
        self.write(&characters)?;
        Ok(character)
    }

    fn update(&self, character: &Character) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut characters = self.read()?;
        let slot = characters
            .iter_mut()
            .find(|c| c.id == character.id)
            .ok_or(StoreError::MissingRecord(character.id.0))?;
        *slot = character.clone();
        self.write(&characters)
    }

    fn remove(&self, id: CharacterId) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut characters = self.read()?;
        let before = characters.len();
        characters.retain(|c| c.id != id);
        if characters.len() == before {
            return Err(StoreError::MissingRecord(id.0));
        }
        self.write(&characters)
    }

    fn replace_all(&self, replacement: &[Character]) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.write(replacement)
    }
}

/// File-based implementation of `FightStore`
pub struct JsonFightStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFightStore {
    /// Open (or create) the fight file at `path`
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        prepare(&path)?;
        Ok(JsonFightStore {
            path,
            lock: Mutex::new(()),
        })
    }

    fn read(&self) -> StoreResult<Vec<FightRecord>> {
        read_list(&self.path)
    }

    fn write(&self, fights: &[FightRecord]) -> StoreResult<()> {
        write_list(&self.path, fights)?;
        tracing::debug!("Saved {} fights to {}", fights.len(), self.path.display());
        Ok(())
    }
}

impl FightStore for JsonFightStore {
    fn list(&self) -> StoreResult<Vec<FightRecord>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.read()
    }

    fn get(&self, id: FightId) -> StoreResult<Option<FightRecord>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(self.read()?.into_iter().find(|f| f.id == id))
    }

    fn add(&self, detail: FightDetail) -> StoreResult<FightRecord> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut fights = self.read()?;
        let record = FightRecord {
            id: next_fight_id(&fights),
            detail,
        };
        fights.push(record.clone());
        self.write(&fights)?;
        Ok(record)
    }

    fn update(&self, record: &FightRecord) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut fights = self.read()?;
        let slot = fights
            .iter_mut()
            .find(|f| f.id == record.id)
            .ok_or(StoreError::MissingRecord(record.id.0))?;
        *slot = record.clone();
        self.write(&fights)
    }

    fn remove(&self, id: FightId) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut fights = self.read()?;
        let before = fights.len();
        fights.retain(|f| f.id != id);
        if fights.len() == before {
            return Err(StoreError::MissingRecord(id.0));
        }
        self.write(&fights)
    }
}
