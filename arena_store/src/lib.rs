//! arena_store - Persistence backends for arena_core
//!
//! This library provides:
//! - InMemoryCharacterRepository / InMemoryFightStore: RwLock-backed stores
//!   for tests and local runs
//! - JsonCharacterRepository / JsonFightStore: flat JSON files with atomic
//!   temp-file-rename writes

pub mod file;
pub mod memory;

// Re-export the backends for convenience
pub use file::{JsonCharacterRepository, JsonFightStore};
pub use memory::{InMemoryCharacterRepository, InMemoryFightStore};
