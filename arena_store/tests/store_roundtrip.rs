//! File-backend behavior against the repository contracts

use arena_core::character::Character;
use arena_core::combat::{FightDetail, TeamOutcome};
use arena_core::store::{CharacterRepository, FightStore, StoreError};
use arena_core::types::{CharacterId, FightId, Kind};
use arena_store::{JsonCharacterRepository, JsonFightStore};
use tempfile::TempDir;

#[test]
fn characters_survive_a_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("characters.json");

    let repo = JsonCharacterRepository::new(&path).unwrap();
    let mut hero = Character::new("Blaze", Kind::Hero);
    hero.city = Some("Meridian".to_string());
    let hero = repo.add(hero).unwrap();
    repo.add(Character::new("Venom", Kind::Villain)).unwrap();
    drop(repo);

    let reopened = JsonCharacterRepository::new(&path).unwrap();
    let all = reopened.list().unwrap();
    assert_eq!(all.len(), 2);
    let loaded = reopened.get(hero.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Blaze");
    assert_eq!(loaded.city.as_deref(), Some("Meridian"));
    assert_eq!(loaded.kind, Kind::Hero);
}

#[test]
fn add_assigns_max_plus_one() {
    let dir = TempDir::new().unwrap();
    let repo = JsonCharacterRepository::new(dir.path().join("characters.json")).unwrap();

    let a = repo.add(Character::new("First", Kind::Hero)).unwrap();
    let b = repo.add(Character::new("Second", Kind::Villain)).unwrap();
    assert_eq!(a.id, CharacterId(1));
    assert_eq!(b.id, CharacterId(2));

    repo.remove(a.id).unwrap();
    let c = repo.add(Character::new("Third", Kind::Hero)).unwrap();
    assert_eq!(c.id, CharacterId(3));
}

#[test]
fn update_overwrites_and_rejects_missing() {
    let dir = TempDir::new().unwrap();
    let repo = JsonCharacterRepository::new(dir.path().join("characters.json")).unwrap();

    let mut hero = repo.add(Character::new("Blaze", Kind::Hero)).unwrap();
    hero.experience = 40;
    repo.update(&hero).unwrap();
    assert_eq!(repo.get(hero.id).unwrap().unwrap().experience, 40);

    let mut orphan = Character::new("Orphan", Kind::Villain);
    orphan.id = CharacterId(42);
    assert!(matches!(
        repo.update(&orphan),
        Err(StoreError::MissingRecord(42))
    ));
}

#[test]
fn replace_all_rewrites_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("characters.json");
    let repo = JsonCharacterRepository::new(&path).unwrap();
    repo.add(Character::new("Old", Kind::Hero)).unwrap();

    let mut replacement = Character::new("New", Kind::Villain);
    replacement.id = CharacterId(7);
    repo.replace_all(std::slice::from_ref(&replacement)).unwrap();

    let reopened = JsonCharacterRepository::new(&path).unwrap();
    let all = reopened.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, CharacterId(7));
}

#[test]
fn fight_store_assigns_monotonic_ids_and_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fights.json");
    let store = JsonFightStore::new(&path).unwrap();

    let team_detail = || FightDetail::Team {
        team_a: "Alphas".to_string(),
        team_b: "Omegas".to_string(),
        outcome: TeamOutcome::Inconclusive,
        rounds: Vec::new(),
    };
    let first = store.add(team_detail()).unwrap();
    let second = store.add(team_detail()).unwrap();
    assert_eq!(first.id, FightId(1));
    assert_eq!(second.id, FightId(2));

    let reopened = JsonFightStore::new(&path).unwrap();
    assert_eq!(reopened.list().unwrap().len(), 2);
    assert!(reopened.get(FightId(2)).unwrap().is_some());
    assert!(reopened.get(FightId(3)).unwrap().is_none());

    reopened.remove(FightId(1)).unwrap();
    assert!(matches!(
        reopened.remove(FightId(1)),
        Err(StoreError::MissingRecord(1))
    ));
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("data").join("deep").join("characters.json");
    let repo = JsonCharacterRepository::new(&nested).unwrap();
    repo.add(Character::new("Blaze", Kind::Hero)).unwrap();
    assert!(nested.exists());
}
