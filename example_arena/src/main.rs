//! Example Arena - a minimal demo wiring arena_core to the JSON file store
//!
//! This demo shows:
//! - Seeding a roster of heroes and villains into a file-backed repository
//! - Running a 1v1 duel with experience rewards and a persisted fight record
//! - Running a scripted team battle and finishing it with a simulated
//!   continuation

use arena_core::character::Character;
use arena_core::store::CharacterRepository;
use arena_core::types::{CharacterId, Kind};
use arena_core::{load_toml, CombatConstants, FightService, ScriptedRound};
use arena_store::{JsonCharacterRepository, JsonFightStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let characters = JsonCharacterRepository::new("data/characters.json")?;
    let fights = JsonFightStore::new("data/fights.json")?;
    seed_roster(&characters)?;

    // Optional tunables next to the data files
    let constants_path = Path::new("data/constants.toml");
    let constants: CombatConstants = if constants_path.exists() {
        load_toml(constants_path)?
    } else {
        CombatConstants::default()
    };
    constants.validate()?;
    let service = FightService::with_constants(characters, fights, constants);

    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    println!("== Duel ==");
    let report = service.duel_with_rng(CharacterId(1), CharacterId(4), &mut rng)?;
    for turn in &report.turns {
        println!("{}", turn.message);
    }
    println!("{}", report.summary());

    println!();
    println!("== Scripted team battle ==");
    let rounds = vec![
        ScriptedRound::new("a", "critical"),
        ScriptedRound::new("b", "special"),
        ScriptedRound::new("a", "critical"),
        ScriptedRound::new("a", "critical"),
    ];
    let opening = service.team_battle_scripted("Alphas", "Omegas", &rounds)?;
    for round in &opening.rounds {
        println!("{}", round.message);
    }
    println!("{}", opening.summary());

    println!();
    println!("== Simulated continuation ==");
    let resumed = service.continue_simulated_with_rng(opening.fight_id, &mut rng)?;
    for round in resumed.rounds.iter().skip(opening.rounds.len()) {
        println!("{}", round.message);
    }
    println!("{}", resumed.summary());

    Ok(())
}

/// Seed three heroes and three villains on first run
fn seed_roster(characters: &JsonCharacterRepository) -> Result<(), Box<dyn std::error::Error>> {
    if !characters.list()?.is_empty() {
        return Ok(());
    }
    let roster = [
        ("Blaze", Kind::Hero, Some("Meridian"), Some("Alphas")),
        ("Gale", Kind::Hero, Some("Meridian"), Some("Alphas")),
        ("Quill", Kind::Hero, None, Some("Alphas")),
        ("Venom", Kind::Villain, Some("Blackspire"), Some("Omegas")),
        ("Rictus", Kind::Villain, None, Some("Omegas")),
        ("Mordent", Kind::Villain, Some("Blackspire"), Some("Omegas")),
    ];
    for (name, kind, city, team) in roster {
        let mut character = Character::new(name, kind);
        character.city = city.map(str::to_string);
        character.team = team.map(str::to_string);
        characters.add(character)?;
    }
    Ok(())
}
