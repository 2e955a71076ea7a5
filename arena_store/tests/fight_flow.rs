//! End-to-end fight flows through the service over in-memory stores

use arena_core::character::Character;
use arena_core::combat::{FightDetail, ScriptedRound, TeamOutcome};
use arena_core::error::FightError;
use arena_core::store::{CharacterRepository, FightStore};
use arena_core::types::{CharacterId, FightId, Kind};
use arena_core::FightService;
use arena_store::{InMemoryCharacterRepository, InMemoryFightStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn service_with_duelists() -> FightService<InMemoryCharacterRepository, InMemoryFightStore> {
    let characters = InMemoryCharacterRepository::new();
    characters.add(Character::new("Blaze", Kind::Hero)).unwrap();
    characters.add(Character::new("Venom", Kind::Villain)).unwrap();
    FightService::new(characters, InMemoryFightStore::new())
}

fn service_with_teams() -> FightService<InMemoryCharacterRepository, InMemoryFightStore> {
    let characters = InMemoryCharacterRepository::new();
    for i in 1..=3 {
        let mut hero = Character::new(format!("Alpha{i}"), Kind::Hero);
        hero.team = Some("Alphas".to_string());
        characters.add(hero).unwrap();
    }
    for i in 1..=3 {
        let mut villain = Character::new(format!("Omega{i}"), Kind::Villain);
        villain.team = Some("Omegas".to_string());
        characters.add(villain).unwrap();
    }
    FightService::new(characters, InMemoryFightStore::new())
}

#[test]
fn duel_applies_rewards_and_stores_the_record() {
    let service = service_with_duelists();
    let mut rng = StdRng::seed_from_u64(1);
    let report = service
        .duel_with_rng(CharacterId(1), CharacterId(2), &mut rng)
        .unwrap();

    // Level-1 rewards: 40 xp to the winner, 25 to the loser, no level-up yet
    assert_eq!(report.winner.experience, 40);
    assert_eq!(report.loser.experience, 25);
    assert!(!report.turns.is_empty());

    let persisted_winner = service
        .characters()
        .get(report.winner.id)
        .unwrap()
        .unwrap();
    assert_eq!(persisted_winner.experience, 40);
    assert!((persisted_winner.health - persisted_winner.max_health).abs() < f64::EPSILON);

    let record = service.fights().get(report.fight_id).unwrap().unwrap();
    let FightDetail::Duel { winner, turns, .. } = record.detail else {
        panic!("expected a duel record");
    };
    assert_eq!(winner, report.winner.id);
    assert_eq!(turns.len(), report.turns.len());
}

#[test]
fn repeated_duels_level_characters_up() {
    let service = service_with_duelists();
    // 5 duels hand out at least 5 * 25 xp to each side; someone crosses 100
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        service
            .duel_with_rng(CharacterId(1), CharacterId(2), &mut rng)
            .unwrap();
    }
    let hero = service.characters().get(CharacterId(1)).unwrap().unwrap();
    let villain = service.characters().get(CharacterId(2)).unwrap().unwrap();
    assert!(hero.level >= 2 || villain.level >= 2);
    assert_eq!(hero.shield, (hero.level - 1) * 5);
    assert_eq!(villain.shield, (villain.level - 1) * 5);
}

#[test]
fn duel_rejects_same_kind_and_unknown_ids() {
    let characters = InMemoryCharacterRepository::new();
    characters.add(Character::new("Blaze", Kind::Hero)).unwrap();
    characters.add(Character::new("Nova", Kind::Hero)).unwrap();
    let service = FightService::new(characters, InMemoryFightStore::new());

    let mut rng = StdRng::seed_from_u64(2);
    assert!(matches!(
        service.duel_with_rng(CharacterId(1), CharacterId(2), &mut rng),
        Err(FightError::InvalidMatchup(Kind::Hero))
    ));
    assert!(matches!(
        service.duel_with_rng(CharacterId(1), CharacterId(9), &mut rng),
        Err(FightError::CharacterNotFound(CharacterId(9)))
    ));
    // Nothing was simulated or stored
    assert!(service.fights().list().unwrap().is_empty());
}

#[test]
fn scripted_battle_concludes_and_restores_health() {
    let service = service_with_teams();
    let rounds: Vec<_> = (0..9).map(|_| ScriptedRound::new("a", "critical")).collect();
    let report = service
        .team_battle_scripted("Alphas", "Omegas", &rounds)
        .unwrap();

    assert_eq!(report.outcome, TeamOutcome::TeamAWins);
    assert_eq!(report.rounds.len(), 9);

    // Conclusion resets every participant's persisted health
    for character in service.characters().list().unwrap() {
        assert!((character.health - character.max_health).abs() < f64::EPSILON);
    }

    let record = service.fights().get(report.fight_id).unwrap().unwrap();
    let FightDetail::Team { outcome, .. } = record.detail else {
        panic!("expected a team record");
    };
    assert_eq!(outcome, TeamOutcome::TeamAWins);
}

#[test]
fn scripted_battle_persists_partial_rounds_on_bad_spec() {
    let service = service_with_teams();
    let rounds = vec![
        ScriptedRound::new("a", "special"),
        ScriptedRound::new("a", "uppercut"),
    ];
    let err = service
        .team_battle_scripted("Alphas", "Omegas", &rounds)
        .unwrap_err();
    assert!(matches!(err, FightError::InvalidMoveSpec { round: 2, .. }));

    // The record exists and carries the one applied round
    let records = service.fights().list().unwrap();
    assert_eq!(records.len(), 1);
    let FightDetail::Team { rounds, outcome, .. } = records[0].detail.clone() else {
        panic!("expected a team record");
    };
    assert_eq!(rounds.len(), 1);
    assert_eq!(outcome, TeamOutcome::Inconclusive);
}

#[test]
fn continuation_extends_round_numbering() {
    let service = service_with_teams();
    let opening = vec![
        ScriptedRound::new("a", "special"),
        ScriptedRound::new("b", "special"),
    ];
    let report = service
        .team_battle_scripted("Alphas", "Omegas", &opening)
        .unwrap();
    assert_eq!(report.outcome, TeamOutcome::Inconclusive);

    let more = vec![
        ScriptedRound::new("a", "basic"),
        ScriptedRound::new("a", "critical"),
    ];
    let resumed = service.continue_scripted(report.fight_id, &more).unwrap();
    let numbers: Vec<u32> = resumed.rounds.iter().map(|r| r.round).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    // Damage carried over: 30 + 5 + 45 against the same front villain
    let front = resumed
        .rounds
        .last()
        .unwrap();
    assert!((front.defender_health_after - 20.0).abs() < f64::EPSILON);

    let record = service.fights().get(report.fight_id).unwrap().unwrap();
    let FightDetail::Team { rounds, .. } = record.detail else {
        panic!("expected a team record");
    };
    assert_eq!(rounds.len(), 4);
}

#[test]
fn simulated_continuation_concludes_a_scripted_opening() {
    let service = service_with_teams();
    let opening = vec![ScriptedRound::new("a", "special")];
    let report = service
        .team_battle_scripted("Alphas", "Omegas", &opening)
        .unwrap();

    let mut rng = StdRng::seed_from_u64(9);
    let resumed = service
        .continue_simulated_with_rng(report.fight_id, &mut rng)
        .unwrap();
    assert!(resumed.outcome.is_concluded());

    // Numbering stays contiguous across the mode switch
    for (i, entry) in resumed.rounds.iter().enumerate() {
        assert_eq!(entry.round, i as u32 + 1);
    }

    // A concluded fight cannot be continued again
    assert!(matches!(
        service.continue_scripted(report.fight_id, &[]),
        Err(FightError::AlreadyConcluded(id)) if id == report.fight_id
    ));
}

#[test]
fn simulated_team_battle_runs_to_conclusion() {
    let service = service_with_teams();
    let mut rng = StdRng::seed_from_u64(4);
    let report = service
        .team_battle_simulated_with_rng("Alphas", "Omegas", &mut rng)
        .unwrap();
    assert!(report.outcome.is_concluded());
    assert!(!report.rounds.is_empty());

    for character in service.characters().list().unwrap() {
        assert!((character.health - character.max_health).abs() < f64::EPSILON);
    }
}

#[test]
fn team_battles_validate_rosters_and_names() {
    let characters = InMemoryCharacterRepository::new();
    for i in 1..=2 {
        let mut hero = Character::new(format!("Alpha{i}"), Kind::Hero);
        hero.team = Some("Alphas".to_string());
        characters.add(hero).unwrap();
    }
    for i in 1..=3 {
        let mut villain = Character::new(format!("Omega{i}"), Kind::Villain);
        villain.team = Some("Omegas".to_string());
        characters.add(villain).unwrap();
    }
    let service = FightService::new(characters, InMemoryFightStore::new());

    assert!(matches!(
        service.team_battle_scripted("Alphas", "Omegas", &[]),
        Err(FightError::InvalidRoster { found: 2, .. })
    ));
    assert!(matches!(
        service.team_battle_scripted("Ghosts", "Omegas", &[]),
        Err(FightError::TeamNotFound(name)) if name == "Ghosts"
    ));
    assert!(matches!(
        service.continue_scripted(FightId(77), &[]),
        Err(FightError::FightNotFound(FightId(77)))
    ));
}
