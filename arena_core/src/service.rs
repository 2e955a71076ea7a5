//! Fight orchestration - load, validate, simulate, persist
//!
//! `FightService` ties the combat engine to the repositories: it loads
//! current character state, runs the simulation on value copies, applies
//! progression to the persisted records, and stores the fight for later
//! retrieval or continuation.

use crate::character::Character;
use crate::combat::{
    apply_scripted_rounds, resolve_duel_with_rng, run_simulated_rounds, DuelReport, FightDetail,
    FightRecord, ScriptedRound, TeamBattleState, TeamOutcome, TeamReport, TeamRoster,
};
use crate::config::CombatConstants;
use crate::error::{FightError, Result};
use crate::progression::grant_experience;
use crate::store::{CharacterRepository, FightStore};
use crate::types::{CharacterId, FightId};
use rand::Rng;

/// Team size every battle requires
const TEAM_SIZE: usize = 3;

/// Orchestrates fights over a character repository and a fight store
pub struct FightService<C, F> {
    characters: C,
    fights: F,
    constants: CombatConstants,
}

impl<C: CharacterRepository, F: FightStore> FightService<C, F> {
    pub fn new(characters: C, fights: F) -> Self {
        Self::with_constants(characters, fights, CombatConstants::default())
    }

    pub fn with_constants(characters: C, fights: F, constants: CombatConstants) -> Self {
        FightService {
            characters,
            fights,
            constants,
        }
    }

    /// Access to the underlying character repository
    pub fn characters(&self) -> &C {
        &self.characters
    }

    /// Access to the underlying fight store
    pub fn fights(&self) -> &F {
        &self.fights
    }

    /// Resolve a 1v1 duel between two characters
    pub fn duel(&self, a: CharacterId, b: CharacterId) -> Result<DuelReport> {
        self.duel_with_rng(a, b, &mut rand::thread_rng())
    }

    /// Resolve a duel with a provided RNG (for deterministic testing)
    ///
    /// The matchup must pair a hero with a villain. The duel runs on value
    /// copies; afterwards the winner and loser receive their experience
    /// rewards, both records are written back at full health, and the fight
    /// is stored.
    pub fn duel_with_rng(
        &self,
        a: CharacterId,
        b: CharacterId,
        rng: &mut impl Rng,
    ) -> Result<DuelReport> {
        let first = self.load_character(a)?;
        let second = self.load_character(b)?;
        if first.kind == second.kind {
            return Err(FightError::InvalidMatchup(first.kind));
        }

        let resolution = resolve_duel_with_rng(&first, &second, &self.constants, rng);
        let turns = resolution.turns;
        let won = resolution.winner == resolution.first.id;
        let (mut winner, mut loser) = if won {
            (resolution.first, resolution.second)
        } else {
            (resolution.second, resolution.first)
        };

        grant_experience(&mut winner, self.constants.rewards.winner_xp);
        grant_experience(&mut loser, self.constants.rewards.loser_xp);
        winner.reset_health();
        loser.reset_health();
        self.characters.update(&winner)?;
        self.characters.update(&loser)?;

        let record = self.fights.add(FightDetail::Duel {
            participant_a: a,
            participant_b: b,
            winner: winner.id,
            turns: turns.clone(),
        })?;

        Ok(DuelReport {
            fight_id: record.id,
            winner,
            loser,
            turns,
        })
    }

    /// Run a scripted team battle from the supplied rounds
    ///
    /// The fight record is persisted even when a round fails validation,
    /// so the rounds applied before the failure keep their effects.
    pub fn team_battle_scripted(
        &self,
        team_a: &str,
        team_b: &str,
        rounds: &[ScriptedRound],
    ) -> Result<TeamReport> {
        let (roster_a, roster_b) = self.load_matchup(team_a, team_b)?;
        let mut state = TeamBattleState::new(roster_a, roster_b);
        let applied = apply_scripted_rounds(&mut state, rounds, &self.constants.scripted);
        let outcome = state.outcome();

        let record = self.fights.add(FightDetail::Team {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            outcome,
            rounds: state.rounds.clone(),
        })?;
        if outcome.is_concluded() {
            self.restore_participants(team_a, team_b)?;
        }
        applied?;

        Ok(TeamReport {
            fight_id: record.id,
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            outcome,
            rounds: state.rounds,
        })
    }

    /// Run a team battle simulated to exhaustion
    pub fn team_battle_simulated(&self, team_a: &str, team_b: &str) -> Result<TeamReport> {
        self.team_battle_simulated_with_rng(team_a, team_b, &mut rand::thread_rng())
    }

    /// Simulated team battle with a provided RNG (for deterministic testing)
    pub fn team_battle_simulated_with_rng(
        &self,
        team_a: &str,
        team_b: &str,
        rng: &mut impl Rng,
    ) -> Result<TeamReport> {
        let (roster_a, roster_b) = self.load_matchup(team_a, team_b)?;
        let mut state = TeamBattleState::new(roster_a, roster_b);
        let outcome = run_simulated_rounds(&mut state, &self.constants, rng);

        let record = self.fights.add(FightDetail::Team {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            outcome,
            rounds: state.rounds.clone(),
        })?;
        self.restore_participants(team_a, team_b)?;

        Ok(TeamReport {
            fight_id: record.id,
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            outcome,
            rounds: state.rounds,
        })
    }

    /// Append scripted rounds to a stored, unconcluded team battle
    pub fn continue_scripted(&self, fight_id: FightId, rounds: &[ScriptedRound]) -> Result<TeamReport> {
        let (team_a, team_b, mut state) = self.load_continuation(fight_id)?;
        let applied = apply_scripted_rounds(&mut state, rounds, &self.constants.scripted);
        let outcome = state.outcome();
        self.store_continuation(fight_id, &team_a, &team_b, outcome, &state)?;
        applied?;

        Ok(TeamReport {
            fight_id,
            team_a,
            team_b,
            outcome,
            rounds: state.rounds,
        })
    }

    /// Simulate a stored, unconcluded team battle to exhaustion
    pub fn continue_simulated(&self, fight_id: FightId) -> Result<TeamReport> {
        self.continue_simulated_with_rng(fight_id, &mut rand::thread_rng())
    }

    /// Simulated continuation with a provided RNG (for deterministic testing)
    pub fn continue_simulated_with_rng(
        &self,
        fight_id: FightId,
        rng: &mut impl Rng,
    ) -> Result<TeamReport> {
        let (team_a, team_b, mut state) = self.load_continuation(fight_id)?;
        let outcome = run_simulated_rounds(&mut state, &self.constants, rng);
        self.store_continuation(fight_id, &team_a, &team_b, outcome, &state)?;

        Ok(TeamReport {
            fight_id,
            team_a,
            team_b,
            outcome,
            rounds: state.rounds,
        })
    }

    fn load_character(&self, id: CharacterId) -> Result<Character> {
        self.characters
            .get(id)?
            .ok_or(FightError::CharacterNotFound(id))
    }

    /// Load both rosters and validate the matchup before anything mutates
    fn load_matchup(&self, team_a: &str, team_b: &str) -> Result<(TeamRoster, TeamRoster)> {
        let roster_a = self.load_team(team_a)?;
        let roster_b = self.load_team(team_b)?;
        if roster_a.members[0].kind == roster_b.members[0].kind {
            return Err(FightError::InvalidMatchup(roster_a.members[0].kind));
        }
        Ok((roster_a, roster_b))
    }

    fn load_team(&self, name: &str) -> Result<TeamRoster> {
        let mut members: Vec<Character> = self
            .characters
            .list()?
            .into_iter()
            .filter(|c| c.team.as_deref() == Some(name))
            .collect();
        if members.is_empty() {
            return Err(FightError::TeamNotFound(name.to_string()));
        }
        members.sort_by_key(|c| c.id);
        let kind = members[0].kind;
        if members.len() != TEAM_SIZE || members.iter().any(|c| c.kind != kind) {
            return Err(FightError::InvalidRoster {
                name: name.to_string(),
                found: members.len(),
            });
        }
        Ok(TeamRoster::new(name, members))
    }

    fn load_continuation(&self, fight_id: FightId) -> Result<(String, String, TeamBattleState)> {
        let record = self
            .fights
            .get(fight_id)?
            .ok_or(FightError::FightNotFound(fight_id))?;
        let FightDetail::Team {
            team_a,
            team_b,
            outcome,
            rounds,
        } = record.detail
        else {
            return Err(FightError::NotATeamFight(fight_id));
        };
        if outcome.is_concluded() {
            return Err(FightError::AlreadyConcluded(fight_id));
        }
        let (roster_a, roster_b) = self.load_matchup(&team_a, &team_b)?;
        let state = TeamBattleState::restore(&rounds, roster_a, roster_b);
        Ok((team_a, team_b, state))
    }

    fn store_continuation(
        &self,
        fight_id: FightId,
        team_a: &str,
        team_b: &str,
        outcome: TeamOutcome,
        state: &TeamBattleState,
    ) -> Result<()> {
        let record = FightRecord {
            id: fight_id,
            detail: FightDetail::Team {
                team_a: team_a.to_string(),
                team_b: team_b.to_string(),
                outcome,
                rounds: state.rounds.clone(),
            },
        };
        self.fights.update(&record)?;
        if outcome.is_concluded() {
            self.restore_participants(team_a, team_b)?;
        }
        Ok(())
    }

    /// Reset every participant's persisted health to full after a battle
    ///
    /// Uses the bulk rewrite so the whole roster is committed in one pass.
    fn restore_participants(&self, team_a: &str, team_b: &str) -> Result<()> {
        let mut all = self.characters.list()?;
        for character in &mut all {
            let on_a = character.team.as_deref() == Some(team_a);
            let on_b = character.team.as_deref() == Some(team_b);
            if on_a || on_b {
                character.reset_health();
            }
        }
        self.characters.replace_all(&all)?;
        Ok(())
    }
}
