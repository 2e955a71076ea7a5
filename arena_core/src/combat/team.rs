//! Team battles - front-line exchanges with elimination and continuation
//!
//! Two entry modes share the same state and record shape: scripted rounds
//! supplied by the caller (flat damage, no shield or ultimate), and fully
//! simulated front-runner duels using the 1v1 protocol. Either can be
//! resumed from a stored round history.

use crate::character::Character;
use crate::combat::duel::roll_move;
use crate::combat::result::{MemberHealth, RoundEntry, TeamOutcome};
use crate::config::{CombatConstants, ScriptedConstants};
use crate::error::{FightError, Result};
use crate::types::{MoveKind, ParseMoveError, ParseSideError, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Externally supplied description of one scripted round
///
/// Both fields arrive as free text and are validated round by round:
/// `attacker` must name a side ("a"/"b"), `attack` one of the flat-damage
/// moves ("basic"/"special"/"critical").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedRound {
    pub attacker: String,
    pub attack: String,
}

impl ScriptedRound {
    pub fn new(attacker: impl Into<String>, attack: impl Into<String>) -> Self {
        ScriptedRound {
            attacker: attacker.into(),
            attack: attack.into(),
        }
    }
}

/// One team's ordered roster of living members
///
/// Index 0 is the front member, the only one eligible to fight. Eliminated
/// members are removed outright; an empty roster means the team lost.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    pub name: String,
    pub members: Vec<Character>,
}

impl TeamRoster {
    pub fn new(name: impl Into<String>, members: Vec<Character>) -> Self {
        TeamRoster {
            name: name.into(),
            members,
        }
    }

    /// The current front member, if any are left standing
    pub fn front(&self) -> Option<&Character> {
        self.members.first()
    }

    pub fn is_exhausted(&self) -> bool {
        self.members.is_empty()
    }

    fn snapshot(&self) -> Vec<MemberHealth> {
        self.members
            .iter()
            .map(|m| MemberHealth {
                name: m.name.clone(),
                health: m.health,
            })
            .collect()
    }
}

/// In-flight state of a team battle
///
/// Holds the full round history (stored rounds plus anything appended this
/// request) so a record update can rewrite it wholesale.
#[derive(Debug, Clone)]
pub struct TeamBattleState {
    pub team_a: TeamRoster,
    pub team_b: TeamRoster,
    /// Number the next appended round will carry
    pub next_round: u32,
    pub rounds: Vec<RoundEntry>,
}

impl TeamBattleState {
    /// Start a fresh battle; every member enters at full health
    pub fn new(mut team_a: TeamRoster, mut team_b: TeamRoster) -> Self {
        for member in team_a.members.iter_mut().chain(team_b.members.iter_mut()) {
            member.reset_health();
        }
        TeamBattleState {
            team_a,
            team_b,
            next_round: 1,
            rounds: Vec::new(),
        }
    }

    /// Rebuild battle state from a stored round history
    ///
    /// The rosters are reduced to the members present in the last recorded
    /// snapshot (everyone else was eliminated), carrying the recorded
    /// health values. An empty history behaves like a fresh battle.
    pub fn restore(history: &[RoundEntry], team_a: TeamRoster, team_b: TeamRoster) -> Self {
        let mut state = TeamBattleState::new(team_a, team_b);
        if let Some(last) = history.last() {
            apply_snapshot(&mut state.team_a, &last.team_a);
            apply_snapshot(&mut state.team_b, &last.team_b);
            state.next_round = last.round + 1;
        }
        state.rounds = history.to_vec();
        state
    }

    /// Outcome as of the rounds applied so far
    pub fn outcome(&self) -> TeamOutcome {
        if self.team_b.is_exhausted() {
            TeamOutcome::TeamAWins
        } else if self.team_a.is_exhausted() {
            TeamOutcome::TeamBWins
        } else {
            TeamOutcome::Inconclusive
        }
    }
}

fn apply_snapshot(roster: &mut TeamRoster, snapshot: &[MemberHealth]) {
    let mut rebuilt = Vec::with_capacity(snapshot.len());
    for entry in snapshot {
        if let Some(pos) = roster.members.iter().position(|m| m.name == entry.name) {
            let mut member = roster.members.remove(pos);
            member.health = entry.health;
            rebuilt.push(member);
        }
    }
    roster.members = rebuilt;
}

/// Apply externally scripted rounds to the battle
///
/// Flat damage per move, no shield or ultimate mechanics. Rounds past a
/// conclusion are ignored. A round naming an unknown side or move aborts
/// the remainder with `InvalidMoveSpec`; everything applied up to that
/// point stays applied.
pub fn apply_scripted_rounds(
    state: &mut TeamBattleState,
    rounds: &[ScriptedRound],
    constants: &ScriptedConstants,
) -> Result<TeamOutcome> {
    for spec in rounds {
        if state.outcome().is_concluded() {
            break;
        }
        let round = state.next_round;
        let side: Side = spec
            .attacker
            .parse()
            .map_err(|e: ParseSideError| FightError::InvalidMoveSpec {
                round,
                reason: e.to_string(),
            })?;
        let attack: MoveKind =
            spec.attack
                .parse()
                .map_err(|e: ParseMoveError| FightError::InvalidMoveSpec {
                    round,
                    reason: e.to_string(),
                })?;
        let damage = constants.damage_for(attack);

        let (att_roster, def_roster) = rosters_mut(state, side);
        let (Some(attacker), Some(defender)) =
            (att_roster.members.first(), def_roster.members.first_mut())
        else {
            break;
        };
        let attacker_name = attacker.name.clone();
        let defender_name = defender.name.clone();
        let before = defender.health;
        defender.health = (defender.health - damage).max(0.0);
        let after = defender.health;
        let eliminated = !defender.is_alive();
        if eliminated {
            def_roster.members.remove(0);
        }

        record_round(
            state,
            side,
            &attacker_name,
            &defender_name,
            attack,
            damage,
            before,
            after,
            eliminated,
        );
    }
    Ok(state.outcome())
}

/// Simulate front-runner duels until one roster is exhausted
///
/// Each duel follows the full 1v1 protocol (shield, ultimate charge,
/// probabilistic moves) at the fronts' current health; every exchange is
/// recorded as one round. The duel's loser is eliminated and the next
/// front steps up.
pub fn run_simulated_rounds(
    state: &mut TeamBattleState,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> TeamOutcome {
    while !state.outcome().is_concluded() {
        duel_front_members(state, constants, rng);
    }
    state.outcome()
}

/// One duel between the current front members, to elimination
fn duel_front_members(state: &mut TeamBattleState, constants: &CombatConstants, rng: &mut impl Rng) {
    let mut side = if rng.gen_bool(0.5) {
        Side::TeamA
    } else {
        Side::TeamB
    };
    loop {
        let (att_roster, def_roster) = rosters_mut(state, side);
        let (Some(attacker), Some(defender)) = (
            att_roster.members.first_mut(),
            def_roster.members.first_mut(),
        ) else {
            return;
        };

        let (attack, damage) = if attacker.ultimate_ready {
            (MoveKind::Ultimate, attacker.consume_ultimate())
        } else {
            roll_move(attacker, &constants.moves, rng)
        };
        let attacker_name = attacker.name.clone();
        let defender_name = defender.name.clone();
        let before = defender.health;
        defender.receive_damage(damage, attack == MoveKind::Ultimate);
        attacker.accumulate_ultimate_charge(damage);
        let after = defender.health;
        let eliminated = !defender.is_alive();
        if eliminated {
            def_roster.members.remove(0);
        }

        record_round(
            state,
            side,
            &attacker_name,
            &defender_name,
            attack,
            damage,
            before,
            after,
            eliminated,
        );

        if eliminated {
            return;
        }
        side = side.other();
    }
}

fn rosters_mut(state: &mut TeamBattleState, attacker_side: Side) -> (&mut TeamRoster, &mut TeamRoster) {
    match attacker_side {
        Side::TeamA => (&mut state.team_a, &mut state.team_b),
        Side::TeamB => (&mut state.team_b, &mut state.team_a),
    }
}

#[allow(clippy::too_many_arguments)]
fn record_round(
    state: &mut TeamBattleState,
    side: Side,
    attacker: &str,
    defender: &str,
    attack: MoveKind,
    damage: f64,
    before: f64,
    after: f64,
    eliminated: bool,
) {
    let round = state.next_round;
    let mut message = format!(
        "Round {round}: {attacker} ({side}) uses {attack} on {defender} for {damage:.2} ({before:.2} -> {after:.2})"
    );
    if eliminated {
        message.push_str(&format!(" - {defender} is out"));
    }
    state.rounds.push(RoundEntry {
        round,
        attacker_side: side,
        attacker: attacker.to_string(),
        defender: defender.to_string(),
        attack,
        damage,
        defender_health_before: before,
        defender_health_after: after,
        team_a: state.team_a.snapshot(),
        team_b: state.team_b.snapshot(),
        message,
    });
    state.next_round += 1;
}
