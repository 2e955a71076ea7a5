//! Fight logs, outcomes, and the persisted fight record

use crate::types::{CharacterId, FightId, MoveKind, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One attack in a 1v1 duel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEntry {
    /// 1-based turn number
    pub turn: u32,
    pub attacker: String,
    pub defender: String,
    pub attack: MoveKind,
    /// Raw attack damage before shield mitigation
    pub damage: f64,
    pub defender_health_before: f64,
    pub defender_health_after: f64,
    pub message: String,
}

impl TurnEntry {
    pub fn new(
        turn: u32,
        attacker: &str,
        defender: &str,
        attack: MoveKind,
        damage: f64,
        before: f64,
        after: f64,
    ) -> Self {
        let message = format!(
            "Turn {turn}: {attacker} uses {attack} on {defender} for {damage:.2} ({before:.2} -> {after:.2})"
        );
        TurnEntry {
            turn,
            attacker: attacker.to_string(),
            defender: defender.to_string(),
            attack,
            damage,
            defender_health_before: before,
            defender_health_after: after,
            message,
        }
    }
}

/// Health snapshot of one living team member after an exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberHealth {
    pub name: String,
    pub health: f64,
}

/// One exchange in a team battle
///
/// Snapshots cover all members still alive after the exchange, in roster
/// order; continuation rebuilds the front line from the latest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEntry {
    /// 1-based round number, contiguous across continuations
    pub round: u32,
    pub attacker_side: Side,
    pub attacker: String,
    pub defender: String,
    pub attack: MoveKind,
    pub damage: f64,
    pub defender_health_before: f64,
    pub defender_health_after: f64,
    pub team_a: Vec<MemberHealth>,
    pub team_b: Vec<MemberHealth>,
    pub message: String,
}

/// Result of a team battle so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamOutcome {
    TeamAWins,
    TeamBWins,
    /// The supplied rounds ran out before either roster was exhausted
    Inconclusive,
}

impl TeamOutcome {
    /// Whether the battle is over
    pub fn is_concluded(&self) -> bool {
        !matches!(self, TeamOutcome::Inconclusive)
    }
}

impl fmt::Display for TeamOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamOutcome::TeamAWins => write!(f, "Team A wins"),
            TeamOutcome::TeamBWins => write!(f, "Team B wins"),
            TeamOutcome::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

/// The persisted shape of a fight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FightDetail {
    Duel {
        participant_a: CharacterId,
        participant_b: CharacterId,
        winner: CharacterId,
        turns: Vec<TurnEntry>,
    },
    Team {
        team_a: String,
        team_b: String,
        outcome: TeamOutcome,
        rounds: Vec<RoundEntry>,
    },
}

/// A stored fight, identified by its store-assigned id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FightRecord {
    pub id: FightId,
    pub detail: FightDetail,
}

/// Outcome of a resolved 1v1 duel, after progression write-back
#[derive(Debug, Clone)]
pub struct DuelReport {
    pub fight_id: FightId,
    /// Winner as persisted after experience rewards
    pub winner: crate::character::Character,
    /// Loser as persisted after experience rewards
    pub loser: crate::character::Character,
    pub turns: Vec<TurnEntry>,
}

impl DuelReport {
    /// One-line human summary of the duel
    pub fn summary(&self) -> String {
        format!(
            "{} defeats {} in {} turns (now level {}, {} xp)",
            self.winner.name,
            self.loser.name,
            self.turns.len(),
            self.winner.level,
            self.winner.experience,
        )
    }
}

/// Outcome of a team-battle request, covering the full stored history
#[derive(Debug, Clone)]
pub struct TeamReport {
    pub fight_id: FightId,
    pub team_a: String,
    pub team_b: String,
    pub outcome: TeamOutcome,
    pub rounds: Vec<RoundEntry>,
}

impl TeamReport {
    /// One-line human summary of the battle so far
    pub fn summary(&self) -> String {
        format!(
            "{} vs {}: {} after {} rounds",
            self.team_a,
            self.team_b,
            self.outcome,
            self.rounds.len(),
        )
    }
}
