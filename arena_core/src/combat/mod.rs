//! Combat resolution - duels and team battles

mod duel;
mod result;
mod team;

pub use duel::{resolve_duel, resolve_duel_with_rng, DuelResolution};
pub use result::{
    DuelReport, FightDetail, FightRecord, MemberHealth, RoundEntry, TeamOutcome, TeamReport,
    TurnEntry,
};
pub use team::{
    apply_scripted_rounds, run_simulated_rounds, ScriptedRound, TeamBattleState, TeamRoster,
};
