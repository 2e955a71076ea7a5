//! Character - a persisted combatant and its level-derived combat stats

use crate::types::{CharacterId, Kind};
use serde::{Deserialize, Serialize};

/// Levels run from 1 to 10 inclusive
pub const MAX_LEVEL: u32 = 10;

/// Health at level 1
pub const BASE_HEALTH: f64 = 100.0;

/// Extra max health per level past the first
pub const HEALTH_PER_LEVEL: f64 = 5.0;

/// Extra shield percent per level past the first
pub const SHIELD_PER_LEVEL: u32 = 5;

/// Ultimate charge required at level 1
pub const BASE_ULTIMATE_THRESHOLD: f64 = 150.0;

/// Threshold growth factor applied (and rounded) on every level-up
pub const ULTIMATE_THRESHOLD_GROWTH: f64 = 1.1;

/// Critical strike multiplier applied to the rolled base damage
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// A hero or villain with progression stats
///
/// All derived stats (`shield`, `max_health`, damage values) follow from
/// `level`. The repository owns persisted identity; the combat engine only
/// ever mutates value copies of this struct and commits the post-fight
/// fields back explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub city: Option<String>,
    pub kind: Kind,
    pub team: Option<String>,
    pub level: u32,
    pub experience: u32,
    /// Mitigation percent against non-ultimate damage: `(level-1)*5`
    pub shield: u32,
    pub max_health: f64,
    pub health: f64,
    /// Damage dealt since the last ultimate use
    pub ultimate_charge: f64,
    /// Charge required to unlock the ultimate; grows on every level-up
    pub ultimate_threshold: f64,
    pub ultimate_ready: bool,
}

impl Character {
    /// Create a fresh level-1 character
    ///
    /// The id is a placeholder until the repository assigns one on `add`.
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self::at_level(name, kind, 1)
    }

    /// Create a character at a given level with all derived stats computed
    ///
    /// The level is clamped to [1, 10]. The ultimate threshold is the
    /// iteratively rounded growth from the level-1 base, matching what a
    /// character levelled up one step at a time would carry.
    pub fn at_level(name: impl Into<String>, kind: Kind, level: u32) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let mut threshold = BASE_ULTIMATE_THRESHOLD;
        for _ in 1..level {
            threshold = (threshold * ULTIMATE_THRESHOLD_GROWTH).round();
        }
        let max_health = Self::max_health_for(level);
        Character {
            id: CharacterId(0),
            name: name.into(),
            city: None,
            kind,
            team: None,
            level,
            experience: 0,
            shield: Self::shield_for(level),
            max_health,
            health: max_health,
            ultimate_charge: 0.0,
            ultimate_threshold: threshold,
            ultimate_ready: false,
        }
    }

    /// Max health for a level: `100 + (level-1)*5`
    pub fn max_health_for(level: u32) -> f64 {
        BASE_HEALTH + f64::from(level - 1) * HEALTH_PER_LEVEL
    }

    /// Shield percent for a level: `(level-1)*5`
    pub fn shield_for(level: u32) -> u32 {
        (level - 1) * SHIELD_PER_LEVEL
    }

    /// Basic attack damage: `5 + (level-1)*1`
    pub fn basic_attack_damage(&self) -> f64 {
        5.0 + f64::from(self.level - 1)
    }

    /// Special attack damage: `30 + (level-1)*10`
    pub fn special_attack_damage(&self) -> f64 {
        30.0 + f64::from(self.level - 1) * 10.0
    }

    /// Critical attack damage: the rolled base amplified by 1.5, rounded
    pub fn critical_attack_damage(&self, base: f64) -> f64 {
        (base * CRIT_MULTIPLIER).round()
    }

    /// Ultimate attack damage: `80 + (level-1)*10`
    pub fn ultimate_attack_damage(&self) -> f64 {
        80.0 + f64::from(self.level - 1) * 10.0
    }

    /// Apply incoming damage
    ///
    /// Non-ultimate damage is reduced by the shield percentage before it
    /// reaches health; ultimate damage bypasses the shield entirely. Health
    /// never drops below 0. Returns the amount actually subtracted.
    pub fn receive_damage(&mut self, amount: f64, is_ultimate: bool) -> f64 {
        let inflicted = if !is_ultimate && self.shield > 0 {
            amount - amount * f64::from(self.shield) / 100.0
        } else {
            amount
        };
        self.health = (self.health - inflicted).max(0.0);
        inflicted
    }

    /// Credit damage dealt towards the ultimate gauge
    ///
    /// At max level with the gauge already at the threshold the charge is
    /// frozen; there is no further level-up left to raise the threshold.
    pub fn accumulate_ultimate_charge(&mut self, dealt: f64) {
        if self.level >= MAX_LEVEL && self.ultimate_charge >= self.ultimate_threshold {
            return;
        }
        self.ultimate_charge += dealt;
        if self.ultimate_charge >= self.ultimate_threshold {
            self.ultimate_ready = true;
        }
    }

    /// Spend the ultimate if it is ready
    ///
    /// Resets the gauge and returns the ultimate's damage, or returns 0
    /// without touching any state when the ultimate is unavailable.
    pub fn consume_ultimate(&mut self) -> f64 {
        if !self.ultimate_ready {
            return 0.0;
        }
        self.ultimate_charge = 0.0;
        self.ultimate_ready = false;
        self.ultimate_attack_damage()
    }

    /// Whether this character can still fight
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Restore health to the level-derived maximum
    pub fn reset_health(&mut self) {
        self.health = self.max_health;
    }
}
