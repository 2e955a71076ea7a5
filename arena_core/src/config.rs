//! Tunable combat constants, loadable from TOML files

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::MoveKind;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Tunable combat constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub moves: MoveConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
    #[serde(default)]
    pub scripted: ScriptedConstants,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            moves: MoveConstants::default(),
            rewards: RewardConstants::default(),
            scripted: ScriptedConstants::default(),
        }
    }
}

impl CombatConstants {
    /// Check the cross-field constraints the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moves.crit_chance + self.moves.special_chance > 1.0 {
            return Err(ConfigError::ValidationError(
                "crit_chance + special_chance must not exceed 1.0".to_string(),
            ));
        }
        if self.rewards.winner_xp <= self.rewards.loser_xp {
            return Err(ConfigError::ValidationError(
                "winner_xp must exceed loser_xp".to_string(),
            ));
        }
        Ok(())
    }
}

/// Move-selection probabilities for the simulated turn loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveConstants {
    /// Probability of a critical attack (roll below this value)
    #[serde(default = "default_crit_chance")]
    pub crit_chance: f64,
    /// Probability of a special attack (roll in the next band)
    #[serde(default = "default_special_chance")]
    pub special_chance: f64,
}

impl Default for MoveConstants {
    fn default() -> Self {
        MoveConstants {
            crit_chance: 0.40,
            special_chance: 0.30,
        }
    }
}

fn default_crit_chance() -> f64 {
    0.40
}
fn default_special_chance() -> f64 {
    0.30
}

/// Experience granted after a duel resolves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConstants {
    #[serde(default = "default_winner_xp")]
    pub winner_xp: u32,
    #[serde(default = "default_loser_xp")]
    pub loser_xp: u32,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            winner_xp: 40,
            loser_xp: 25,
        }
    }
}

fn default_winner_xp() -> u32 {
    40
}
fn default_loser_xp() -> u32 {
    25
}

/// Flat damage per move in scripted team battles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedConstants {
    #[serde(default = "default_scripted_basic")]
    pub basic: f64,
    #[serde(default = "default_scripted_special")]
    pub special: f64,
    #[serde(default = "default_scripted_critical")]
    pub critical: f64,
}

impl ScriptedConstants {
    /// Flat damage for a scripted move
    ///
    /// The ultimate never appears in scripted rounds; it maps to 0 here and
    /// is rejected earlier by move parsing.
    pub fn damage_for(&self, attack: MoveKind) -> f64 {
        match attack {
            MoveKind::Basic => self.basic,
            MoveKind::Special => self.special,
            MoveKind::Critical => self.critical,
            MoveKind::Ultimate => 0.0,
        }
    }
}

impl Default for ScriptedConstants {
    fn default() -> Self {
        ScriptedConstants {
            basic: 5.0,
            special: 30.0,
            critical: 45.0,
        }
    }
}

fn default_scripted_basic() -> f64 {
    5.0
}
fn default_scripted_special() -> f64 {
    30.0
}
fn default_scripted_critical() -> f64 {
    45.0
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert!((constants.moves.crit_chance - 0.40).abs() < f64::EPSILON);
        assert!((constants.moves.special_chance - 0.30).abs() < f64::EPSILON);
        assert_eq!(constants.rewards.winner_xp, 40);
        assert_eq!(constants.rewards.loser_xp, 25);
        assert!((constants.scripted.critical - 45.0).abs() < f64::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[moves]
crit_chance = 0.25
special_chance = 0.35

[rewards]
winner_xp = 50
loser_xp = 20

[scripted]
basic = 5.0
special = 30.0
critical = 45.0
"#;

        let constants: CombatConstants = parse_toml(toml).unwrap();
        assert!((constants.moves.crit_chance - 0.25).abs() < f64::EPSILON);
        assert_eq!(constants.rewards.winner_xp, 50);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
[rewards]
winner_xp = 60
"#;
        let constants: CombatConstants = parse_toml(toml).unwrap();
        assert_eq!(constants.rewards.winner_xp, 60);
        assert_eq!(constants.rewards.loser_xp, 25);
        assert!((constants.moves.crit_chance - 0.40).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_rejects_inverted_rewards() {
        let mut constants = CombatConstants::default();
        constants.rewards.winner_xp = 10;
        assert!(constants.validate().is_err());
    }
}
