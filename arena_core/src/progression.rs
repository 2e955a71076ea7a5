//! Experience grants and level-ups applied after a fight concludes

use crate::character::{Character, MAX_LEVEL, ULTIMATE_THRESHOLD_GROWTH};

/// Experience consumed by one level-up
pub const XP_PER_LEVEL: u32 = 100;

/// Grant experience, carrying overflow across level-ups
///
/// A single grant can raise several levels: 100 experience is consumed per
/// level-up and the remainder carries forward. At level 10 experience is
/// pinned to 100 and gains stop, whether the cap was already reached or is
/// hit partway through this grant.
pub fn grant_experience(character: &mut Character, amount: u32) {
    if character.level >= MAX_LEVEL {
        character.experience = XP_PER_LEVEL;
        return;
    }
    character.experience += amount;
    while character.experience >= XP_PER_LEVEL && character.level < MAX_LEVEL {
        character.experience -= XP_PER_LEVEL;
        level_up(character);
    }
    if character.level >= MAX_LEVEL {
        character.experience = XP_PER_LEVEL;
    }
}

/// Raise the character one level and recompute the derived stats
///
/// Max health, current health, and shield follow the new level; the
/// ultimate threshold is scaled by 1.1 and rounded, so it only ever grows.
/// A no-op at level 10.
pub fn level_up(character: &mut Character) {
    if character.level >= MAX_LEVEL {
        return;
    }
    character.level += 1;
    character.shield = Character::shield_for(character.level);
    character.max_health = Character::max_health_for(character.level);
    character.health = character.max_health;
    character.ultimate_threshold =
        (character.ultimate_threshold * ULTIMATE_THRESHOLD_GROWTH).round();
}
