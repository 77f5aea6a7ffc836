//! Stat profiles for spawned enemies and asteroids.
//!
//! Consolidates the base numbers, difficulty multipliers and wave upgrades
//! into the values an entity is spawned with.

use starhold_core::config::DifficultyMultipliers;
use starhold_core::constants::*;
use starhold_core::enums::{AsteroidTier, WaveUpgrade};

/// Spawn-time stats for one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub hp: i32,
    pub contact_damage: i32,
    pub speed: f32,
    pub loot_value: u32,
}

/// Compute enemy stats for the given wave upgrade and difficulty.
///
/// Only `health` and `speed` change numbers. `firerate` multiplies contact
/// damage by 1.0, and `armor`/`newtype` are carried as tags only.
pub fn enemy_profile(upgrade: Option<WaveUpgrade>, diff: &DifficultyMultipliers) -> EnemyProfile {
    let hp_factor = match upgrade {
        Some(WaveUpgrade::Health) => UPGRADE_HEALTH_FACTOR,
        _ => 1.0,
    };
    let damage_factor = match upgrade {
        Some(WaveUpgrade::Firerate) => UPGRADE_FIRERATE_DAMAGE_FACTOR,
        _ => 1.0,
    };
    let speed_factor = match upgrade {
        Some(WaveUpgrade::Speed) => UPGRADE_SPEED_FACTOR,
        _ => 1.0,
    };

    EnemyProfile {
        hp: (ENEMY_BASE_HP * diff.hp * hp_factor).round() as i32,
        contact_damage: (ENEMY_BASE_CONTACT_DAMAGE * diff.dmg * damage_factor).round() as i32,
        speed: ENEMY_BASE_SPEED * speed_factor,
        loot_value: (ENEMY_BASE_LOOT * diff.gems).round().max(0.0) as u32,
    }
}

/// Spawn-time stats for one asteroid tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsteroidProfile {
    pub hp: i32,
    /// Inclusive gem drop range.
    pub drop_min: u32,
    pub drop_max: u32,
}

pub fn asteroid_profile(tier: AsteroidTier) -> AsteroidProfile {
    let (hp, (drop_min, drop_max)) = match tier {
        AsteroidTier::Small => (ASTEROID_SMALL_HP, ASTEROID_SMALL_DROP),
        AsteroidTier::Medium => (ASTEROID_MEDIUM_HP, ASTEROID_MEDIUM_DROP),
        AsteroidTier::Large => (ASTEROID_LARGE_HP, ASTEROID_LARGE_DROP),
    };
    AsteroidProfile {
        hp,
        drop_min,
        drop_max,
    }
}
