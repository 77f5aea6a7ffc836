//! Host-tunable configuration.
//!
//! Defaults reproduce the shipped game. A host may override any subset of
//! fields from a TOML document; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{ASTEROID_SPAWN_MARGIN, PLACEMENT_EDGE_MARGIN, SPAWN_EDGE_MARGIN};
use crate::enums::DifficultyProfile;
use crate::error::ConfigError;

/// Per-difficulty multipliers for enemy stats, spawn count and loot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMultipliers {
    pub hp: f32,
    pub dmg: f32,
    pub spawn: f32,
    pub gems: f32,
}

impl DifficultyProfile {
    pub fn multipliers(self) -> DifficultyMultipliers {
        match self {
            DifficultyProfile::Easy => DifficultyMultipliers {
                hp: 0.8,
                dmg: 0.8,
                spawn: 0.9,
                gems: 1.1,
            },
            DifficultyProfile::Medium => DifficultyMultipliers {
                hp: 1.0,
                dmg: 1.0,
                spawn: 1.0,
                gems: 1.0,
            },
            DifficultyProfile::Hard => DifficultyMultipliers {
                hp: 1.2,
                dmg: 1.25,
                spawn: 1.15,
                gems: 0.9,
            },
        }
    }
}

/// Odds (in percent, per asteroid poll) of each tier appearing.
///
/// One roll in 1..=100 is shared by all tiers: small spawns on the lowest
/// `small_pct` values, medium on the highest `medium_pct`, large on the
/// highest `large_pct`. Medium and large overlap, so the top roll spawns both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidRates {
    pub small_pct: u32,
    pub medium_pct: u32,
    pub large_pct: u32,
}

impl Default for AsteroidRates {
    fn default() -> Self {
        Self {
            small_pct: 30,
            medium_pct: 10,
            large_pct: 1,
        }
    }
}

/// Inclusive bounds (whole seconds) for the randomized wave interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveBounds {
    pub min_secs: u32,
    pub max_secs: u32,
}

/// Static game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub wave_bounds: WaveBounds,
    pub debug_wave_bounds: WaveBounds,
    /// Use `debug_wave_bounds` instead of `wave_bounds`.
    pub debug_short_waves: bool,
    pub starting_gems: u32,
    pub shield_max: f32,
    /// Shield regained per second once regeneration is allowed.
    pub shield_regen_per_sec: f32,
    /// Seconds without damage before the shield regenerates.
    pub shield_regen_delay_secs: f64,
    pub hull_hits: u32,
    pub asteroid_rates: AsteroidRates,
    pub turret_cap: u32,
    pub difficulty: DifficultyProfile,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 1280.0,
            arena_height: 720.0,
            wave_bounds: WaveBounds {
                min_secs: 300,
                max_secs: 600,
            },
            debug_wave_bounds: WaveBounds {
                min_secs: 15,
                max_secs: 30,
            },
            debug_short_waves: false,
            starting_gems: 50,
            shield_max: 100.0,
            shield_regen_per_sec: 6.0,
            shield_regen_delay_secs: 3.0,
            hull_hits: 2,
            asteroid_rates: AsteroidRates::default(),
            turret_cap: 8,
            difficulty: DifficultyProfile::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML override document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Every random spawn range must stay non-empty.
        let min_extent = 2.0
            * PLACEMENT_EDGE_MARGIN
                .max(SPAWN_EDGE_MARGIN)
                .max(ASTEROID_SPAWN_MARGIN);
        if self.arena_width <= min_extent || self.arena_height <= min_extent {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} is smaller than the edge margins allow",
                self.arena_width, self.arena_height
            )));
        }
        for (name, bounds) in [
            ("wave_bounds", self.wave_bounds),
            ("debug_wave_bounds", self.debug_wave_bounds),
        ] {
            if bounds.min_secs == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name}: min_secs must be at least 1"
                )));
            }
            if bounds.min_secs > bounds.max_secs {
                return Err(ConfigError::Invalid(format!(
                    "{name}: min_secs {} exceeds max_secs {}",
                    bounds.min_secs, bounds.max_secs
                )));
            }
        }
        if self.shield_max <= 0.0 || self.shield_regen_per_sec < 0.0 {
            return Err(ConfigError::Invalid(
                "shield_max must be positive and regen non-negative".into(),
            ));
        }
        if self.hull_hits == 0 {
            return Err(ConfigError::Invalid("hull_hits must be at least 1".into()));
        }
        let rates = self.asteroid_rates;
        if rates.small_pct > 100 || rates.medium_pct > 100 || rates.large_pct > 100 {
            return Err(ConfigError::Invalid(
                "asteroid_rates are percentages in 0..=100".into(),
            ));
        }
        Ok(())
    }

    /// Wave interval bounds currently in effect.
    pub fn active_wave_bounds(&self) -> WaveBounds {
        if self.debug_short_waves {
            self.debug_wave_bounds
        } else {
            self.wave_bounds
        }
    }
}
