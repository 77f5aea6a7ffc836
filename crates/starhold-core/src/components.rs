//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems and in
//! the `starhold-ai` decision functions, never on the entities themselves.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks the player's ship. Exactly one per session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Player ship handling and weapon timing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip {
    /// Movement speed (px/s).
    pub speed: f32,
    /// Minimum seconds between shots.
    pub fire_interval_secs: f64,
    /// Simulation time of the last shot (seconds).
    pub last_shot_secs: f64,
}

/// A hostile ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub hp: i32,
    /// Damage forwarded to the player's defenses on contact.
    pub contact_damage: i32,
    /// Movement speed (px/s).
    pub speed: f32,
    /// Gem value dropped on death.
    pub loot_value: u32,
    /// Wave upgrade this enemy spawned with, if any.
    pub upgrade: Option<WaveUpgrade>,
}

/// A minable asteroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    pub tier: AsteroidTier,
    pub hp: i32,
    /// Gem value dropped on destruction, rolled from the tier's range at spawn.
    pub drop_value: u32,
}

/// A player-built wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    /// 0..=WALL_MAX_HP. Destroyed at 0.
    pub hp: i32,
}

/// A player-built auto turret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Turret {
    pub range: f32,
    pub fire_interval_secs: f64,
    pub damage: i32,
    pub bullet_speed: f32,
    /// Simulation time of the last shot (seconds). Starts at 0.
    pub last_fire_secs: f64,
}

/// A projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub damage: i32,
}

/// Collectible loot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gem {
    pub value: u32,
    /// Cleared once the pickup window closes; the gem stays as decoration.
    pub pickup_enabled: bool,
}

/// Circle collider radius (px).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}

/// Sprite rotation in radians.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Facing {
    pub radians: f32,
}

/// Entities that cannot leave the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfinedToArena;

// Position and Velocity are defined in types.rs and used directly as components.
