//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Global upgrade rolled on even-numbered waves and applied to every enemy
/// spawned in that wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveUpgrade {
    Speed,
    Health,
    /// Rolled like the others but scales contact damage by 1.0.
    Firerate,
    Armor,
    Newtype,
}

impl WaveUpgrade {
    /// Every upgrade, in roll order.
    pub const ALL: [WaveUpgrade; 5] = [
        WaveUpgrade::Speed,
        WaveUpgrade::Health,
        WaveUpgrade::Firerate,
        WaveUpgrade::Armor,
        WaveUpgrade::Newtype,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WaveUpgrade::Speed => "speed",
            WaveUpgrade::Health => "health",
            WaveUpgrade::Firerate => "firerate",
            WaveUpgrade::Armor => "armor",
            WaveUpgrade::Newtype => "newtype",
        }
    }
}

/// Asteroid size class. Each tier has fixed hit points and a drop-value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    Small,
    Medium,
    Large,
}

/// Who fired a bullet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    #[default]
    Player,
    Turret,
}

/// Items sold in the shop catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    Wall,
    Repair,
    Turret,
    ShipUpgrade,
    NewShip,
}

/// Named difficulty presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyProfile {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// What the renderer should draw for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    PlayerShip,
    Enemy,
    Asteroid(AsteroidTier),
    Wall,
    Turret,
    Bullet,
    Gem,
}

/// Why a structure placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementViolation {
    /// Point lies inside the arena edge margin.
    OutOfBounds,
    /// Point is inside the player exclusion radius.
    TooCloseToPlayer,
    /// Point is inside the spacing radius of an existing wall.
    TooCloseToWall,
    /// The live turret count already equals the cap.
    TurretCapReached,
}
