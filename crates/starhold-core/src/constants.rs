//! Simulation constants and tuning parameters.
//!
//! Values here are fixed game rules. Anything a host may override lives in
//! [`crate::config::GameConfig`] instead.

// --- Player ---

/// Player ship speed (px/s).
pub const PLAYER_SPEED: f32 = 180.0;

/// Minimum time between player shots (seconds).
pub const PLAYER_FIRE_INTERVAL_SECS: f64 = 0.25;

/// Player bullet speed (px/s).
pub const PLAYER_BULLET_SPEED: f32 = 600.0;

/// Player bullet damage.
pub const PLAYER_BULLET_DAMAGE: i32 = 12;

/// Sprite rotation offset: ship art points up, aim angle 0 points right.
pub const SHIP_FACING_OFFSET: f32 = std::f32::consts::FRAC_PI_2;

// --- Bullets ---

/// Time-to-live for every bullet (seconds).
pub const BULLET_TTL_SECS: f64 = 2.0;

// --- Turrets ---

/// Turret targeting range (px).
pub const TURRET_RANGE: f32 = 160.0;

/// Minimum time between turret shots (seconds).
pub const TURRET_FIRE_INTERVAL_SECS: f64 = 0.9;

/// Turret bullet damage.
pub const TURRET_DAMAGE: i32 = 18;

/// Turret bullet speed (px/s).
pub const TURRET_BULLET_SPEED: f32 = 420.0;

// --- Enemies ---

pub const ENEMY_BASE_HP: f32 = 40.0;
pub const ENEMY_BASE_CONTACT_DAMAGE: f32 = 12.0;
pub const ENEMY_BASE_SPEED: f32 = 40.0;
pub const ENEMY_BASE_LOOT: f32 = 12.0;

/// Hit point multiplier of the `health` wave upgrade.
pub const UPGRADE_HEALTH_FACTOR: f32 = 1.25;

/// Speed multiplier of the `speed` wave upgrade.
pub const UPGRADE_SPEED_FACTOR: f32 = 1.3;

/// Contact damage multiplier of the `firerate` wave upgrade.
pub const UPGRADE_FIRERATE_DAMAGE_FACTOR: f32 = 1.0;

/// Damage an enemy deals to a wall when it rams it.
pub const ENEMY_WALL_CONTACT_DAMAGE: i32 = 30;

// --- Waves ---

/// Enemy count = max(WAVE_MIN_ENEMIES, floor(WAVE_BASE_ENEMIES + wave * WAVE_ENEMIES_PER_WAVE * spawn)).
pub const WAVE_BASE_ENEMIES: f32 = 4.0;
pub const WAVE_ENEMIES_PER_WAVE: f32 = 1.25;
pub const WAVE_MIN_ENEMIES: u32 = 3;

/// Inset from the arena edge for enemy spawn points (px).
pub const SPAWN_EDGE_MARGIN: f32 = 40.0;

/// Countdown display refresh cadence (seconds).
pub const COUNTDOWN_POLL_SECS: f64 = 0.9;

// --- Structures ---

pub const WALL_MAX_HP: i32 = 100;

/// Hit points restored by a repair.
pub const WALL_REPAIR_AMOUNT: i32 = 25;

/// A repair heals the nearest wall strictly closer than this (px).
pub const WALL_REPAIR_REACH: f32 = 60.0;

// --- Placement ---

/// Placement is rejected within this distance of any arena edge (px).
pub const PLACEMENT_EDGE_MARGIN: f32 = 30.0;

/// Placement is rejected closer than this to the player (px).
pub const PLACEMENT_PLAYER_CLEARANCE: f32 = 60.0;

/// Placement is rejected closer than this to an existing wall (px).
pub const PLACEMENT_WALL_SPACING: f32 = 40.0;

// --- Asteroids ---

/// Passive asteroid roll cadence (seconds).
pub const ASTEROID_POLL_INTERVAL_SECS: f64 = 2.5;

/// Inset from the arena edge for random asteroid positions (px).
pub const ASTEROID_SPAWN_MARGIN: f32 = 50.0;

pub const ASTEROID_SMALL_HP: i32 = 2;
pub const ASTEROID_SMALL_DROP: (u32, u32) = (1, 5);
pub const ASTEROID_MEDIUM_HP: i32 = 6;
pub const ASTEROID_MEDIUM_DROP: (u32, u32) = (10, 20);
pub const ASTEROID_LARGE_HP: i32 = 12;
pub const ASTEROID_LARGE_DROP: (u32, u32) = (25, 36);

// --- Gems ---

/// Gems can be collected for this long after they drop (seconds).
pub const GEM_PICKUP_WINDOW_SECS: f64 = 10.0;

// --- Session ---

/// Delay between the fatal hull hit and the full reset (seconds).
pub const DEATH_RESET_DELAY_SECS: f64 = 0.9;

// --- Collision radii (px) ---

pub const PLAYER_RADIUS: f32 = 28.0;
pub const ENEMY_RADIUS: f32 = 14.0;
pub const ASTEROID_RADIUS: f32 = 14.0;
pub const BULLET_RADIUS: f32 = 4.0;
pub const WALL_RADIUS: f32 = 24.0;
pub const TURRET_RADIUS: f32 = 14.0;
pub const GEM_RADIUS: f32 = 8.0;
