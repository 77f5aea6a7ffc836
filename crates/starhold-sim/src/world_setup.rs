//! Entity spawn factories.
//!
//! Each function spawns one entity with its full component bundle. Timers
//! that belong to an entity (bullet lifetime, gem pickup window) are armed by
//! the caller, which owns the scheduler.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhold_ai::profiles::{asteroid_profile, EnemyProfile};
use starhold_ai::waves::random_arena_point;
use starhold_core::components::*;
use starhold_core::config::GameConfig;
use starhold_core::constants::*;
use starhold_core::enums::*;
use starhold_core::types::{Position, Velocity};

/// Arena centre, where the player starts every run.
pub fn arena_center(config: &GameConfig) -> Position {
    Position::new(config.arena_width / 2.0, config.arena_height / 2.0)
}

pub fn spawn_player(world: &mut World, config: &GameConfig) -> Entity {
    world.spawn((
        Player,
        arena_center(config),
        Velocity::default(),
        Facing::default(),
        default_ship(),
        Collider {
            radius: PLAYER_RADIUS,
        },
        ConfinedToArena,
    ))
}

/// Put the player back at the centre, stopped, with stock handling.
pub fn reset_player(world: &mut World, config: &GameConfig) {
    let center = arena_center(config);
    for (_entity, (_player, pos, vel, ship)) in
        world.query_mut::<(&Player, &mut Position, &mut Velocity, &mut PlayerShip)>()
    {
        *pos = center;
        *vel = Velocity::default();
        *ship = default_ship();
    }
}

fn default_ship() -> PlayerShip {
    PlayerShip {
        speed: PLAYER_SPEED,
        fire_interval_secs: PLAYER_FIRE_INTERVAL_SECS,
        // Ready to fire on the first tick.
        last_shot_secs: -PLAYER_FIRE_INTERVAL_SECS,
    }
}

pub fn spawn_enemy(
    world: &mut World,
    position: Position,
    profile: EnemyProfile,
    upgrade: Option<WaveUpgrade>,
) -> Entity {
    world.spawn((
        Enemy {
            hp: profile.hp,
            contact_damage: profile.contact_damage,
            speed: profile.speed,
            loot_value: profile.loot_value,
            upgrade,
        },
        position,
        Velocity::default(),
        Collider {
            radius: ENEMY_RADIUS,
        },
        ConfinedToArena,
    ))
}

/// Spawn an asteroid of `tier`, rolling its drop value from the tier's range.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tier: AsteroidTier,
    position: Position,
) -> Entity {
    let profile = asteroid_profile(tier);
    let drop_value = rng.gen_range(profile.drop_min..=profile.drop_max);
    world.spawn((
        Asteroid {
            tier,
            hp: profile.hp,
            drop_value,
        },
        position,
        Collider {
            radius: ASTEROID_RADIUS,
        },
    ))
}

/// Spawn an asteroid at a random point away from the arena edges.
pub fn spawn_random_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    tier: AsteroidTier,
) -> Entity {
    let position = random_arena_point(
        rng,
        config.arena_width,
        config.arena_height,
        ASTEROID_SPAWN_MARGIN,
    );
    spawn_asteroid(world, rng, tier, position)
}

/// The three asteroids present before the first run starts.
pub fn spawn_backdrop_asteroids(world: &mut World, rng: &mut ChaCha8Rng) {
    spawn_asteroid(world, rng, AsteroidTier::Medium, Position::new(150.0, 120.0));
    spawn_asteroid(world, rng, AsteroidTier::Small, Position::new(400.0, 80.0));
    spawn_asteroid(world, rng, AsteroidTier::Large, Position::new(900.0, 200.0));
}

/// Asteroids seeded at the start of every run: four small, one medium, one large.
pub fn seed_run_asteroids(world: &mut World, rng: &mut ChaCha8Rng, config: &GameConfig) {
    for _ in 0..4 {
        spawn_random_asteroid(world, rng, config, AsteroidTier::Small);
    }
    spawn_random_asteroid(world, rng, config, AsteroidTier::Medium);
    spawn_random_asteroid(world, rng, config, AsteroidTier::Large);
}

pub fn spawn_wall(world: &mut World, position: Position) -> Entity {
    world.spawn((
        Wall { hp: WALL_MAX_HP },
        position,
        Collider {
            radius: WALL_RADIUS,
        },
    ))
}

pub fn spawn_turret(world: &mut World, position: Position) -> Entity {
    world.spawn((
        Turret {
            range: TURRET_RANGE,
            fire_interval_secs: TURRET_FIRE_INTERVAL_SECS,
            damage: TURRET_DAMAGE,
            bullet_speed: TURRET_BULLET_SPEED,
            last_fire_secs: 0.0,
        },
        position,
        Collider {
            radius: TURRET_RADIUS,
        },
    ))
}

/// Spawn a bullet travelling along `angle` radians.
pub fn spawn_bullet(
    world: &mut World,
    owner: BulletOwner,
    origin: Position,
    angle: f32,
    speed: f32,
    damage: i32,
) -> Entity {
    world.spawn((
        Bullet {
            owner,
            damage,
        },
        origin,
        Velocity::from_angle(angle, speed),
        Facing {
            radians: angle + SHIP_FACING_OFFSET,
        },
        Collider {
            radius: BULLET_RADIUS,
        },
    ))
}

pub fn spawn_gem(world: &mut World, position: Position, value: u32) -> Entity {
    world.spawn((
        Gem {
            value,
            pickup_enabled: true,
        },
        position,
        Collider { radius: GEM_RADIUS },
    ))
}
