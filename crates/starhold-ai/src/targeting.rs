//! Target selection for enemies and turrets.
//!
//! Straight-line distance only: no pathfinding, no obstacle avoidance, and no
//! memory between ticks. Callers re-evaluate every tick.

use glam::Vec2;

use starhold_core::types::{Position, Velocity};

/// What an enemy steers toward this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerTarget<Id> {
    Player,
    Wall(Id),
}

/// Pick the nearer of the closest wall and the player.
///
/// Returns the target and its position. Without walls the player is always
/// the target. A wall at exactly the player's distance wins the tie.
pub fn choose_enemy_target<Id: Copy>(
    enemy: Position,
    player: Position,
    walls: impl IntoIterator<Item = (Id, Position)>,
) -> (SteerTarget<Id>, Position) {
    let nearest_wall = nearest(enemy, walls);
    let player_distance = enemy.distance_to(&player);

    match nearest_wall {
        Some((id, pos, d)) if d <= player_distance => (SteerTarget::Wall(id), pos),
        _ => (SteerTarget::Player, player),
    }
}

/// Constant-speed velocity from `from` straight toward `to`.
/// Zero when the two points coincide.
pub fn steer_velocity(from: Position, to: Position, speed: f32) -> Velocity {
    let delta: Vec2 = to.to_vec2() - from.to_vec2();
    Velocity::from_vec2(delta.normalize_or_zero() * speed)
}

/// Closest candidate whose distance from `origin` is at most `range`.
pub fn nearest_in_range<Id: Copy>(
    origin: Position,
    range: f32,
    candidates: impl IntoIterator<Item = (Id, Position)>,
) -> Option<(Id, Position, f32)> {
    nearest(origin, candidates).filter(|&(_, _, d)| d <= range)
}

/// Closest candidate to `origin`. The first of equally distant candidates wins.
pub fn nearest<Id: Copy>(
    origin: Position,
    candidates: impl IntoIterator<Item = (Id, Position)>,
) -> Option<(Id, Position, f32)> {
    let mut best: Option<(Id, Position, f32)> = None;
    for (id, pos) in candidates {
        let d = origin.distance_to(&pos);
        if best.map_or(true, |(_, _, bd)| d < bd) {
            best = Some((id, pos, d));
        }
    }
    best
}

/// Turret readiness: the full interval has passed (inclusive).
pub fn cooldown_elapsed(now_secs: f64, last_fire_secs: f64, interval_secs: f64) -> bool {
    now_secs - last_fire_secs >= interval_secs
}

/// Player trigger readiness: strictly more than the interval has passed.
pub fn trigger_ready(now_secs: f64, last_shot_secs: f64, interval_secs: f64) -> bool {
    now_secs - last_shot_secs > interval_secs
}

/// Aim angle and projectile velocity for a shot from `from` toward `to`.
pub fn aim(from: Position, to: Position, projectile_speed: f32) -> (f32, Velocity) {
    let delta: Vec2 = to.to_vec2() - from.to_vec2();
    let angle = delta.y.atan2(delta.x);
    (angle, Velocity::from_vec2(Vec2::from_angle(angle) * projectile_speed))
}
