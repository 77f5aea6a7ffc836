//! Kinematic integration.
//!
//! position += velocity * dt for everything that moves. Entities marked
//! `ConfinedToArena` are then clamped so their collider stays inside the arena.

use hecs::World;

use starhold_core::components::{Collider, ConfinedToArena};
use starhold_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt_secs: f64, arena_width: f32, arena_height: f32) {
    let dt = dt_secs.max(0.0) as f32;
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }

    for (_entity, (pos, collider, _)) in
        world.query_mut::<(&mut Position, &Collider, &ConfinedToArena)>()
    {
        let r = collider.radius.min(arena_width / 2.0).min(arena_height / 2.0);
        pos.x = pos.x.clamp(r, arena_width - r);
        pos.y = pos.y.clamp(r, arena_height - r);
    }
}
