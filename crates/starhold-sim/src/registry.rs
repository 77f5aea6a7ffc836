//! Read-side helpers over the ECS world.
//!
//! The hecs `World` is the entity registry. These queries answer the spatial
//! questions the systems and the placement rules ask of it.

use hecs::{Entity, World};

use starhold_core::components::*;
use starhold_core::types::Position;

/// The player entity, if one exists.
pub fn player_entity(world: &World) -> Option<Entity> {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

pub fn player_position(world: &World) -> Option<Position> {
    let player = player_entity(world)?;
    world.get::<&Position>(player).ok().map(|pos| *pos)
}

pub fn wall_positions(world: &World) -> Vec<(Entity, Position)> {
    world
        .query::<(&Wall, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect()
}

pub fn enemy_positions(world: &World) -> Vec<(Entity, Position)> {
    world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect()
}

/// Live turrets. This is the authoritative turret count.
pub fn turret_count(world: &World) -> u32 {
    world.query::<&Turret>().iter().count() as u32
}

/// Nearest wall strictly closer than `reach` to `point`.
pub fn nearest_wall_within(world: &World, point: Position, reach: f32) -> Option<Entity> {
    starhold_ai::targeting::nearest(point, wall_positions(world))
        .filter(|&(_, _, d)| d < reach)
        .map(|(entity, _, _)| entity)
}

/// Despawn everything except the player.
pub fn clear_non_player(world: &mut World) {
    let doomed: Vec<Entity> = world
        .iter()
        .filter(|entity| !entity.has::<Player>())
        .map(|entity| entity.entity())
        .collect();
    for entity in doomed {
        let _ = world.despawn(entity);
    }
}
