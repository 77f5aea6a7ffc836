//! Enemy steering: head straight for the nearer of the closest wall and the player.

use hecs::World;

use starhold_ai::targeting::{choose_enemy_target, steer_velocity};
use starhold_core::components::Enemy;
use starhold_core::types::{Position, Velocity};

use crate::registry;

pub fn run(world: &mut World) {
    let Some(player) = registry::player_position(world) else {
        return;
    };
    let walls = registry::wall_positions(world);

    for (_entity, (enemy, pos, vel)) in world.query_mut::<(&Enemy, &Position, &mut Velocity)>() {
        let (_, target) = choose_enemy_target(*pos, player, walls.iter().copied());
        *vel = steer_velocity(*pos, target, enemy.speed);
    }
}
