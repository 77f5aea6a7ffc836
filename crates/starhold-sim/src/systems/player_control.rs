//! Player steering, aiming and firing from the frame's input.

use hecs::World;

use starhold_ai::targeting::trigger_ready;
use starhold_core::commands::FrameInput;
use starhold_core::components::{Facing, Player, PlayerShip};
use starhold_core::constants::*;
use starhold_core::enums::BulletOwner;
use starhold_core::types::{Position, Velocity};

use crate::scheduler::{Scheduler, TimerEvent};
use crate::world_setup;

/// Apply movement intent, face the pointer, and fire if the trigger is held
/// and the weapon is ready.
pub fn run(world: &mut World, input: &FrameInput, scheduler: &mut Scheduler, now_secs: f64) {
    let mut shot: Option<(Position, f32)> = None;

    for (_entity, (_player, pos, vel, facing, ship)) in world.query_mut::<(
        &Player,
        &Position,
        &mut Velocity,
        &mut Facing,
        &mut PlayerShip,
    )>() {
        let dir = glam::Vec2::new(input.movement.x, input.movement.y).normalize_or_zero();
        *vel = Velocity::from_vec2(dir * ship.speed);

        let angle = pos.angle_to(&input.pointer);
        facing.radians = angle + SHIP_FACING_OFFSET;

        if input.pointer_down
            && trigger_ready(now_secs, ship.last_shot_secs, ship.fire_interval_secs)
        {
            ship.last_shot_secs = now_secs;
            shot = Some((*pos, angle));
        }
    }

    if let Some((origin, angle)) = shot {
        let bullet = world_setup::spawn_bullet(
            world,
            BulletOwner::Player,
            origin,
            angle,
            PLAYER_BULLET_SPEED,
            PLAYER_BULLET_DAMAGE,
        );
        scheduler.schedule_in(now_secs, BULLET_TTL_SECS, TimerEvent::BulletExpired(bullet));
    }
}
