//! Turret auto-fire.
//!
//! Each ready turret re-acquires the nearest enemy in range every tick. A
//! turret with nothing in range keeps its cooldown and tries again next tick.

use hecs::World;

use starhold_ai::targeting::{aim, cooldown_elapsed, nearest_in_range};
use starhold_core::components::Turret;
use starhold_core::constants::BULLET_TTL_SECS;
use starhold_core::enums::BulletOwner;
use starhold_core::types::Position;

use crate::registry;
use crate::scheduler::{Scheduler, TimerEvent};
use crate::world_setup;

struct Shot {
    origin: Position,
    angle: f32,
    speed: f32,
    damage: i32,
}

pub fn run(world: &mut World, scheduler: &mut Scheduler, now_secs: f64) {
    let enemies = registry::enemy_positions(world);
    if enemies.is_empty() {
        return;
    }

    let mut shots = Vec::new();
    for (_entity, (turret, pos)) in world.query_mut::<(&mut Turret, &Position)>() {
        if !cooldown_elapsed(now_secs, turret.last_fire_secs, turret.fire_interval_secs) {
            continue;
        }
        let Some((_, target, _)) = nearest_in_range(*pos, turret.range, enemies.iter().copied())
        else {
            continue;
        };
        turret.last_fire_secs = now_secs;
        let (angle, _) = aim(*pos, target, turret.bullet_speed);
        shots.push(Shot {
            origin: *pos,
            angle,
            speed: turret.bullet_speed,
            damage: turret.damage,
        });
    }

    for shot in shots {
        let bullet = world_setup::spawn_bullet(
            world,
            BulletOwner::Turret,
            shot.origin,
            shot.angle,
            shot.speed,
            shot.damage,
        );
        scheduler.schedule_in(now_secs, BULLET_TTL_SECS, TimerEvent::BulletExpired(bullet));
    }
}
