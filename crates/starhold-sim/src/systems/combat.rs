//! Collision resolution.
//!
//! Overlaps are circle tests on `Collider` radii. Pair kinds are resolved in
//! a fixed order, bullet hits before contact hits:
//!
//! 1. bullet × enemy
//! 2. bullet × asteroid
//! 3. enemy × wall
//! 4. enemy × player
//! 5. player × gem
//!
//! An entity removed earlier in the pass is skipped by every later pair, and
//! all removals are despawned before the function returns. Player damage and
//! gem pickups are reported as events for the engine to route to the defense
//! model and the ledger.

use std::collections::HashSet;

use hecs::{Entity, World};

use starhold_core::components::*;
use starhold_core::constants::{ENEMY_WALL_CONTACT_DAMAGE, GEM_PICKUP_WINDOW_SECS};
use starhold_core::events::VisualEffect;
use starhold_core::types::Position;

use crate::scheduler::{Scheduler, TimerEvent};
use crate::world_setup;

/// Outcome of one resolved pair that the engine must act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatEvent {
    EnemyKilled { position: Position, loot: u32 },
    AsteroidDestroyed { position: Position, drop: u32 },
    WallDestroyed { position: Position },
    /// An enemy rammed the player with this much contact damage.
    PlayerHit { damage: i32 },
    GemCollected { value: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    position: Position,
    radius: f32,
}

/// Entities removed this pass, despawned in removal order.
#[derive(Default)]
struct Removed {
    seen: HashSet<Entity>,
    order: Vec<Entity>,
}

impl Removed {
    fn contains(&self, entity: &Entity) -> bool {
        self.seen.contains(entity)
    }

    fn insert(&mut self, entity: Entity) {
        if self.seen.insert(entity) {
            self.order.push(entity);
        }
    }
}

impl Body {
    fn overlaps(&self, other: &Body) -> bool {
        self.position.distance_to(&other.position) < self.radius + other.radius
    }
}

fn bodies<T: hecs::Component>(world: &World) -> Vec<Body> {
    world
        .query::<(&T, &Position, &Collider)>()
        .iter()
        .map(|(entity, (_, position, collider))| Body {
            entity,
            position: *position,
            radius: collider.radius,
        })
        .collect()
}

/// Run one resolution pass.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    now_secs: f64,
    effects: &mut Vec<VisualEffect>,
) -> Vec<CombatEvent> {
    let bullets = bodies::<Bullet>(world);
    let enemies = bodies::<Enemy>(world);
    let asteroids = bodies::<Asteroid>(world);
    let walls = bodies::<Wall>(world);
    let players = bodies::<Player>(world);
    let gems: Vec<Body> = bodies::<Gem>(world)
        .into_iter()
        .filter(|gem| {
            world
                .get::<&Gem>(gem.entity)
                .map(|g| g.pickup_enabled)
                .unwrap_or(false)
        })
        .collect();

    let mut removed = Removed::default();
    let mut events = Vec::new();
    let mut drops: Vec<(Position, u32)> = Vec::new();

    // 1. bullet × enemy
    for bullet in &bullets {
        let Some(enemy) = enemies
            .iter()
            .find(|e| !removed.contains(&e.entity) && bullet.overlaps(e))
        else {
            continue;
        };
        let damage = bullet_damage(world, bullet.entity);
        removed.insert(bullet.entity);
        effects.push(VisualEffect::ImpactBurst {
            position: enemy.position,
        });

        let Ok(mut stats) = world.get::<&mut Enemy>(enemy.entity) else {
            continue;
        };
        stats.hp = (stats.hp - damage).max(0);
        if stats.hp == 0 {
            let loot = stats.loot_value;
            drop(stats);
            removed.insert(enemy.entity);
            drops.push((enemy.position, loot));
            events.push(CombatEvent::EnemyKilled {
                position: enemy.position,
                loot,
            });
        }
    }

    // 2. bullet × asteroid
    for bullet in &bullets {
        if removed.contains(&bullet.entity) {
            continue;
        }
        let Some(asteroid) = asteroids
            .iter()
            .find(|a| !removed.contains(&a.entity) && bullet.overlaps(a))
        else {
            continue;
        };
        let damage = bullet_damage(world, bullet.entity);
        removed.insert(bullet.entity);

        let Ok(mut rock) = world.get::<&mut Asteroid>(asteroid.entity) else {
            continue;
        };
        rock.hp = (rock.hp - damage).max(0);
        if rock.hp == 0 {
            let value = rock.drop_value;
            drop(rock);
            removed.insert(asteroid.entity);
            drops.push((asteroid.position, value));
            effects.push(VisualEffect::ImpactBurst {
                position: asteroid.position,
            });
            events.push(CombatEvent::AsteroidDestroyed {
                position: asteroid.position,
                drop: value,
            });
        }
    }

    // 3. enemy × wall: the enemy is spent on impact.
    for enemy in &enemies {
        if removed.contains(&enemy.entity) {
            continue;
        }
        let Some(wall) = walls
            .iter()
            .find(|w| !removed.contains(&w.entity) && enemy.overlaps(w))
        else {
            continue;
        };
        removed.insert(enemy.entity);
        effects.push(VisualEffect::ImpactBurst {
            position: wall.position,
        });

        let Ok(mut structure) = world.get::<&mut Wall>(wall.entity) else {
            continue;
        };
        structure.hp = (structure.hp - ENEMY_WALL_CONTACT_DAMAGE).max(0);
        if structure.hp == 0 {
            drop(structure);
            removed.insert(wall.entity);
            events.push(CombatEvent::WallDestroyed {
                position: wall.position,
            });
        }
    }

    // 4. enemy × player: also spent on impact; damage goes to the defenses.
    for player in &players {
        for enemy in &enemies {
            if removed.contains(&enemy.entity) || !enemy.overlaps(player) {
                continue;
            }
            let damage = world
                .get::<&Enemy>(enemy.entity)
                .map(|e| e.contact_damage)
                .unwrap_or(0);
            removed.insert(enemy.entity);
            events.push(CombatEvent::PlayerHit { damage });
        }
    }

    // 5. player × gem
    for player in &players {
        for gem in &gems {
            if removed.contains(&gem.entity) || !gem.overlaps(player) {
                continue;
            }
            let value = world.get::<&Gem>(gem.entity).map(|g| g.value).unwrap_or(0);
            removed.insert(gem.entity);
            events.push(CombatEvent::GemCollected { value });
        }
    }

    for entity in removed.order {
        let _ = world.despawn(entity);
    }

    for (position, value) in drops {
        let gem = world_setup::spawn_gem(world, position, value);
        scheduler.schedule_in(
            now_secs,
            GEM_PICKUP_WINDOW_SECS,
            TimerEvent::GemPickupExpired(gem),
        );
    }

    events
}

fn bullet_damage(world: &World, bullet: Entity) -> i32 {
    world.get::<&Bullet>(bullet).map(|b| b.damage).unwrap_or(0)
}
