//! Snapshot system: projects the world and session state into a
//! `GameStateSnapshot` for the renderer.
//!
//! This system is read-only.

use hecs::World;

use starhold_core::components::*;
use starhold_core::enums::SpriteKind;
use starhold_core::events::VisualEffect;
use starhold_core::state::*;
use starhold_core::types::{Position, SimTime};

/// Everything outside the ECS world that the snapshot reports.
pub struct SnapshotInputs {
    pub time: SimTime,
    pub running: bool,
    pub hud: HudView,
    pub effects: Vec<VisualEffect>,
    pub shop_open: bool,
    pub placement: Option<PlacementGhostView>,
}

pub fn build_snapshot(world: &World, inputs: SnapshotInputs) -> GameStateSnapshot {
    GameStateSnapshot {
        time: inputs.time,
        running: inputs.running,
        hud: inputs.hud,
        entities: build_entities(world),
        effects: inputs.effects,
        shop_open: inputs.shop_open,
        placement: inputs.placement,
    }
}

/// Every drawable entity, sorted by id for stable output.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut views = Vec::new();

    collect::<Player>(world, &mut views, |_| SpriteKind::PlayerShip);
    collect::<Enemy>(world, &mut views, |_| SpriteKind::Enemy);
    collect::<Asteroid>(world, &mut views, |a| SpriteKind::Asteroid(a.tier));
    collect::<Wall>(world, &mut views, |_| SpriteKind::Wall);
    collect::<Turret>(world, &mut views, |_| SpriteKind::Turret);
    collect::<Bullet>(world, &mut views, |_| SpriteKind::Bullet);
    collect::<Gem>(world, &mut views, |_| SpriteKind::Gem);

    views.sort_by_key(|v| v.id);
    views
}

fn collect<T: hecs::Component>(
    world: &World,
    views: &mut Vec<EntityView>,
    kind: impl Fn(&T) -> SpriteKind,
) {
    let mut query = world.query::<(&T, &Position, Option<&Facing>)>();
    for (entity, (component, position, facing)) in query.iter() {
        views.push(EntityView {
            id: entity.to_bits().get(),
            kind: kind(component),
            position: *position,
            rotation: facing.map(|f| f.radians).unwrap_or(0.0),
        });
    }
}
