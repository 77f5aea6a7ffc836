//! Structure placement rules and commit.
//!
//! Geometry is the same for every shop item: away from the arena edge, clear
//! of the player, and spaced from existing walls. The turret cap is a commit
//! time check only, so the placement ghost never shows red because of it.

use hecs::World;

use starhold_core::components::Wall;
use starhold_core::config::GameConfig;
use starhold_core::constants::*;
use starhold_core::enums::{PlacementViolation, ShopItem};
use starhold_core::error::SimError;
use starhold_core::types::Position;

use crate::registry;
use crate::world_setup;

/// Check the geometric placement rules at `point`.
pub fn validate(world: &World, config: &GameConfig, point: Position) -> Result<(), SimError> {
    let m = PLACEMENT_EDGE_MARGIN;
    if point.x < m
        || point.x > config.arena_width - m
        || point.y < m
        || point.y > config.arena_height - m
    {
        return Err(SimError::InvalidPlacement(PlacementViolation::OutOfBounds));
    }

    if let Some(player) = registry::player_position(world) {
        if point.distance_to(&player) < PLACEMENT_PLAYER_CLEARANCE {
            return Err(SimError::InvalidPlacement(
                PlacementViolation::TooCloseToPlayer,
            ));
        }
    }

    let crowded = registry::wall_positions(world)
        .iter()
        .any(|(_, wall)| point.distance_to(wall) < PLACEMENT_WALL_SPACING);
    if crowded {
        return Err(SimError::InvalidPlacement(PlacementViolation::TooCloseToWall));
    }

    Ok(())
}

pub fn is_valid(world: &World, config: &GameConfig, point: Position) -> bool {
    validate(world, config, point).is_ok()
}

/// Reject a new turret once the live count has reached the cap.
pub fn check_turret_cap(world: &World, config: &GameConfig) -> Result<(), SimError> {
    if registry::turret_count(world) >= config.turret_cap {
        return Err(SimError::InvalidPlacement(
            PlacementViolation::TurretCapReached,
        ));
    }
    Ok(())
}

/// What a successful commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    WallPlaced(hecs::Entity),
    TurretPlaced(hecs::Entity),
    WallRepaired { hp: i32 },
    /// Ship upgrade and new ship are sold but change nothing in play.
    NoEffect,
}

impl PlacementOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            PlacementOutcome::WallPlaced(_) => "Wall placed",
            PlacementOutcome::TurretPlaced(_) => "Turret placed",
            PlacementOutcome::WallRepaired { .. } => "Repaired wall",
            PlacementOutcome::NoEffect => "Placed item",
        }
    }
}

/// Commit a purchased item at `point`.
///
/// Geometry is checked first for every item, including repair. A repair
/// heals the nearest wall strictly within reach of the point, or fails with
/// `NoTarget`.
pub fn commit(
    world: &mut World,
    config: &GameConfig,
    item: ShopItem,
    point: Position,
) -> Result<PlacementOutcome, SimError> {
    validate(world, config, point)?;

    match item {
        ShopItem::Wall => Ok(PlacementOutcome::WallPlaced(world_setup::spawn_wall(
            world, point,
        ))),
        ShopItem::Turret => {
            check_turret_cap(world, config)?;
            Ok(PlacementOutcome::TurretPlaced(world_setup::spawn_turret(
                world, point,
            )))
        }
        ShopItem::Repair => {
            let target = registry::nearest_wall_within(world, point, WALL_REPAIR_REACH)
                .ok_or(SimError::NoTarget)?;
            let mut wall = world
                .get::<&mut Wall>(target)
                .map_err(|_| SimError::NoTarget)?;
            wall.hp = (wall.hp + WALL_REPAIR_AMOUNT).min(WALL_MAX_HP);
            Ok(PlacementOutcome::WallRepaired { hp: wall.hp })
        }
        ShopItem::ShipUpgrade | ShopItem::NewShip => Ok(PlacementOutcome::NoEffect),
    }
}
