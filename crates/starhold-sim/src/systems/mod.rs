//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Anything they need beyond components (RNG, scheduler, clock) is passed in.

pub mod asteroid_spawner;
pub mod combat;
pub mod enemy_ai;
pub mod movement;
pub mod player_control;
pub mod snapshot;
pub mod turret_fire;
pub mod wave_spawner;
