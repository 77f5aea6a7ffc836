//! Simulation engine for STARHOLD.
//!
//! Owns the hecs ECS world, services the timer queue, runs systems each
//! tick, and produces GameStateSnapshots for the renderer.

pub mod defense;
pub mod economy;
pub mod engine;
pub mod placement;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod shop;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use starhold_core as core;

#[cfg(test)]
mod tests;
