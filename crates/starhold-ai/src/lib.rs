//! Decision logic for STARHOLD.
//!
//! Enemy steering, turret target acquisition, enemy stat profiles and wave
//! composition. Pure functions over plain data with no ECS dependency, so the
//! engine can call them from any system and tests can drive them directly.

pub mod profiles;
pub mod targeting;
pub mod waves;

pub use starhold_core as core;
