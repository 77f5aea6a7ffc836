//! Passive asteroid spawning on a fixed cadence.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starhold_ai::waves::roll_asteroid_tiers;
use starhold_core::config::GameConfig;
use starhold_core::constants::ASTEROID_POLL_INTERVAL_SECS;

use crate::world_setup;

/// Accumulates tick time and rolls once per poll interval.
#[derive(Debug, Clone, Default)]
pub struct AsteroidSpawner {
    accumulated_secs: f64,
}

impl AsteroidSpawner {
    /// Returns the number of asteroids spawned this tick.
    pub fn run(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        config: &GameConfig,
        dt_secs: f64,
    ) -> usize {
        self.accumulated_secs += dt_secs.max(0.0);
        if self.accumulated_secs < ASTEROID_POLL_INTERVAL_SECS {
            return 0;
        }
        self.accumulated_secs = 0.0;

        let tiers = roll_asteroid_tiers(rng, &config.asteroid_rates);
        for &tier in &tiers {
            world_setup::spawn_random_asteroid(world, rng, config, tier);
        }
        tiers.len()
    }

    pub fn reset(&mut self) {
        self.accumulated_secs = 0.0;
    }
}
