//! Wave composition and random spawn placement.

use rand::seq::SliceRandom;
use rand::Rng;

use starhold_core::config::{AsteroidRates, WaveBounds};
use starhold_core::constants::*;
use starhold_core::enums::{AsteroidTier, WaveUpgrade};
use starhold_core::types::Position;

/// Number of enemies in wave `wave` under the difficulty's spawn multiplier.
pub fn enemy_count(wave: u32, spawn_multiplier: f32) -> u32 {
    let scaled = (WAVE_BASE_ENEMIES + wave as f32 * WAVE_ENEMIES_PER_WAVE * spawn_multiplier).floor();
    (scaled.max(0.0) as u32).max(WAVE_MIN_ENEMIES)
}

/// Even-numbered waves get one global upgrade, chosen uniformly.
pub fn roll_upgrade<R: Rng + ?Sized>(wave: u32, rng: &mut R) -> Option<WaveUpgrade> {
    if wave == 0 || wave % 2 != 0 {
        return None;
    }
    WaveUpgrade::ALL.choose(rng).copied()
}

/// Whole seconds until the next wave, uniform in `[min_secs, max_secs]`.
pub fn roll_interval_secs<R: Rng + ?Sized>(rng: &mut R, bounds: WaveBounds) -> u32 {
    rng.gen_range(bounds.min_secs..=bounds.max_secs)
}

/// A point on one of the four arena edges, inset by the spawn margin.
/// The edge is chosen uniformly, then the point uniformly along it.
pub fn edge_spawn_point<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Position {
    let m = SPAWN_EDGE_MARGIN;
    match rng.gen_range(0..4) {
        0 => Position::new(rng.gen_range(m..=width - m), m),
        1 => Position::new(rng.gen_range(m..=width - m), height - m),
        2 => Position::new(m, rng.gen_range(m..=height - m)),
        _ => Position::new(width - m, rng.gen_range(m..=height - m)),
    }
}

/// A uniformly random point at least `margin` away from every edge.
pub fn random_arena_point<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    margin: f32,
) -> Position {
    Position::new(
        rng.gen_range(margin..=width - margin),
        rng.gen_range(margin..=height - margin),
    )
}

/// One passive asteroid poll: a single roll in 1..=100 decides which tiers
/// appear. Usually nothing, sometimes a small one, rarely medium plus large.
pub fn roll_asteroid_tiers<R: Rng + ?Sized>(rng: &mut R, rates: &AsteroidRates) -> Vec<AsteroidTier> {
    let roll: u32 = rng.gen_range(1..=100);
    tiers_for_roll(roll, rates)
}

/// Tiers spawned for a given roll in 1..=100.
pub fn tiers_for_roll(roll: u32, rates: &AsteroidRates) -> Vec<AsteroidTier> {
    let mut tiers = Vec::new();
    if roll <= rates.small_pct {
        tiers.push(AsteroidTier::Small);
    }
    if roll > 100 - rates.medium_pct.min(100) {
        tiers.push(AsteroidTier::Medium);
    }
    if roll > 100 - rates.large_pct.min(100) {
        tiers.push(AsteroidTier::Large);
    }
    tiers
}
