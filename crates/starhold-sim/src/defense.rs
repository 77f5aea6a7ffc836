//! Player shield and hull.
//!
//! The shield soaks damage by magnitude. Once it is empty the hull takes
//! hits by count: every hit removes exactly one hull point no matter how hard
//! it lands. Regeneration is purely a timestamp comparison against the last
//! damage time.

use starhold_core::config::GameConfig;

/// Result of one `apply_damage` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Shield took the hit and still has charge left.
    ShieldAbsorbed { remaining: f32 },
    /// Shield took the hit and is now empty. The hull is exposed.
    ShieldDown,
    /// Hull lost one hit point and survives.
    HullHit { remaining: u32 },
    /// Hull reached zero with this hit.
    Destroyed,
    /// Hull was already at zero. Nothing changes.
    AlreadyDestroyed,
}

#[derive(Debug, Clone)]
pub struct Defense {
    shield: f32,
    shield_max: f32,
    regen_per_sec: f32,
    regen_delay_secs: f64,
    hull_hits: u32,
    hull_max: u32,
    last_damage_secs: f64,
}

impl Defense {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            shield: config.shield_max,
            shield_max: config.shield_max,
            regen_per_sec: config.shield_regen_per_sec,
            regen_delay_secs: config.shield_regen_delay_secs,
            hull_hits: config.hull_hits,
            hull_max: config.hull_hits,
            last_damage_secs: 0.0,
        }
    }

    /// Apply one hit of `amount` at simulation time `now_secs`.
    ///
    /// Damage beyond the remaining shield is discarded rather than carried
    /// into the hull.
    pub fn apply_damage(&mut self, amount: f32, now_secs: f64) -> DamageOutcome {
        self.last_damage_secs = now_secs;

        if !self.is_exposed() {
            self.shield = (self.shield - amount.max(0.0)).max(0.0);
            return if self.shield > 0.0 {
                DamageOutcome::ShieldAbsorbed {
                    remaining: self.shield,
                }
            } else {
                DamageOutcome::ShieldDown
            };
        }

        if self.hull_hits == 0 {
            return DamageOutcome::AlreadyDestroyed;
        }
        self.hull_hits -= 1;
        if self.hull_hits == 0 {
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::HullHit {
                remaining: self.hull_hits,
            }
        }
    }

    /// Regenerate the shield if the regen delay has passed since the last hit.
    pub fn tick_regen(&mut self, now_secs: f64, dt_secs: f64) {
        if now_secs - self.last_damage_secs <= self.regen_delay_secs {
            return;
        }
        if self.shield < self.shield_max {
            self.shield =
                (self.shield + self.regen_per_sec * dt_secs.max(0.0) as f32).min(self.shield_max);
        }
    }

    /// Restore full shield and hull. Regen eligibility restarts from time zero.
    pub fn reset(&mut self) {
        self.shield = self.shield_max;
        self.hull_hits = self.hull_max;
        self.last_damage_secs = 0.0;
    }

    pub fn shield(&self) -> f32 {
        self.shield
    }

    pub fn hull_hits(&self) -> u32 {
        self.hull_hits
    }

    pub fn is_exposed(&self) -> bool {
        self.shield <= 0.0
    }

    /// Shield as a 0..=100 percentage for the HUD.
    pub fn shield_pct(&self) -> f32 {
        (self.shield / self.shield_max * 100.0).clamp(0.0, 100.0)
    }
}
