//! Wave scheduling: randomized one-shot deadlines that escalate enemy spawns.
//!
//! The deadline and the countdown refresh are both scheduler timers, so they
//! run on their own cadence rather than the tick's. Both handles are kept so
//! a reset can cancel them before they fire.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starhold_ai::profiles::enemy_profile;
use starhold_ai::waves::{edge_spawn_point, enemy_count, roll_interval_secs, roll_upgrade};
use starhold_core::config::{DifficultyMultipliers, GameConfig};
use starhold_core::constants::COUNTDOWN_POLL_SECS;
use starhold_core::enums::WaveUpgrade;
use starhold_core::state::{format_countdown, COUNTDOWN_PLACEHOLDER};

use crate::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::world_setup;

/// What `spawn_wave` produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveReport {
    pub wave: u32,
    pub enemies: u32,
    pub upgrade: Option<WaveUpgrade>,
}

impl WaveReport {
    /// HUD announcement, e.g. "Wave 2 incoming! (Wave upgrade: speed)".
    pub fn message(&self) -> String {
        match self.upgrade {
            Some(upgrade) => format!(
                "Wave {} incoming! (Wave upgrade: {})",
                self.wave,
                upgrade.label()
            ),
            None => format!("Wave {} incoming!", self.wave),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaveScheduler {
    wave_number: u32,
    next_wave_at: Option<f64>,
    wave_timer: Option<TimerHandle>,
    countdown_timer: Option<TimerHandle>,
}

impl WaveScheduler {
    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// Absolute simulation time the next wave is due, if armed.
    pub fn next_wave_at(&self) -> Option<f64> {
        self.next_wave_at
    }

    /// Arm the next wave deadline within the active interval bounds and
    /// restart the countdown refresh. Returns the deadline.
    pub fn schedule_next(
        &mut self,
        scheduler: &mut Scheduler,
        rng: &mut ChaCha8Rng,
        config: &GameConfig,
        now_secs: f64,
    ) -> f64 {
        self.cancel(scheduler);

        let secs = roll_interval_secs(rng, config.active_wave_bounds());
        let due = now_secs + f64::from(secs);
        self.next_wave_at = Some(due);
        self.wave_timer = Some(scheduler.schedule_at(due, TimerEvent::WaveDue));
        self.countdown_timer =
            Some(scheduler.schedule_in(now_secs, COUNTDOWN_POLL_SECS, TimerEvent::CountdownPoll));
        log::debug!("next wave in {secs}s");
        due
    }

    /// Re-arm the countdown refresh after a poll fired. Returns false (and
    /// arms nothing) once no wave is pending.
    pub fn rearm_countdown(&mut self, scheduler: &mut Scheduler, now_secs: f64) -> bool {
        if self.next_wave_at.is_none() {
            self.countdown_timer = None;
            return false;
        }
        self.countdown_timer =
            Some(scheduler.schedule_in(now_secs, COUNTDOWN_POLL_SECS, TimerEvent::CountdownPoll));
        true
    }

    /// Cancel the pending deadline and countdown without firing them.
    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.wave_timer.take() {
            scheduler.cancel(handle);
        }
        if let Some(handle) = self.countdown_timer.take() {
            scheduler.cancel(handle);
        }
        self.next_wave_at = None;
    }

    /// Cancel timers and return to wave 0.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.cancel(scheduler);
        self.wave_number = 0;
    }

    /// Countdown text for the HUD at `now_secs`.
    pub fn countdown_text(&self, now_secs: f64) -> String {
        match self.next_wave_at {
            Some(due) => format_countdown(due - now_secs),
            None => COUNTDOWN_PLACEHOLDER.to_string(),
        }
    }

    /// Advance to the next wave and spawn it along the arena edges.
    ///
    /// Even waves roll one global upgrade that applies to every enemy of
    /// that wave. The caller re-arms the scheduler afterwards.
    pub fn spawn_wave(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        config: &GameConfig,
        difficulty: &DifficultyMultipliers,
    ) -> WaveReport {
        self.wave_number += 1;
        self.wave_timer = None;
        self.next_wave_at = None;

        let wave = self.wave_number;
        let count = enemy_count(wave, difficulty.spawn);
        let upgrade = roll_upgrade(wave, rng);
        let profile = enemy_profile(upgrade, difficulty);

        for _ in 0..count {
            let position = edge_spawn_point(rng, config.arena_width, config.arena_height);
            world_setup::spawn_enemy(world, position, profile, upgrade);
        }

        WaveReport {
            wave,
            enemies: count,
            upgrade,
        }
    }
}
