//! Simulation engine: the session controller.
//!
//! `SimulationEngine` owns the hecs world, the timer queue and every piece of
//! session state. Each `tick` drains queued commands, advances the clock,
//! fires due timers, runs the systems when a run is active, and returns a
//! `GameStateSnapshot`. Headless and single-threaded.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starhold_core::commands::{FrameInput, PlayerCommand};
use starhold_core::components::{Bullet, Gem};
use starhold_core::config::GameConfig;
use starhold_core::constants::DEATH_RESET_DELAY_SECS;
use starhold_core::error::{ConfigError, SimError};
use starhold_core::events::VisualEffect;
use starhold_core::state::{GameStateSnapshot, HudView, PlacementGhostView, COUNTDOWN_PLACEHOLDER};
use starhold_core::types::SimTime;

use crate::defense::{DamageOutcome, Defense};
use crate::economy::{CostTable, Ledger};
use crate::placement;
use crate::registry;
use crate::scheduler::{Scheduler, TimerEvent};
use crate::session::*;
use crate::shop::PurchaseFlow;
use crate::systems;
use crate::systems::asteroid_spawner::AsteroidSpawner;
use crate::systems::combat::CombatEvent;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::wave_spawner::WaveScheduler;
use crate::world_setup;

/// Configuration for a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed and same inputs give the same run.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    session: Session,
    defense: Defense,
    ledger: Ledger,
    shop: PurchaseFlow,
    waves: WaveScheduler,
    asteroids: AsteroidSpawner,
    command_queue: VecDeque<PlayerCommand>,
    effects: Vec<VisualEffect>,
}

impl SimulationEngine {
    /// Create an idle engine: the player at the centre and the backdrop
    /// asteroids in place, waiting for `StartRun`.
    ///
    /// `config.game` is trusted; use [`SimulationEngine::try_new`] for
    /// host-supplied configuration.
    pub fn new(config: SimConfig) -> Self {
        let game = config.game;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        world_setup::spawn_player(&mut world, &game);
        world_setup::spawn_backdrop_asteroids(&mut world, &mut rng);

        Self {
            world,
            time: SimTime::default(),
            rng,
            scheduler: Scheduler::new(),
            session: Session::new(game.difficulty),
            defense: Defense::new(&game),
            ledger: Ledger::new(game.starting_gems),
            shop: PurchaseFlow::new(CostTable::default()),
            waves: WaveScheduler::default(),
            asteroids: AsteroidSpawner::default(),
            command_queue: VecDeque::new(),
            effects: Vec::new(),
            config: game,
        }
    }

    /// Validate the game configuration, then build the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt_secs` and return the resulting snapshot.
    ///
    /// The clock and timers advance even while no run is active, so a
    /// pending death reset still fires.
    pub fn tick(&mut self, input: &FrameInput, dt_secs: f64) -> GameStateSnapshot {
        self.process_commands();

        self.time.advance(dt_secs);
        let now = self.time.elapsed_secs;
        self.service_timers(now);

        if self.session.running {
            self.run_systems(input, dt_secs.max(0.0), now);
        }

        self.build_snapshot(input)
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn gems(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn wave_number(&self) -> u32 {
        self.waves.wave_number()
    }

    pub fn message(&self) -> &str {
        &self.session.message
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn defense(&self) -> &Defense {
        &self.defense
    }

    #[cfg(test)]
    pub fn purchase_state(&self) -> crate::shop::PlacementState {
        self.shop.state()
    }

    #[cfg(test)]
    pub fn next_wave_at(&self) -> Option<f64> {
        self.waves.next_wave_at()
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Route contact damage to the defenses as an enemy would.
    #[cfg(test)]
    pub fn hit_player(&mut self, damage: i32) {
        let now = self.time.elapsed_secs;
        self.damage_player(damage, now);
    }

    /// Begin a run: full reset to defaults, arm the first wave, seed asteroids.
    pub fn start(&mut self) {
        self.reset_session();
        let now = self.time.elapsed_secs;

        self.session.running = true;
        self.session.say(RUN_START_MESSAGE);
        self.waves
            .schedule_next(&mut self.scheduler, &mut self.rng, &self.config, now);
        self.session.countdown = self.waves.countdown_text(now);
        world_setup::seed_run_asteroids(&mut self.world, &mut self.rng, &self.config);

        log::info!(
            "run started (difficulty {:?}, first wave at {:.0}s)",
            self.session.difficulty,
            self.waves.next_wave_at().unwrap_or(now)
        );
    }

    /// Shared by `start` and the death reset. Leaves `running` false.
    fn reset_session(&mut self) {
        self.scheduler.clear();
        self.waves.reset(&mut self.scheduler);
        self.asteroids.reset();
        self.shop.reset();

        registry::clear_non_player(&mut self.world);
        world_setup::reset_player(&mut self.world, &self.config);

        self.ledger.reset(self.config.starting_gems);
        self.defense.reset();

        self.session.running = false;
        self.session.death_pending = false;
        self.session.countdown = COUNTDOWN_PLACEHOLDER.to_string();
    }

    fn terminate_on_death(&mut self) {
        self.reset_session();
        self.session.say(DEATH_MESSAGE);
        log::info!("player died; session reset");
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => self.start(),
            PlayerCommand::SetDifficulty { profile } => {
                if !self.session.running {
                    self.session.difficulty = profile;
                }
            }
            PlayerCommand::ToggleShop => self.shop.toggle_shop(),
            PlayerCommand::Cancel => {
                self.shop.cancel();
                self.shop.hide_shop();
            }
            PlayerCommand::BuyItem { item } => {
                let result = self.require_running().and_then(|_| {
                    self.shop.buy(item, &mut self.ledger)
                });
                match result {
                    Ok(cost) => log::debug!("bought {item:?} for {cost}g"),
                    Err(e) => self.session.say(e.to_string()),
                }
            }
            PlayerCommand::ConfirmPlacement { position } => {
                if let Err(e) = self.require_running() {
                    self.session.say(e.to_string());
                    return;
                }
                let Some(item) = self.shop.take_pending() else {
                    return;
                };
                match placement::commit(&mut self.world, &self.config, item, position) {
                    Ok(outcome) => {
                        log::debug!("{item:?} committed at ({:.0}, {:.0})", position.x, position.y);
                        self.session.say(outcome.message());
                    }
                    Err(SimError::NoTarget) => self.session.say(REPAIR_NO_WALL_MESSAGE),
                    Err(e) => self.session.say(e.to_string()),
                }
            }
            PlayerCommand::CancelPlacement => {
                self.shop.cancel();
            }
        }
    }

    fn require_running(&self) -> Result<(), SimError> {
        if self.session.running {
            Ok(())
        } else {
            Err(SimError::SessionNotRunning)
        }
    }

    /// Fire every timer due at `now`.
    fn service_timers(&mut self, now: f64) {
        while let Some(event) = self.scheduler.pop_due(now) {
            match event {
                TimerEvent::WaveDue => {
                    if !self.session.running {
                        continue;
                    }
                    let difficulty = self.session.difficulty.multipliers();
                    let report = self.waves.spawn_wave(
                        &mut self.world,
                        &mut self.rng,
                        &self.config,
                        &difficulty,
                    );
                    log::info!(
                        "wave {} spawned: {} enemies, upgrade {:?}",
                        report.wave,
                        report.enemies,
                        report.upgrade
                    );
                    self.session.say(report.message());
                    self.waves
                        .schedule_next(&mut self.scheduler, &mut self.rng, &self.config, now);
                    self.session.countdown = self.waves.countdown_text(now);
                }
                TimerEvent::CountdownPoll => {
                    if self.session.running && self.waves.rearm_countdown(&mut self.scheduler, now)
                    {
                        self.session.countdown = self.waves.countdown_text(now);
                    } else {
                        self.session.countdown = COUNTDOWN_PLACEHOLDER.to_string();
                    }
                }
                TimerEvent::GemPickupExpired(entity) => {
                    if let Ok(mut gem) = self.world.get::<&mut Gem>(entity) {
                        gem.pickup_enabled = false;
                    }
                }
                TimerEvent::BulletExpired(entity) => {
                    let is_bullet = self.world.get::<&Bullet>(entity).is_ok();
                    if is_bullet {
                        let _ = self.world.despawn(entity);
                    }
                }
                TimerEvent::DeathReset => self.terminate_on_death(),
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &FrameInput, dt: f64, now: f64) {
        // 1. Player steering, aim and fire
        systems::player_control::run(&mut self.world, input, &mut self.scheduler, now);
        // 2. Enemy targeting
        systems::enemy_ai::run(&mut self.world);
        // 3. Turret targeting and fire
        systems::turret_fire::run(&mut self.world, &mut self.scheduler, now);
        // 4. Movement integration
        systems::movement::run(
            &mut self.world,
            dt,
            self.config.arena_width,
            self.config.arena_height,
        );
        // 5. Collision resolution
        let events =
            systems::combat::run(&mut self.world, &mut self.scheduler, now, &mut self.effects);
        self.apply_combat_events(events, now);
        // 6. Passive asteroid spawns
        self.asteroids
            .run(&mut self.world, &mut self.rng, &self.config, dt);
        // 7. Shield regeneration
        self.defense.tick_regen(now, dt);
    }

    fn apply_combat_events(&mut self, events: Vec<CombatEvent>, now: f64) {
        for event in events {
            match event {
                CombatEvent::EnemyKilled { loot, .. } => {
                    log::debug!("enemy destroyed, dropped {loot}g");
                    self.session.say(format!("Enemy destroyed +{loot}g"));
                }
                CombatEvent::AsteroidDestroyed { drop, .. } => {
                    log::debug!("asteroid destroyed, dropped {drop}g");
                }
                CombatEvent::WallDestroyed { position } => {
                    log::debug!("wall destroyed at ({:.0}, {:.0})", position.x, position.y);
                }
                CombatEvent::PlayerHit { damage } => self.damage_player(damage, now),
                CombatEvent::GemCollected { value } => {
                    self.ledger.credit(value);
                    self.session.say(format!("Picked up {value}g"));
                }
            }
        }
    }

    fn damage_player(&mut self, damage: i32, now: f64) {
        match self.defense.apply_damage(damage as f32, now) {
            DamageOutcome::ShieldAbsorbed { .. } => {
                self.session.say(format!("Shield hit -{damage}"));
            }
            DamageOutcome::ShieldDown => self.session.say("Shield down! Hull exposed."),
            DamageOutcome::HullHit { remaining } => {
                self.session.say(format!("Hull hit! {remaining} left"));
            }
            DamageOutcome::Destroyed => {
                self.session.say(DYING_MESSAGE);
                if !self.session.death_pending {
                    self.session.death_pending = true;
                    self.scheduler
                        .schedule_in(now, DEATH_RESET_DELAY_SECS, TimerEvent::DeathReset);
                    log::info!("hull destroyed; reset in {DEATH_RESET_DELAY_SECS}s");
                }
            }
            DamageOutcome::AlreadyDestroyed => {}
        }
    }

    fn build_snapshot(&mut self, input: &FrameInput) -> GameStateSnapshot {
        let placement = self.shop.pending_item().map(|item| PlacementGhostView {
            item,
            position: input.pointer,
            valid: placement::is_valid(&self.world, &self.config, input.pointer),
        });

        let hud = HudView {
            gems: self.ledger.balance(),
            wave: self.waves.wave_number(),
            shield_pct: self.defense.shield_pct(),
            hull_hits: self.defense.hull_hits(),
            message: self.session.message.clone(),
            countdown: self.session.countdown.clone(),
        };

        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                running: self.session.running,
                hud,
                effects: std::mem::take(&mut self.effects),
                shop_open: self.shop.shop_open(),
                placement,
            },
        )
    }
}
