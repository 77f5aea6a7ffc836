//! Tests for the simulation engine, session lifecycle, combat, and the shop flow.

use std::collections::HashSet;

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starhold_ai::profiles::enemy_profile;
use starhold_ai::waves::enemy_count;
use starhold_core::commands::{FrameInput, MoveIntent, PlayerCommand};
use starhold_core::components::*;
use starhold_core::config::{AsteroidRates, GameConfig};
use starhold_core::enums::*;
use starhold_core::events::VisualEffect;
use starhold_core::state::COUNTDOWN_PLACEHOLDER;
use starhold_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};
use crate::session::*;
use crate::shop::PlacementState;
use crate::world_setup;

const DT: f64 = 1.0 / 60.0;

fn idle() -> FrameInput {
    FrameInput::default()
}

fn engine_with(game: GameConfig) -> SimulationEngine {
    SimulationEngine::new(SimConfig { seed: 7, game })
}

fn started(game: GameConfig) -> SimulationEngine {
    let mut engine = engine_with(game);
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick(&idle(), DT);
    engine
}

fn debug_waves() -> GameConfig {
    GameConfig {
        debug_short_waves: true,
        ..Default::default()
    }
}

fn run_for(engine: &mut SimulationEngine, input: &FrameInput, secs: f64, dt: f64) {
    let ticks = (secs / dt).round() as usize;
    for _ in 0..ticks {
        engine.tick(input, dt);
    }
}

fn count<T: hecs::Component>(engine: &SimulationEngine) -> usize {
    let mut q = engine.world().query::<&T>();
    q.iter().count()
}

fn entities_with<T: hecs::Component>(engine: &SimulationEngine) -> Vec<Entity> {
    let mut q = engine.world().query::<&T>();
    q.iter().map(|(e, _)| e).collect()
}

fn despawn_all<T: hecs::Component>(engine: &mut SimulationEngine) {
    for entity in entities_with::<T>(engine) {
        engine.world_mut().despawn(entity).unwrap();
    }
}

fn spawn_medium_enemy(engine: &mut SimulationEngine, at: Position) -> Entity {
    let profile = enemy_profile(None, &DifficultyProfile::Medium.multipliers());
    world_setup::spawn_enemy(engine.world_mut(), at, profile, None)
}

fn buy_and_place(engine: &mut SimulationEngine, item: ShopItem, at: Position) {
    engine.queue_command(PlayerCommand::BuyItem { item });
    engine.queue_command(PlayerCommand::ConfirmPlacement { position: at });
    engine.tick(&idle(), DT);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        game: debug_waves(),
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        game: debug_waves(),
    });
    let input = FrameInput {
        movement: MoveIntent::from_keys(false, false, false, true),
        pointer: Position::new(1000.0, 200.0),
        pointer_down: true,
    };

    engine_a.queue_command(PlayerCommand::StartRun);
    engine_b.queue_command(PlayerCommand::StartRun);

    for _ in 0..2400 {
        let json_a = serde_json::to_string(&engine_a.tick(&input, DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&input, DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartRun);
    engine_b.queue_command(PlayerCommand::StartRun);

    // Run asteroids are seeded at random points.
    let json_a = serde_json::to_string(&engine_a.tick(&idle(), DT)).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick(&idle(), DT)).unwrap();
    assert_ne!(json_a, json_b);
}

// ---- Construction and idle state ----

#[test]
fn test_idle_engine_shows_backdrop() {
    let mut engine = engine_with(GameConfig::default());
    let snap = engine.tick(&idle(), DT);

    assert!(!snap.running);
    assert_eq!(snap.hud.message, IDLE_MESSAGE);
    assert_eq!(snap.hud.countdown, COUNTDOWN_PLACEHOLDER);
    assert_eq!(snap.hud.gems, 50);
    assert_eq!(snap.hud.shield_pct, 100.0);
    assert_eq!(snap.hud.hull_hits, 2);

    let kinds: Vec<SpriteKind> = snap.entities.iter().map(|e| e.kind).collect();
    assert_eq!(kinds.len(), 4);
    assert!(kinds.contains(&SpriteKind::PlayerShip));
    for tier in [AsteroidTier::Small, AsteroidTier::Medium, AsteroidTier::Large] {
        assert!(kinds.contains(&SpriteKind::Asteroid(tier)));
    }
}

#[test]
fn test_try_new_rejects_invalid_config() {
    let result = SimulationEngine::try_new(SimConfig {
        seed: 1,
        game: GameConfig {
            hull_hits: 0,
            ..Default::default()
        },
    });
    assert!(result.is_err());
}

#[test]
fn test_smallest_valid_arena_starts_cleanly() {
    let cramped = GameConfig {
        arena_width: 90.0,
        arena_height: 90.0,
        ..Default::default()
    };
    assert!(SimulationEngine::try_new(SimConfig {
        seed: 1,
        game: cramped,
    })
    .is_err());

    let snug = GameConfig {
        arena_width: 101.0,
        arena_height: 101.0,
        ..Default::default()
    };
    let mut engine = SimulationEngine::try_new(SimConfig {
        seed: 1,
        game: snug,
    })
    .unwrap();
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick(&idle(), DT);
    assert!(engine.is_running());
    assert_eq!(count::<Asteroid>(&engine), 6);
}

#[test]
fn test_gameplay_actions_require_running_session() {
    let mut engine = engine_with(GameConfig::default());
    engine.queue_command(PlayerCommand::BuyItem {
        item: ShopItem::Wall,
    });
    engine.tick(&idle(), DT);
    assert_eq!(engine.gems(), 50);
    assert_eq!(engine.purchase_state(), PlacementState::Idle);
    assert_eq!(engine.message(), "Press Start to begin");

    engine.queue_command(PlayerCommand::ConfirmPlacement {
        position: Position::new(200.0, 200.0),
    });
    engine.tick(&idle(), DT);
    assert_eq!(count::<Wall>(&engine), 0);
}

#[test]
fn test_idle_engine_does_not_simulate() {
    let mut engine = engine_with(GameConfig::default());
    let input = FrameInput {
        movement: MoveIntent::from_keys(false, false, false, true),
        pointer: Position::new(0.0, 0.0),
        pointer_down: true,
    };
    run_for(&mut engine, &input, 5.0, 0.5);
    assert_eq!(count::<Bullet>(&engine), 0);
    let snap = engine.tick(&input, DT);
    let player = snap
        .entities
        .iter()
        .find(|e| e.kind == SpriteKind::PlayerShip)
        .unwrap();
    assert_eq!(player.position, Position::new(640.0, 360.0));
    // The clock still runs.
    assert!(snap.time.elapsed_secs > 5.0);
}

// ---- Session start ----

#[test]
fn test_start_run_resets_and_seeds() {
    let engine = started(GameConfig::default());

    assert!(engine.is_running());
    assert_eq!(engine.gems(), 50);
    assert_eq!(engine.wave_number(), 0);
    assert_eq!(engine.message(), RUN_START_MESSAGE);
    // Backdrop asteroids replaced by the run's six seeded ones.
    assert_eq!(count::<Asteroid>(&engine), 6);
    assert_eq!(count::<Player>(&engine), 1);

    let due = engine.next_wave_at().unwrap();
    assert!((300.0..=600.0).contains(&due), "first wave at {due}");
}

#[test]
fn test_wave_interval_always_within_bounds() {
    for seed in 0..40 {
        for game in [GameConfig::default(), debug_waves()] {
            let bounds = game.active_wave_bounds();
            let mut engine = SimulationEngine::new(SimConfig { seed, game });
            engine.tick(&idle(), 3.0);
            let scheduled_at = engine.time().elapsed_secs;
            engine.queue_command(PlayerCommand::StartRun);
            engine.tick(&idle(), DT);

            let delay = engine.next_wave_at().unwrap() - scheduled_at;
            assert!(delay >= f64::from(bounds.min_secs) && delay <= f64::from(bounds.max_secs));
            assert_eq!(delay.fract(), 0.0, "intervals are whole seconds");
        }
    }
}

#[test]
fn test_countdown_shows_time_to_next_wave() {
    let mut engine = started(debug_waves());
    let snap = engine.tick(&idle(), DT);
    assert_ne!(snap.hud.countdown, COUNTDOWN_PLACEHOLDER);
    assert!(snap.hud.countdown.starts_with("00:"));

    let first = snap.hud.countdown.clone();
    run_for(&mut engine, &idle(), 3.0, 0.1);
    let later = engine.tick(&idle(), DT).hud.countdown;
    assert_ne!(first, later, "countdown poll should refresh the text");
}

#[test]
fn test_set_difficulty_applies_to_next_run_only_when_idle() {
    let mut engine = engine_with(debug_waves());
    engine.queue_command(PlayerCommand::SetDifficulty {
        profile: DifficultyProfile::Hard,
    });
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick(&idle(), DT);

    while engine.wave_number() == 0 {
        engine.tick(&idle(), 0.1);
    }
    let hps: Vec<i32> = {
        let mut q = engine.world().query::<&Enemy>();
        q.iter().map(|(_, e)| e.hp).collect()
    };
    assert_eq!(hps.len() as u32, enemy_count(1, 1.15));
    assert!(hps.iter().all(|&hp| hp == 48));
}

// ---- Waves ----

#[test]
fn test_even_waves_upgrade_every_enemy_of_that_wave_only() {
    let mut engine = started(debug_waves());
    let mut last_wave = 0;
    // The first wave is armed before the start tick advances the clock.
    let mut last_time = 0.0;
    let mut waves: Vec<(u32, Vec<Option<WaveUpgrade>>, String)> = Vec::new();

    for _ in 0..1200 {
        engine.tick(&idle(), 0.1);
        let wave = engine.wave_number();
        if wave == last_wave {
            continue;
        }
        let now = engine.time().elapsed_secs;
        let gap = now - last_time;
        assert!(
            (15.0..=30.2).contains(&gap),
            "wave {wave} came {gap}s after the previous schedule"
        );
        last_time = now;

        let upgrades: Vec<Option<WaveUpgrade>> = {
            let mut q = engine.world().query::<&Enemy>();
            q.iter().map(|(_, e)| e.upgrade).collect()
        };
        waves.push((wave, upgrades, engine.message().to_string()));
        // Keep the player alive between waves.
        despawn_all::<Enemy>(&mut engine);
        last_wave = wave;
        if wave == 3 {
            break;
        }
    }

    assert_eq!(waves.len(), 3);

    let (_, w1, msg1) = &waves[0];
    assert_eq!(w1.len() as u32, enemy_count(1, 1.0));
    assert!(w1.iter().all(Option::is_none));
    assert_eq!(msg1, "Wave 1 incoming!");

    let (_, w2, msg2) = &waves[1];
    assert_eq!(w2.len() as u32, enemy_count(2, 1.0));
    let tag = w2[0].expect("even wave must carry an upgrade");
    assert!(w2.iter().all(|u| *u == Some(tag)));
    assert_eq!(
        msg2,
        &format!("Wave 2 incoming! (Wave upgrade: {})", tag.label())
    );

    let (_, w3, _) = &waves[2];
    assert_eq!(w3.len() as u32, enemy_count(3, 1.0));
    assert!(w3.iter().all(Option::is_none));
}

// ---- Combat ----

#[test]
fn test_enemy_dies_on_third_bullet_and_drops_loot() {
    let mut engine = started(GameConfig::default());
    despawn_all::<Asteroid>(&mut engine);
    let enemy = spawn_medium_enemy(&mut engine, Position::new(200.0, 200.0));

    let mut last_pos = Position::new(200.0, 200.0);
    for (damage, expected_hp) in [(12, Some(28)), (12, Some(16)), (20, None)] {
        last_pos = *engine.world().get::<&Position>(enemy).unwrap();
        world_setup::spawn_bullet(
            engine.world_mut(),
            BulletOwner::Player,
            last_pos,
            0.0,
            0.0,
            damage,
        );
        engine.tick(&idle(), DT);

        let hp = engine.world().get::<&Enemy>(enemy).ok().map(|e| e.hp);
        assert_eq!(hp, expected_hp);
    }

    assert!(!engine.world().contains(enemy));
    assert_eq!(count::<Bullet>(&engine), 0);

    let gems: Vec<(Position, u32)> = {
        let mut q = engine.world().query::<(&Gem, &Position)>();
        q.iter().map(|(_, (g, p))| (*p, g.value)).collect()
    };
    assert_eq!(gems.len(), 1);
    assert_eq!(gems[0].1, 12);
    assert!(gems[0].0.distance_to(&last_pos) < 2.0);
    assert_eq!(engine.message(), "Enemy destroyed +12g");
}

#[test]
fn test_gem_pickup_credits_ledger() {
    let mut engine = started(GameConfig::default());
    world_setup::spawn_gem(engine.world_mut(), Position::new(650.0, 360.0), 5);
    engine.tick(&idle(), DT);

    assert_eq!(engine.gems(), 55);
    assert_eq!(count::<Gem>(&engine), 0);
    assert_eq!(engine.message(), "Picked up 5g");
}

#[test]
fn test_gem_pickup_window_expires() {
    let mut engine = started(GameConfig::default());
    despawn_all::<Asteroid>(&mut engine);
    let enemy = spawn_medium_enemy(&mut engine, Position::new(200.0, 200.0));
    let at = *engine.world().get::<&Position>(enemy).unwrap();
    world_setup::spawn_bullet(engine.world_mut(), BulletOwner::Player, at, 0.0, 0.0, 100);
    engine.tick(&idle(), DT);

    let gem = entities_with::<Gem>(&engine)[0];
    assert!(engine.world().get::<&Gem>(gem).unwrap().pickup_enabled);

    run_for(&mut engine, &idle(), 10.5, 0.5);
    assert!(!engine.world().get::<&Gem>(gem).unwrap().pickup_enabled);

    // Expired gems stay on screen but cannot be collected.
    *engine.world().get::<&mut Position>(gem).unwrap() = Position::new(640.0, 360.0);
    engine.tick(&idle(), DT);
    assert!(engine.world().contains(gem));
    assert_eq!(engine.gems(), 50);
}

#[test]
fn test_enemy_contact_hits_shield_and_is_spent() {
    let mut engine = started(GameConfig::default());
    let enemy = spawn_medium_enemy(&mut engine, Position::new(660.0, 360.0));
    engine.tick(&idle(), DT);

    assert!(!engine.world().contains(enemy));
    assert_eq!(engine.defense().shield(), 88.0);
    assert_eq!(engine.defense().hull_hits(), 2);
    assert_eq!(engine.message(), "Shield hit -12");
}

#[test]
fn test_enemy_shot_down_on_contact_spares_shield() {
    let mut engine = started(GameConfig::default());
    let enemy = spawn_medium_enemy(&mut engine, Position::new(660.0, 360.0));
    world_setup::spawn_bullet(
        engine.world_mut(),
        BulletOwner::Player,
        Position::new(660.0, 360.0),
        0.0,
        0.0,
        40,
    );
    engine.tick(&idle(), DT);

    assert!(!engine.world().contains(enemy));
    assert_eq!(engine.defense().shield(), 100.0);
    assert_eq!(engine.message(), "Enemy destroyed +12g");
    // The drop lands after the pass, so it is collected on the next tick.
    assert_eq!(engine.gems(), 50);
    engine.tick(&idle(), DT);
    assert_eq!(engine.gems(), 62);
}

#[test]
fn test_bullet_mines_asteroid_and_drops_its_value() {
    let mut engine = started(GameConfig::default());
    despawn_all::<Asteroid>(&mut engine);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let large = world_setup::spawn_asteroid(
        engine.world_mut(),
        &mut rng,
        AsteroidTier::Large,
        Position::new(400.0, 200.0),
    );
    world_setup::spawn_bullet(
        engine.world_mut(),
        BulletOwner::Player,
        Position::new(400.0, 200.0),
        0.0,
        0.0,
        1,
    );
    let snap = engine.tick(&idle(), DT);
    assert_eq!(engine.world().get::<&Asteroid>(large).unwrap().hp, 11);
    assert!(snap.effects.is_empty(), "only a destroyed asteroid bursts");
    assert_eq!(count::<Bullet>(&engine), 0);
    assert_eq!(count::<Gem>(&engine), 0);

    let small_at = Position::new(200.0, 200.0);
    let small = world_setup::spawn_asteroid(engine.world_mut(), &mut rng, AsteroidTier::Small, small_at);
    let drop_value = engine.world().get::<&Asteroid>(small).unwrap().drop_value;
    assert!((1..=5).contains(&drop_value));
    world_setup::spawn_bullet(engine.world_mut(), BulletOwner::Player, small_at, 0.0, 0.0, 12);
    let snap = engine.tick(&idle(), DT);

    assert!(!engine.world().contains(small));
    assert_eq!(snap.effects, vec![VisualEffect::ImpactBurst { position: small_at }]);
    let gems: Vec<(Position, u32)> = {
        let mut q = engine.world().query::<(&Gem, &Position)>();
        q.iter().map(|(_, (g, p))| (*p, g.value)).collect()
    };
    assert_eq!(gems, vec![(small_at, drop_value)]);
    // Mining pays on pickup, not on destruction.
    assert_eq!(engine.gems(), 50);
}

#[test]
fn test_passive_asteroid_cadence_restarts_with_run() {
    let mut engine = started(GameConfig {
        asteroid_rates: AsteroidRates {
            small_pct: 100,
            medium_pct: 0,
            large_pct: 0,
        },
        ..Default::default()
    });
    run_for(&mut engine, &idle(), 2.0, 0.5);
    assert_eq!(count::<Asteroid>(&engine), 6);

    // Without the restart this tick would complete a 2.5 s poll.
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick(&idle(), 0.5);
    assert_eq!(count::<Asteroid>(&engine), 6);

    run_for(&mut engine, &idle(), 1.5, 0.5);
    assert_eq!(count::<Asteroid>(&engine), 6);
    engine.tick(&idle(), 0.5);
    assert_eq!(count::<Asteroid>(&engine), 7);
}

#[test]
fn test_enemy_rams_wall_until_destroyed() {
    let mut engine = started(GameConfig::default());
    let wall = world_setup::spawn_wall(engine.world_mut(), Position::new(300.0, 300.0));

    for expected in [70, 40, 10] {
        let enemy = spawn_medium_enemy(&mut engine, Position::new(330.0, 300.0));
        let snap = engine.tick(&idle(), DT);
        assert!(!engine.world().contains(enemy), "enemy is spent on impact");
        assert_eq!(engine.world().get::<&Wall>(wall).unwrap().hp, expected);
        assert!(!snap.effects.is_empty());
    }

    spawn_medium_enemy(&mut engine, Position::new(330.0, 300.0));
    engine.tick(&idle(), DT);
    assert!(!engine.world().contains(wall));
    // Shield untouched: the walls took every hit.
    assert_eq!(engine.defense().shield(), 100.0);
}

#[test]
fn test_turret_engages_enemy_in_range() {
    let mut engine = started(GameConfig::default());
    despawn_all::<Asteroid>(&mut engine);
    world_setup::spawn_turret(engine.world_mut(), Position::new(300.0, 300.0));
    let enemy = spawn_medium_enemy(&mut engine, Position::new(400.0, 300.0));

    // One cooldown (0.9 s) plus flight time, short of a second shot.
    run_for(&mut engine, &idle(), 1.5, DT);

    assert_eq!(engine.world().get::<&Enemy>(enemy).unwrap().hp, 40 - 18);
}

#[test]
fn test_turret_holds_fire_without_target() {
    let mut engine = started(GameConfig::default());
    world_setup::spawn_turret(engine.world_mut(), Position::new(300.0, 300.0));
    spawn_medium_enemy(&mut engine, Position::new(1200.0, 600.0));
    run_for(&mut engine, &idle(), 2.0, DT);

    let turret_bullets = {
        let mut q = engine.world().query::<&Bullet>();
        q.iter()
            .filter(|(_, b)| b.owner == BulletOwner::Turret)
            .count()
    };
    assert_eq!(turret_bullets, 0);
}

// ---- Player control ----

#[test]
fn test_player_fire_rate_and_bullet_ttl() {
    let mut engine = started(GameConfig::default());
    despawn_all::<Asteroid>(&mut engine);
    let firing = FrameInput {
        pointer: Position::new(1000.0, 360.0),
        pointer_down: true,
        ..Default::default()
    };

    run_for(&mut engine, &firing, 1.0, 0.05);
    let fired = count::<Bullet>(&engine);
    assert!((3..=5).contains(&fired), "fired {fired} shots in 1s");

    run_for(&mut engine, &idle(), 2.1, 0.05);
    assert_eq!(count::<Bullet>(&engine), 0, "bullets expire after 2s");
}

#[test]
fn test_player_moves_and_stays_in_arena() {
    let mut engine = started(GameConfig::default());
    let right = FrameInput {
        movement: MoveIntent::from_keys(false, false, false, true),
        pointer: Position::new(1280.0, 360.0),
        ..Default::default()
    };
    engine.tick(&right, 0.5);
    let snap = engine.tick(&right, 0.5);
    let player = snap
        .entities
        .iter()
        .find(|e| e.kind == SpriteKind::PlayerShip)
        .unwrap()
        .clone();
    assert!((player.position.x - 820.0).abs() < 1e-3);
    // Facing the pointer straight right: aim 0 plus the sprite offset.
    assert!((player.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);

    run_for(&mut engine, &right, 10.0, 0.5);
    let x = engine
        .world()
        .get::<&Position>(crate::registry::player_entity(engine.world()).unwrap())
        .unwrap()
        .x;
    assert_eq!(x, 1280.0 - 28.0);
}

// ---- Defense ----

#[test]
fn test_shield_regenerates_after_delay() {
    let mut engine = started(GameConfig::default());
    engine.hit_player(30);
    assert_eq!(engine.defense().shield(), 70.0);

    run_for(&mut engine, &idle(), 2.0, 0.5);
    assert_eq!(engine.defense().shield(), 70.0);

    run_for(&mut engine, &idle(), 2.0, 0.5);
    assert!(engine.defense().shield() > 70.0);
}

#[test]
fn test_death_triggers_delayed_full_reset() {
    let mut engine = started(GameConfig::default());
    buy_and_place(&mut engine, ShopItem::Turret, Position::new(200.0, 200.0));
    assert_eq!(count::<Turret>(&engine), 1);
    assert_eq!(engine.gems(), 0);

    engine.hit_player(200);
    assert_eq!(engine.defense().hull_hits(), 2, "overkill stays on the shield");
    engine.hit_player(1);
    assert_eq!(engine.message(), "Hull hit! 1 left");
    engine.hit_player(1);
    assert_eq!(engine.defense().hull_hits(), 0);
    assert_eq!(engine.message(), DYING_MESSAGE);

    // Further hits while dying change nothing and arm no second reset.
    let pending = engine.pending_timers();
    engine.hit_player(50);
    assert_eq!(engine.pending_timers(), pending);
    assert_eq!(engine.defense().hull_hits(), 0);

    engine.tick(&idle(), 0.5);
    assert!(engine.is_running(), "reset waits for the death delay");

    let snap = engine.tick(&idle(), 0.5);
    assert!(!snap.running);
    assert_eq!(snap.hud.gems, 50);
    assert_eq!(snap.hud.wave, 0);
    assert_eq!(snap.hud.shield_pct, 100.0);
    assert_eq!(snap.hud.hull_hits, 2);
    assert_eq!(snap.hud.message, DEATH_MESSAGE);
    assert_eq!(snap.hud.countdown, COUNTDOWN_PLACEHOLDER);
    assert_eq!(count::<Turret>(&engine), 0);
    assert_eq!(count::<Asteroid>(&engine), 0);
    assert_eq!(count::<Player>(&engine), 1);
    assert_eq!(engine.next_wave_at(), None);
    assert_eq!(engine.pending_timers(), 0);

    // The cancelled wave deadline never fires.
    engine.tick(&idle(), 700.0);
    assert_eq!(engine.wave_number(), 0);
    assert_eq!(count::<Enemy>(&engine), 0);

    engine.queue_command(PlayerCommand::StartRun);
    engine.tick(&idle(), DT);
    assert!(engine.is_running());
}

// ---- Shop and placement ----

#[test]
fn test_buy_wall_then_commit_valid() {
    let mut engine = started(GameConfig::default());
    engine.queue_command(PlayerCommand::BuyItem {
        item: ShopItem::Wall,
    });
    engine.tick(&idle(), DT);
    assert_eq!(engine.gems(), 40);
    assert_eq!(
        engine.purchase_state(),
        PlacementState::Pending {
            item: ShopItem::Wall,
            cost: 10
        }
    );

    engine.queue_command(PlayerCommand::ConfirmPlacement {
        position: Position::new(200.0, 200.0),
    });
    engine.tick(&idle(), DT);

    let walls: Vec<Position> = {
        let mut q = engine.world().query::<(&Wall, &Position)>();
        q.iter().map(|(_, (_, p))| *p).collect()
    };
    assert_eq!(walls, vec![Position::new(200.0, 200.0)]);
    assert_eq!(engine.purchase_state(), PlacementState::Idle);
    assert_eq!(engine.gems(), 40);
    assert_eq!(engine.message(), "Wall placed");
}

#[test]
fn test_commit_inside_player_clearance_keeps_charge() {
    let mut engine = started(GameConfig::default());
    buy_and_place(&mut engine, ShopItem::Wall, Position::new(650.0, 360.0));

    assert_eq!(count::<Wall>(&engine), 0);
    assert_eq!(engine.gems(), 40);
    assert_eq!(engine.purchase_state(), PlacementState::Idle);
    assert_eq!(engine.message(), "Invalid placement");
}

#[test]
fn test_cancel_placement_keeps_charge() {
    let mut engine = started(GameConfig::default());
    engine.queue_command(PlayerCommand::BuyItem {
        item: ShopItem::Turret,
    });
    engine.queue_command(PlayerCommand::CancelPlacement);
    engine.tick(&idle(), DT);
    assert_eq!(engine.gems(), 0);
    assert_eq!(engine.purchase_state(), PlacementState::Idle);
}

#[test]
fn test_insufficient_funds_leaves_balance() {
    let mut engine = started(GameConfig::default());
    engine.queue_command(PlayerCommand::BuyItem {
        item: ShopItem::NewShip,
    });
    engine.tick(&idle(), DT);
    assert_eq!(engine.gems(), 50);
    assert_eq!(engine.purchase_state(), PlacementState::Idle);
    assert_eq!(engine.message(), "Not enough gems");
}

#[test]
fn test_turret_cap_enforced_at_commit() {
    let mut engine = started(GameConfig {
        starting_gems: 1000,
        ..Default::default()
    });
    for i in 0..8 {
        buy_and_place(
            &mut engine,
            ShopItem::Turret,
            Position::new(100.0 + 60.0 * i as f32, 100.0),
        );
        assert_eq!(engine.message(), "Turret placed");
    }
    assert_eq!(count::<Turret>(&engine), 8);

    buy_and_place(&mut engine, ShopItem::Turret, Position::new(100.0, 600.0));
    assert_eq!(engine.message(), "Turret cap reached");
    assert_eq!(count::<Turret>(&engine), 8);
    assert_eq!(engine.gems(), 1000 - 9 * 50);
    assert_eq!(engine.purchase_state(), PlacementState::Idle);
}

#[test]
fn test_repair_commit() {
    let mut engine = started(GameConfig::default());
    buy_and_place(&mut engine, ShopItem::Wall, Position::new(300.0, 300.0));

    buy_and_place(&mut engine, ShopItem::Repair, Position::new(345.0, 300.0));
    assert_eq!(engine.message(), "Repaired wall");

    buy_and_place(&mut engine, ShopItem::Repair, Position::new(500.0, 500.0));
    assert_eq!(engine.message(), REPAIR_NO_WALL_MESSAGE);
    assert_eq!(engine.gems(), 50 - 10 - 5 - 5);
}

#[test]
fn test_ship_items_only_report() {
    let mut engine = started(GameConfig {
        starting_gems: 200,
        ..Default::default()
    });
    let before = engine.world().len();
    buy_and_place(&mut engine, ShopItem::ShipUpgrade, Position::new(200.0, 200.0));
    assert_eq!(engine.message(), "Placed item");
    assert_eq!(engine.gems(), 160);
    assert_eq!(engine.world().len(), before);
}

#[test]
fn test_shop_overlay_toggle_and_escape() {
    let mut engine = started(GameConfig::default());
    engine.queue_command(PlayerCommand::ToggleShop);
    assert!(engine.tick(&idle(), DT).shop_open);

    engine.queue_command(PlayerCommand::BuyItem {
        item: ShopItem::Wall,
    });
    assert!(!engine.tick(&idle(), DT).shop_open, "buying hides the shop");

    engine.queue_command(PlayerCommand::ToggleShop);
    engine.queue_command(PlayerCommand::Cancel);
    let snap = engine.tick(&idle(), DT);
    assert!(!snap.shop_open);
    assert!(snap.placement.is_none(), "escape drops the pending placement");
    assert_eq!(engine.gems(), 40);
}

#[test]
fn test_placement_ghost_tracks_pointer_validity() {
    let mut engine = started(GameConfig::default());
    engine.queue_command(PlayerCommand::BuyItem {
        item: ShopItem::Wall,
    });
    let near_player = FrameInput {
        pointer: Position::new(650.0, 360.0),
        ..Default::default()
    };
    let ghost = engine.tick(&near_player, DT).placement.unwrap();
    assert_eq!(ghost.item, ShopItem::Wall);
    assert_eq!(ghost.position, Position::new(650.0, 360.0));
    assert!(!ghost.valid);

    let open_space = FrameInput {
        pointer: Position::new(200.0, 200.0),
        ..Default::default()
    };
    assert!(engine.tick(&open_space, DT).placement.unwrap().valid);
}

#[test]
fn test_restart_mid_run_clears_structures() {
    let mut engine = started(GameConfig::default());
    buy_and_place(&mut engine, ShopItem::Wall, Position::new(300.0, 300.0));
    engine.hit_player(40);

    engine.queue_command(PlayerCommand::StartRun);
    engine.tick(&idle(), DT);
    assert!(engine.is_running());
    assert_eq!(count::<Wall>(&engine), 0);
    assert_eq!(engine.gems(), 50);
    assert_eq!(engine.defense().shield(), 100.0);

    let seen: HashSet<Entity> = entities_with::<Asteroid>(&engine).into_iter().collect();
    assert_eq!(seen.len(), 6);
}
