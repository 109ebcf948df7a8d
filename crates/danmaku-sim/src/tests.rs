//! Tests for the entity pools, scoring, spawn scheduling, collisions and the
//! engine tick pipeline.

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use danmaku_core::commands::{Loadout, PlayerCommand};
use danmaku_core::components::*;
use danmaku_core::config::*;
use danmaku_core::enums::*;
use danmaku_core::events::SimEvent;
use danmaku_core::state::GameStateSnapshot;

use crate::clock::ManualClock;
use crate::engine::{SimConfig, SimulationEngine};
use crate::pool::{EntityPool, PoolId};
use crate::score::ScoreState;
use crate::systems::behavior::{self, BehaviorBuffers};
use crate::systems::collision::{self, AreaHit, CollisionBuffers, CollisionContext, PlayerOutcome};
use crate::systems::effects::EffectsState;
use crate::systems::loot;
use crate::systems::wave_spawner::*;
use crate::world::World;
use crate::world_setup;

// ---- Helpers ----

fn place_hostile(world: &mut World, pos: Vec2, hp: f32) -> PoolId {
    let (id, hostile) = world.hostiles.acquire();
    *hostile = Hostile {
        active: true,
        pattern: Pattern::Straight,
        pos,
        target: pos,
        size: Vec2::splat(30.0),
        hp,
        max_hp: hp,
        points: 100,
        color: 0xef4444,
        ..Hostile::default()
    };
    id
}

fn place_projectile(world: &mut World, kind: ProjectileKind, pos: Vec2, damage: f32) -> PoolId {
    let (id, projectile) = world.projectiles.acquire();
    *projectile = Projectile {
        active: true,
        kind,
        pos,
        vel: Vec2::ZERO,
        size: 8.0,
        radius: (kind == ProjectileKind::Wave).then_some(20.0),
        damage,
        life: 60,
    };
    id
}

fn place_hostile_bullet(world: &mut World, pos: Vec2) {
    let (_, bullet) = world.hostile_projectiles.acquire();
    *bullet = HostileProjectile {
        active: true,
        pos,
        vel: Vec2::ZERO,
        size: 8.0,
        color: 0xffffff,
        life: 100,
    };
}

fn count_events(snapshot: &GameStateSnapshot, pred: impl Fn(&SimEvent) -> bool) -> usize {
    snapshot.events.iter().filter(|e| pred(e)).count()
}

/// Everything a collision pass borrows, owned in one place.
struct Harness {
    tables: GameTables,
    world: World,
    score: ScoreState,
    effects: EffectsState,
    rng: ChaCha8Rng,
    events: Vec<SimEvent>,
    buffers: CollisionBuffers,
}

impl Harness {
    fn new() -> Self {
        let tables = GameTables::default();
        let mut world = World::new(&tables);
        world.player.pos = Vec2::new(400.0, 500.0);
        Self {
            world,
            score: ScoreState::new(&tables.player),
            effects: EffectsState::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
            events: Vec::new(),
            buffers: CollisionBuffers::default(),
            tables,
        }
    }

    fn collide(&mut self, now_ms: u64) -> PlayerOutcome {
        let mut ctx = CollisionContext {
            world: &mut self.world,
            score: &mut self.score,
            effects: &mut self.effects,
            rng: &mut self.rng,
            events: &mut self.events,
            tables: &self.tables,
            now_ms,
        };
        collision::run(&mut ctx, &mut self.buffers)
    }
}

fn manual_engine(config: SimConfig) -> (SimulationEngine, ManualClock) {
    let clock = ManualClock::new(1_000);
    let engine = SimulationEngine::with_clock(config, clock.clone());
    (engine, clock)
}

fn started_engine(config: SimConfig) -> (SimulationEngine, ManualClock) {
    let (mut engine, clock) = manual_engine(config);
    engine.queue_command(PlayerCommand::StartRun {
        loadout: Loadout::default(),
    });
    engine.tick();
    (engine, clock)
}

// ---- Pools ----

#[test]
fn test_pool_reuses_released_slot_with_new_generation() {
    let mut pool: EntityPool<Particle> = EntityPool::new("particle", 4);
    let (first, _) = pool.acquire();
    let (second, _) = pool.acquire();
    assert_eq!(pool.active_count(), 2);

    assert!(pool.release(first));
    assert!(!pool.release(first), "Double release must be a no-op");
    assert_eq!(pool.active_count(), 1);

    let (third, _) = pool.acquire();
    assert_eq!(third.index(), first.index(), "Released slots are reused LIFO");
    assert_ne!(third, first);
    assert!(pool.get(first).is_none(), "Stale handle must not resolve");
    assert!(pool.get(third).is_some());
    assert!(pool.get(second).is_some());
}

#[test]
fn test_pool_grows_on_overflow() {
    let mut pool: EntityPool<Hostile> = EntityPool::new("hostile", 2);
    for _ in 0..5 {
        pool.acquire();
    }
    assert_eq!(pool.active_count(), 5);
    assert!(pool.capacity() >= 5);

    let released = pool.release_where(|_| true);
    assert_eq!(released, 5);
    assert!(pool.is_empty());
    assert!(pool.capacity() >= 5, "Capacity is kept after release");
}

#[test]
fn test_pool_release_where_and_batch() {
    let mut pool: EntityPool<Particle> = EntityPool::new("particle", 8);
    let ids: Vec<PoolId> = (0..6)
        .map(|i| {
            let (id, p) = pool.acquire();
            p.life = i as f32;
            id
        })
        .collect();

    assert_eq!(pool.release_where(|p| p.life < 2.0), 2);
    // Two of these are already gone.
    assert_eq!(pool.release_batch(ids[..4].iter().copied()), 2);
    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.active().count(), 2);
}

proptest! {
    #[test]
    fn prop_pool_tracks_live_handles(ops in prop::collection::vec((any::<bool>(), 0usize..64), 1..200)) {
        let mut pool: EntityPool<Projectile> = EntityPool::new("projectile", 8);
        let mut live: Vec<PoolId> = Vec::new();
        let mut dead: Vec<PoolId> = Vec::new();

        for (acquire, pick) in ops {
            if acquire || live.is_empty() {
                let (id, _) = pool.acquire();
                prop_assert!(!live.contains(&id));
                live.push(id);
            } else {
                let id = live.swap_remove(pick % live.len());
                prop_assert!(pool.release(id));
                prop_assert!(!pool.release(id));
                dead.push(id);
            }
        }

        prop_assert_eq!(pool.active_count(), live.len());
        prop_assert_eq!(pool.active().count(), live.len());
        for id in &live {
            prop_assert!(pool.get(*id).is_some());
        }
        for id in &dead {
            prop_assert!(pool.get(*id).is_none());
        }
    }
}

// ---- Score ----

#[test]
fn test_kill_uses_multiplier_before_combo_advances() {
    let settings = PlayerSettings::default();
    let mut score = ScoreState::new(&settings);
    score.combo = 4;
    assert_eq!(score.award_kill(100), 100);
    score.add_combo(settings.combo_reset_ticks);
    assert_eq!(score.combo, 5);
    assert_eq!(score.award_kill(100), 200);
    assert_eq!(score.score, 300);
    assert_eq!(score.kills, 2);
}

#[test]
fn test_combo_resets_after_window() {
    let mut score = ScoreState::default();
    score.add_combo(3);
    for _ in 0..3 {
        score.tick_combo();
    }
    assert_eq!(score.combo, 1);
    score.tick_combo();
    assert_eq!(score.combo, 0);
}

#[test]
fn test_level_up_is_strictly_after_interval() {
    let mut score = ScoreState::default();
    assert!(!score.tick_level(3));
    assert!(!score.tick_level(3));
    assert!(!score.tick_level(3));
    assert!(score.tick_level(3));
    assert_eq!(score.level, 2);
    assert_eq!(score.level_timer, 0);
}

proptest! {
    #[test]
    fn prop_multiplier_formula(combo in 0u32..500) {
        let mut score = ScoreState::default();
        score.combo = combo;
        prop_assert_eq!(score.multiplier(), (combo / 5 + 1).min(8));
    }
}

// ---- Collisions ----

#[test]
fn test_overlapping_bullets_award_a_single_kill() {
    let mut h = Harness::new();
    let target = place_hostile(&mut h.world, Vec2::new(100.0, 100.0), 60.0);
    for _ in 0..4 {
        place_projectile(&mut h.world, ProjectileKind::Bubble, Vec2::new(100.0, 100.0), 20.0);
    }

    h.collide(1_000);

    assert_eq!(h.score.kills, 1);
    assert_eq!(h.score.score, 100);
    assert_eq!(h.score.combo, 1);
    assert!(h.world.hostiles.get(target).is_none());
    let destroyed = h
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::HostileDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    // Dies on the third; the fourth finds only a dead target and stays in flight.
    assert_eq!(h.world.projectiles.active_count(), 1);
}

#[test]
fn test_bubble_is_consumed_by_first_target() {
    let mut h = Harness::new();
    let a = place_hostile(&mut h.world, Vec2::new(200.0, 200.0), 60.0);
    let b = place_hostile(&mut h.world, Vec2::new(200.0, 200.0), 60.0);
    place_projectile(&mut h.world, ProjectileKind::Bubble, Vec2::new(200.0, 200.0), 10.0);

    h.collide(1_000);

    let hp_a = h.world.hostiles.get(a).map(|h| h.hp).unwrap();
    let hp_b = h.world.hostiles.get(b).map(|h| h.hp).unwrap();
    assert_eq!(hp_a + hp_b, 110.0, "Exactly one hostile takes the hit");
    assert!(h.world.projectiles.is_empty());
}

#[test]
fn test_continuous_damage_immunity_window() {
    let mut h = Harness::new();
    let target = place_hostile(&mut h.world, Vec2::new(300.0, 200.0), 100.0);
    place_projectile(&mut h.world, ProjectileKind::Wave, Vec2::new(300.0, 200.0), 20.0);
    let hp = |h: &Harness| h.world.hostiles.get(target).map(|t| t.hp).unwrap();

    h.collide(1_000);
    assert_eq!(hp(&h), 80.0);
    h.collide(1_150);
    assert_eq!(hp(&h), 80.0, "Inside the 200 ms window");
    h.collide(1_250);
    assert_eq!(hp(&h), 60.0);
    assert_eq!(h.world.projectiles.active_count(), 1, "Shockwaves are never consumed");
}

#[test]
fn test_boss_kill_counts_once() {
    let mut h = Harness::new();
    h.world.bosses.push(Hostile {
        active: true,
        pattern: Pattern::Boss,
        pos: Vec2::new(400.0, 150.0),
        size: Vec2::new(120.0, 100.0),
        hp: 10.0,
        max_hp: 1500.0,
        points: 5000,
        ..Hostile::default()
    });
    place_projectile(&mut h.world, ProjectileKind::Bubble, Vec2::new(400.0, 150.0), 10.0);
    place_projectile(&mut h.world, ProjectileKind::Bubble, Vec2::new(400.0, 150.0), 10.0);

    h.collide(1_000);

    assert!(h.world.bosses.is_empty());
    assert_eq!(h.score.bosses_defeated, 1);
    assert_eq!(h.score.score, 5000);
    assert!(h.events.contains(&SimEvent::BossDefeated { points: 5000 }));
    assert_eq!(h.effects.shake_ticks, 50);
}

#[test]
fn test_player_takes_one_hit_per_tick() {
    let mut h = Harness::new();
    let pos = h.world.player.pos;
    place_hostile_bullet(&mut h.world, pos);
    place_hostile_bullet(&mut h.world, pos);
    h.score.combo = 7;

    assert_eq!(h.collide(1_000), PlayerOutcome::Hit);
    assert_eq!(h.world.player.hp, 80.0);
    assert_eq!(h.world.player.invulnerable, 60);
    assert_eq!(h.score.combo, 0);

    assert_eq!(h.collide(1_016), PlayerOutcome::Unharmed);
    assert_eq!(h.world.player.hp, 80.0);
}

#[test]
fn test_last_life_reports_game_over() {
    let mut h = Harness::new();
    h.score.lives = 2;
    h.world.player.hp = 10.0;
    let pos = h.world.player.pos;
    place_hostile_bullet(&mut h.world, pos);

    assert_eq!(h.collide(1_000), PlayerOutcome::LifeLost);
    assert_eq!(h.score.lives, 1);
    assert_eq!(h.world.player.hp, h.world.player.max_hp);
    assert_eq!(h.world.player.shield, 50.0);
    assert_eq!(h.world.player.invulnerable, 180);

    h.world.player.hp = 0.0;
    assert_eq!(h.collide(1_016), PlayerOutcome::GameOver);
    assert_eq!(h.score.lives, 0);
}

#[test]
fn test_radius_damage_is_inclusive_and_hits_bosses() {
    let mut h = Harness::new();
    let center = Vec2::new(200.0, 200.0);
    let on_edge = place_hostile(&mut h.world, center + Vec2::new(100.0, 0.0), 60.0);
    let outside = place_hostile(&mut h.world, center + Vec2::new(100.5, 0.0), 60.0);
    h.world.bosses.push(Hostile {
        pattern: Pattern::Boss,
        pos: center,
        hp: 100.0,
        ..Hostile::default()
    });
    h.world.player.pos = center + Vec2::new(0.0, 50.0);

    let hits = collision::radius_damage(&mut h.world, center, 100.0, 25.0, true, 60);
    assert_eq!(hits, vec![AreaHit::Hostile(on_edge), AreaHit::Boss(0)]);
    assert_eq!(h.world.hostiles.get(outside).map(|t| t.hp), Some(60.0));
    assert_eq!(h.world.bosses[0].hp, 75.0);
    assert_eq!(h.world.player.hp, 100.0);

    let hits = collision::radius_damage(&mut h.world, center, 100.0, 25.0, false, 60);
    assert!(hits.contains(&AreaHit::Player));
    assert_eq!(h.world.player.hp, 75.0);

    // Invulnerable now, so the next blast passes through.
    let hits = collision::radius_damage(&mut h.world, center, 100.0, 25.0, false, 60);
    assert!(!hits.contains(&AreaHit::Player));
}

#[test]
fn test_line_damage_width() {
    let mut h = Harness::new();
    let near = place_hostile(&mut h.world, Vec2::new(300.0, 215.0), 60.0);
    let far = place_hostile(&mut h.world, Vec2::new(300.0, 230.0), 60.0);

    let hits = collision::line_damage(
        &mut h.world,
        Vec2::new(0.0, 200.0),
        Vec2::new(800.0, 200.0),
        20.0,
        60.0,
    );
    assert_eq!(hits, vec![AreaHit::Hostile(near)]);
    assert!(h.world.hostiles.get(near).is_some_and(Hostile::is_dead));

    // Resolved by the next main pass.
    h.collide(1_000);
    assert!(h.world.hostiles.get(near).is_none());
    assert!(h.world.hostiles.get(far).is_some());
    assert_eq!(h.score.kills, 1);
}

// ---- Loot ----

#[test]
fn test_companion_cap_still_grants_special() {
    let mut h = Harness::new();
    let at = h.world.player.pos;
    for _ in 0..3 {
        loot::apply_pickup(
            &mut h.world,
            &h.tables,
            &mut h.rng,
            PowerUpKind::Companion,
            at,
            &mut h.events,
        );
    }
    assert_eq!(h.world.companions.len(), 2);
    assert_eq!(h.world.player.special, 30.0);
    let joined = h
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::CompanionJoined { .. }))
        .count();
    let collected = h
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::PowerUpCollected { .. }))
        .count();
    assert_eq!(joined, 2);
    assert_eq!(collected, 3);
}

#[test]
fn test_pickup_collected_on_contact() {
    let mut h = Harness::new();
    h.world.player.hp = 40.0;
    h.world.power_ups.push(PowerUp {
        kind: PowerUpKind::Health,
        pos: h.world.player.pos,
        size: 25.0,
        speed: 2.0,
        angle: 0.0,
    });
    h.collide(1_000);
    assert!(h.world.power_ups.is_empty());
    assert_eq!(h.world.player.hp, 90.0);
}

// ---- Hostile behavior ----

/// Run the behavior system for `ticks` ticks with the clock advancing 16 ms
/// per tick; returns the hostile projectiles emitted.
fn run_behavior(world: &mut World, tables: &GameTables, flocking: bool, ticks: u64) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut buffers = BehaviorBuffers::default();
    (1..=ticks)
        .map(|tick| behavior::run(world, tables, &mut rng, tick * 16, flocking, &mut buffers))
        .sum()
}

#[test]
fn test_default_sine_hostile_holds_fire() {
    let tables = GameTables::default();
    let mut world = World::new(&tables);
    world.player.pos = Vec2::new(400.0, 500.0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    world_setup::spawn_hostile(&mut world, &tables, &mut rng, HostileKind::Sine, Vec2::new(400.0, 100.0), 0);

    assert_eq!(run_behavior(&mut world, &tables, false, 600), 0);
    assert_eq!(world.hostile_projectiles.active_count(), 0);
}

#[test]
fn test_sine_fire_pattern_from_tables() {
    let mut tables = GameTables::default();
    tables.hostiles.sine.fire = Some(FirePattern::Spread);
    let mut world = World::new(&tables);
    world.player.pos = Vec2::new(400.0, 500.0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    world_setup::spawn_hostile(&mut world, &tables, &mut rng, HostileKind::Sine, Vec2::new(400.0, 100.0), 0);

    let emitted = run_behavior(&mut world, &tables, false, 600);
    assert!(emitted > 0);
    assert_eq!(emitted % 3, 0, "Spread volleys are three shots");
    assert_eq!(world.hostile_projectiles.active_count(), emitted);
}

#[test]
fn test_flocking_spreads_close_hostiles() {
    let tables = GameTables::default();
    let pair_distance = |flocking: bool| {
        let mut world = World::new(&tables);
        world.player.pos = Vec2::new(400.0, 500.0);
        let a = place_hostile(&mut world, Vec2::new(390.0, 100.0), 60.0);
        let b = place_hostile(&mut world, Vec2::new(400.0, 100.0), 60.0);
        run_behavior(&mut world, &tables, flocking, 5);
        let pos = |id| world.hostiles.get(id).map(|h| h.pos).unwrap();
        pos(a).distance(pos(b))
    };
    assert!(pair_distance(true) > pair_distance(false));
}

// ---- Spawn scheduling ----

fn view(live_hostiles: usize) -> SpawnView {
    SpawnView {
        live_hostiles,
        live_bosses: 0,
        now_ms: 0,
    }
}

#[test]
fn test_scripted_wave_spawns_in_offset_order() {
    let tables = GameTables::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut scheduler = ScriptedWaves::new(WaveScript(vec![WaveDef::Assault {
        name: "Pair".into(),
        groups: vec![
            SpawnGroup {
                kind: HostileKind::Straight,
                count: 3,
                interval: 60,
            },
            SpawnGroup {
                kind: HostileKind::Sine,
                count: 2,
                interval: 90,
            },
        ],
    }]));
    let mut out = Vec::new();
    let mut events = Vec::new();
    let mut spawns = Vec::new();

    for step in 1..=500u32 {
        out.clear();
        scheduler.advance(&view(1), &tables, &mut rng, &mut out, &mut events);
        for request in &out {
            if let SpawnRequest::Hostile { kind, pos } = *request {
                assert!(pos.y < 0.0, "Scripted spawns enter from the top");
                assert!((0.0..=tables.arena.width).contains(&pos.x));
                spawns.push((step, kind));
            }
        }
        if step == 1 {
            // The wave opens immediately; spawns wait out the initial delay.
            assert_eq!(scheduler.state(), WaveState::Spawning);
            assert_eq!(scheduler.pending(), 5);
            assert_eq!(scheduler.label().as_deref(), Some("WAVE: Pair"));
        }
    }

    let kinds: Vec<HostileKind> = spawns.iter().map(|(_, k)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            HostileKind::Straight,
            HostileKind::Sine,
            HostileKind::Straight,
            HostileKind::Sine,
            HostileKind::Straight,
        ]
    );
    let steps: Vec<u32> = spawns.iter().map(|(s, _)| *s).collect();
    assert_eq!(steps, vec![180, 181, 241, 331, 451]);
    assert_eq!(scheduler.state(), WaveState::WaitingForClear);
    assert_eq!(scheduler.label().as_deref(), Some("WAVE: Pair"));
    assert!(events.contains(&SimEvent::WaveStarted {
        index: 0,
        name: "Pair".into(),
    }));

    // Live hostiles keep the wave open; clearing them ends it.
    scheduler.advance(&view(1), &tables, &mut rng, &mut out, &mut events);
    assert_eq!(scheduler.state(), WaveState::WaitingForClear);
    scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    assert_eq!(scheduler.state(), WaveState::Intermission);
    assert_eq!(scheduler.timer(), 180);
    assert_eq!(scheduler.label().as_deref(), Some("WAVE CLEARED!"));
    assert!(events.contains(&SimEvent::WaveCleared { index: 0 }));
}

#[test]
fn test_scripted_boss_wave_and_loop() {
    let tables = GameTables::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut scheduler = ScriptedWaves::new(WaveScript(vec![
        WaveDef::Boss { name: "Finale".into() },
        WaveDef::Breather {
            name: "Rest".into(),
            duration: 30,
        },
    ]));
    let mut out = Vec::new();
    let mut events = Vec::new();

    scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    assert_eq!(out, vec![SpawnRequest::Boss]);
    assert_eq!(scheduler.index(), Some(0));
    assert_eq!(scheduler.state(), WaveState::WaitingForClear);

    // The clear check waits for the initial delay to run out.
    for _ in 0..178 {
        scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    }
    assert_eq!(scheduler.state(), WaveState::WaitingForClear);

    // Cleared: the breather that follows sets the intermission length.
    scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    assert_eq!(scheduler.state(), WaveState::Intermission);
    assert_eq!(scheduler.timer(), 30);

    for _ in 0..30 {
        scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    }
    assert_eq!(scheduler.index(), Some(1));
    assert_eq!(scheduler.state(), WaveState::Intermission);

    for _ in 0..30 {
        scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    }
    assert_eq!(scheduler.index(), Some(0), "Script loops back to the start");
    assert_eq!(out.len(), 2);
}

#[test]
fn test_endless_escalates_and_spawns_one_boss() {
    let tables = GameTables::default();
    let settings = EndlessSettings {
        difficulty_ticks: 10,
        boss_after_ms: 5_000,
        ..EndlessSettings::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut scheduler = EndlessWaves::new(&settings, 0);
    let mut out = Vec::new();
    let mut events = Vec::new();

    scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    let Some(SpawnRequest::Hostile { pos, .. }) = out.first().copied() else {
        panic!("First advance should spawn, got {out:?}");
    };
    let d = settings.spawn_distance;
    let arena = tables.arena;
    assert!(
        pos.x == -d || pos.y == -d || pos.x == arena.width + d || pos.y == arena.height + d,
        "Spawn {pos:?} should sit on an edge"
    );

    for _ in 0..9 {
        scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    }
    assert_eq!(scheduler.spawn_interval(), settings.base_spawn_interval - settings.spawn_interval_step);
    assert_eq!(scheduler.max_hostiles(), settings.base_max_hostiles + settings.max_hostiles_step);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::DifficultyRaised { .. })));

    let late = SpawnView {
        now_ms: 5_000,
        ..view(0)
    };
    out.clear();
    scheduler.advance(&late, &tables, &mut rng, &mut out, &mut events);
    scheduler.advance(&late, &tables, &mut rng, &mut out, &mut events);
    let bosses = out.iter().filter(|r| **r == SpawnRequest::Boss).count();
    assert_eq!(bosses, 1);
    assert!(scheduler.boss_spawned());
}

#[test]
fn test_endless_respects_hostile_cap() {
    let tables = GameTables::default();
    let settings = EndlessSettings::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut scheduler = EndlessWaves::new(&settings, 0);
    let mut out = Vec::new();
    let mut events = Vec::new();

    scheduler.advance(&view(settings.base_max_hostiles), &tables, &mut rng, &mut out, &mut events);
    assert!(out.is_empty());
    scheduler.advance(&view(0), &tables, &mut rng, &mut out, &mut events);
    assert_eq!(out.len(), 1);
}

#[test]
fn test_endless_interval_floor() {
    let tables = GameTables::default();
    let settings = EndlessSettings {
        difficulty_ticks: 1,
        ..EndlessSettings::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut scheduler = EndlessWaves::new(&settings, 0);
    let mut out = Vec::new();
    let mut events = Vec::new();
    for _ in 0..100 {
        scheduler.advance(&view(usize::MAX), &tables, &mut rng, &mut out, &mut events);
    }
    assert_eq!(scheduler.spawn_interval(), settings.min_spawn_interval);
    assert_eq!(scheduler.max_hostiles(), settings.max_hostiles_ceiling);
}

// ---- Engine ----

#[test]
fn test_determinism_same_seed() {
    let config = || SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let (mut engine_a, clock_a) = manual_engine(config());
    let (mut engine_b, clock_b) = manual_engine(config());
    engine_a.queue_command(PlayerCommand::StartRun {
        loadout: Loadout::default(),
    });
    engine_b.queue_command(PlayerCommand::StartRun {
        loadout: Loadout::default(),
    });

    for i in 0..600 {
        let aim = PlayerCommand::SetAim {
            x: 400.0 + (i as f32 * 0.05).sin() * 200.0,
            y: 450.0,
        };
        engine_a.queue_command(aim.clone());
        engine_b.queue_command(aim);
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
        clock_a.advance(16);
        clock_b.advance(16);
    }
    assert!(engine_a.world().counts().total() > 0);
}

#[test]
fn test_start_run_and_snapshot() {
    let (mut engine, _clock) = manual_engine(SimConfig::default());
    assert_eq!(engine.phase(), GamePhase::Menu);

    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert_eq!(snapshot.time.tick, 0, "Menu ticks do not advance time");

    engine.queue_command(PlayerCommand::StartRun {
        loadout: Loadout {
            body: BodyId::Metal,
            weapon: WeaponId::Flame,
            engine: EngineId::Fan,
        },
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Active);
    assert_eq!(snapshot.time.tick, 1);
    assert_eq!(snapshot.player.weapon, WeaponId::Flame);
    assert_eq!(snapshot.hud.lives, 3);
    assert_eq!(snapshot.hud.level, 1);
    assert_eq!(snapshot.hud.wave_state, Some(WaveState::Spawning));
    assert_eq!(snapshot.hud.wave_label.as_deref(), Some("WAVE: Vanguard"));
    assert_eq!(
        count_events(&snapshot, |e| matches!(e, SimEvent::WaveStarted { index: 0, .. })),
        1
    );
    assert!(snapshot.hostiles.is_empty(), "First spawn waits out the initial delay");
    assert_eq!(snapshot.projectiles.len(), 1, "Auto-fire on the first tick");
    assert_eq!(engine.profile().total_games, 1);
}

#[test]
fn test_pause_freezes_ticks_not_wall_clock() {
    let (mut engine, clock) = started_engine(SimConfig::default());
    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10, "Time should not advance while paused");
    assert_eq!(engine.phase(), GamePhase::Paused);
    let shots_before = engine.world().projectiles.active_count();

    // The weapon cooldown elapses during the pause.
    clock.advance(10_000);
    engine.queue_command(PlayerCommand::TogglePause);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().tick, 11);
    assert_eq!(engine.world().projectiles.active_count(), shots_before + 1);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active, "Resume while active is a no-op");
}

#[test]
fn test_dash_only_with_pulse_engine() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::Dash);
    let snapshot = engine.tick();
    assert_eq!(count_events(&snapshot, |e| *e == SimEvent::Dashed), 0);

    let (mut engine, _clock) = manual_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartRun {
        loadout: Loadout {
            engine: EngineId::Pulse,
            ..Loadout::default()
        },
    });
    engine.tick();
    engine.queue_command(PlayerCommand::SetAim { x: 100.0, y: 500.0 });
    engine.queue_command(PlayerCommand::Dash);
    let start_x = engine.world().player.pos.x;
    let snapshot = engine.tick();
    assert_eq!(count_events(&snapshot, |e| *e == SimEvent::Dashed), 1);
    assert!(snapshot.player.dashing);
    assert!(snapshot.player.invulnerable);
    assert!(engine.world().player.pos.x <= start_x - 35.0 + 1e-3);

    // On cooldown.
    engine.queue_command(PlayerCommand::Dash);
    let snapshot = engine.tick();
    assert_eq!(count_events(&snapshot, |e| *e == SimEvent::Dashed), 0);
}

#[test]
fn test_special_needs_full_meter() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::UseSpecial);
    let snapshot = engine.tick();
    assert!(!snapshot.hud.slow_motion);

    engine.world_mut().player.special = 100.0;
    engine.queue_command(PlayerCommand::UseSpecial);
    let snapshot = engine.tick();
    assert_eq!(count_events(&snapshot, |e| *e == SimEvent::SlowMotionStarted), 1);
    assert!(snapshot.hud.slow_motion);
    assert_eq!(snapshot.hud.special, 0.0, "No charge during slow motion");
}

#[test]
fn test_game_over_fires_once() {
    let mut tables = GameTables::default();
    tables.player.initial_lives = 1;
    let (mut engine, _clock) = started_engine(SimConfig {
        tables,
        ..Default::default()
    });

    let pos = engine.world().player.pos;
    engine.world_mut().player.hp = 10.0;
    place_hostile_bullet(engine.world_mut(), pos);
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::GameOver);
    assert_eq!(count_events(&snapshot, |e| *e == SimEvent::GameOver), 1);
    assert!(snapshot
        .events
        .contains(&SimEvent::LifeLost { lives_left: 0 }));
    let stats = snapshot.final_stats.expect("final stats after game over");
    assert_eq!(stats.ticks, 2);
    assert!(!stats.new_high_score);

    let frozen = engine.time();
    for _ in 0..5 {
        let snapshot = engine.tick();
        assert_eq!(count_events(&snapshot, |e| *e == SimEvent::GameOver), 0);
    }
    assert_eq!(engine.time(), frozen);

    engine.queue_command(PlayerCommand::Restart);
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Active);
    assert!(snapshot.final_stats.is_none());
    assert_eq!(snapshot.hud.lives, 1);
    assert_eq!(engine.profile().total_games, 2);
}

#[test]
fn test_high_score_recorded_at_game_over() {
    let mut tables = GameTables::default();
    tables.player.initial_lives = 1;
    let (mut engine, _clock) = started_engine(SimConfig {
        tables,
        ..Default::default()
    });
    engine.score_mut().score = 1_234;
    let pos = engine.world().player.pos;
    engine.world_mut().player.hp = 1.0;
    place_hostile_bullet(engine.world_mut(), pos);
    engine.tick();

    assert_eq!(engine.profile().high_score, 1_234);
    assert!(engine.final_stats().is_some_and(|s| s.new_high_score));
}

#[test]
fn test_area_kill_resolved_next_tick() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    let id = place_hostile(engine.world_mut(), Vec2::new(100.0, 300.0), 40.0);
    let hits = engine.radius_damage(Vec2::new(100.0, 300.0), 50.0, 60.0, true);
    assert_eq!(hits, vec![AreaHit::Hostile(id)]);

    let snapshot = engine.tick();
    assert_eq!(snapshot.hud.kills, 1);
    assert_eq!(snapshot.hud.score, 100);
    assert_eq!(engine.profile().total_kills, 1);
    assert!(snapshot.events.contains(&SimEvent::AchievementUnlocked {
        id: AchievementId::FirstKill,
    }));
}

#[test]
fn test_achievement_unlocks_once() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    engine.score_mut().score = 5_000;
    let snapshot = engine.tick();
    assert_eq!(
        count_events(&snapshot, |e| *e
            == SimEvent::AchievementUnlocked {
                id: AchievementId::Score5k
            }),
        1
    );
    let snapshot = engine.tick();
    assert_eq!(
        count_events(&snapshot, |e| matches!(e, SimEvent::AchievementUnlocked { .. })),
        0
    );
    assert!(engine.profile().achievements.contains(&AchievementId::Score5k));
}

#[test]
fn test_return_to_menu_clears_run() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    place_hostile(engine.world_mut(), Vec2::new(100.0, 100.0), 60.0);
    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert!(snapshot.hostiles.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.hud.wave_label, None);
    assert_eq!(engine.world().counts().total(), 0);
}

#[test]
fn test_endless_run_spawns_on_first_tick() {
    let (engine, _clock) = started_engine(SimConfig {
        scheduler: SchedulerKind::Endless,
        ..Default::default()
    });
    assert_eq!(engine.world().hostiles.active_count(), 1);

    let (mut engine, _clock) = started_engine(SimConfig {
        scheduler: SchedulerKind::Endless,
        ..Default::default()
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.hud.wave_label.as_deref(), Some("ENDLESS"));
    assert_eq!(snapshot.hud.wave_state, None);
}

#[test]
fn test_invalid_aim_keeps_last_aim() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::SetAim { x: 200.0, y: 400.0 });
    engine.tick();
    engine.queue_command(PlayerCommand::SetAim {
        x: f32::NAN,
        y: 400.0,
    });
    engine.tick();
    assert_eq!(engine.world().aim, Vec2::new(200.0, 400.0));
}

#[test]
fn test_events_drain_each_tick() {
    let (mut engine, _clock) = started_engine(SimConfig::default());
    engine.world_mut().player.special = 100.0;
    engine.queue_command(PlayerCommand::UseSpecial);
    let snapshot = engine.tick();
    assert!(!snapshot.events.is_empty());
    let snapshot = engine.tick();
    assert_eq!(count_events(&snapshot, |e| *e == SimEvent::SlowMotionStarted), 0);
}
