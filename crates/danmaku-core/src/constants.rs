//! Simulation constants and tuning parameters.
//!
//! Values that a host may want to rebalance live in [`crate::config::GameTables`];
//! the constants here are the defaults those tables start from, plus fixed
//! mechanics that are not configurable.

/// Nominal host frame rate (Hz). One tick per frame.
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Default arena width.
pub const ARENA_WIDTH: f32 = 800.0;

/// Default arena height.
pub const ARENA_HEIGHT: f32 = 600.0;

/// Margin beyond the arena at which projectiles are culled.
pub const PROJECTILE_CULL_MARGIN: f32 = 50.0;

/// Margin beyond the arena at which regular hostiles are culled.
pub const HOSTILE_CULL_MARGIN: f32 = 200.0;

/// Power-ups are removed once they fall this far below the arena.
pub const POWER_UP_CULL_MARGIN: f32 = 50.0;

// --- Pools ---

pub const POOL_PROJECTILES: usize = 200;
pub const POOL_HOSTILES: usize = 100;
pub const POOL_HOSTILE_PROJECTILES: usize = 300;
pub const POOL_PARTICLES: usize = 400;

/// Live entity total above which the performance probe warns.
pub const ENTITY_WARN_THRESHOLD: usize = 500;

/// Minimum ticks between two performance warnings.
pub const ENTITY_WARN_INTERVAL_TICKS: u64 = 300;

// --- Player ---

/// Player hull size (width and height).
pub const PLAYER_SIZE: f32 = 35.0;

/// Player spawns this far above the bottom edge.
pub const PLAYER_SPAWN_OFFSET_Y: f32 = 100.0;

pub const INITIAL_LIVES: u32 = 3;
pub const MAX_SPECIAL: f32 = 100.0;
pub const MAX_SHIELD: f32 = 100.0;

/// Special meter gain per tick (outside slow motion).
pub const SPECIAL_CHARGE_RATE: f32 = 0.1;

/// Special meter gain per combo step.
pub const SPECIAL_COMBO_BONUS: f32 = 2.0;

/// Special meter gain per power-up pickup.
pub const SPECIAL_PICKUP_BONUS: f32 = 10.0;

/// Slow-motion duration after the special is used (ticks).
pub const SLOW_MOTION_TICKS: u32 = 300;

/// Invulnerability after taking a hit (ticks).
pub const HIT_INVULNERABILITY_TICKS: i32 = 60;

/// Invulnerability after losing a life (ticks).
pub const RESPAWN_INVULNERABILITY_TICKS: i32 = 180;

/// Shield granted on respawn.
pub const RESPAWN_SHIELD: f32 = 50.0;

/// Invulnerability held while dashing (ticks).
pub const DASH_INVULNERABILITY_TICKS: i32 = 10;

pub const DASH_TICKS: u32 = 10;
pub const DASH_COOLDOWN_TICKS: u32 = 60;
pub const DASH_SPEED: f32 = 35.0;

// --- Damage to the player ---

/// Contact damage from a hostile unit or boss.
pub const UNIT_CONTACT_DAMAGE: f32 = 30.0;

/// Damage from a hostile projectile.
pub const PROJECTILE_CONTACT_DAMAGE: f32 = 20.0;

// --- Combo / score ---

/// Ticks of inactivity before the combo resets.
pub const COMBO_RESET_TICKS: u32 = 180;

/// Highest combo multiplier.
pub const MAX_COMBO_MULTIPLIER: u32 = 8;

/// Combo steps per multiplier increment.
pub const COMBO_STEP: u32 = 5;

/// Ticks per level.
pub const LEVEL_UP_TICKS: u32 = 2400;

// --- Continuous damage ---

/// Immunity window for `wave` hits against one target (ms).
pub const WAVE_IMMUNITY_MS: u64 = 200;

/// Immunity window for `flame` hits against one target (ms).
pub const FLAME_IMMUNITY_MS: u64 = 100;

/// Hit-flash duration set on a damaged hostile (ticks).
pub const HIT_FLASH_TICKS: u32 = 5;

/// Shockwave radius growth per tick.
pub const WAVE_GROWTH_PER_TICK: f32 = 10.0;

/// Shockwave is released once its radius exceeds this.
pub const WAVE_MAX_RADIUS: f32 = 300.0;

// --- Hostile behavior ---

/// Ticks between chase target refreshes.
pub const CHASE_REFRESH_TICKS: u32 = 60;

/// Per-tick probability that a regular hostile attempts to fire.
pub const HOSTILE_FIRE_CHANCE: f64 = 0.02;

/// Regular hostile fire cooldown (ms).
pub const HOSTILE_FIRE_COOLDOWN_MS: u64 = 2500;

/// Boss fire cooldown (ms).
pub const BOSS_FIRE_COOLDOWN_MS: u64 = 300;

/// Bosses descend until they reach this depth.
pub const BOSS_ENTRY_DEPTH: f32 = 100.0;

/// Sine hostiles chase at this fraction of their chase speed.
pub const SINE_CHASE_FACTOR: f32 = 0.7;

/// Sine weave phase advance per tick.
pub const SINE_PHASE_STEP: f32 = 0.1;

/// Sine weave amplitude.
pub const SINE_AMPLITUDE: f32 = 2.0;

/// Radial burst base-angle advance per emission (rad).
pub const RADIAL_ROTATION_STEP: f32 = 0.5;

// --- Flocking ---

pub const FLOCK_SEPARATION_RADIUS: f32 = 50.0;
pub const FLOCK_ALIGNMENT_RADIUS: f32 = 100.0;
pub const FLOCK_COHESION_STRENGTH: f32 = 0.5;
pub const FLOCK_WEIGHT: f32 = 0.1;

// --- Companions ---

pub const MAX_COMPANIONS: usize = 2;
pub const COMPANION_ORBIT_DISTANCE: f32 = 60.0;
pub const COMPANION_ORBIT_STEP: f32 = 0.05;
pub const COMPANION_FIRE_COOLDOWN_MS: u64 = 500;
pub const COMPANION_RADIUS: f32 = 8.0;

// --- Loot ---

pub const LOOT_DROP_CHANCE: f64 = 0.3;
pub const POWER_UP_SIZE: f32 = 25.0;
pub const POWER_UP_FALL_SPEED: f32 = 2.0;
pub const HEALTH_PICKUP_AMOUNT: f32 = 50.0;
pub const SHIELD_PICKUP_AMOUNT: f32 = 50.0;

// --- Scripted waves ---

/// Delay before the first scripted spawn of a run (ticks).
pub const FIRST_WAVE_DELAY_TICKS: i64 = 180;

/// Breather used after a cleared wave when the next entry is not a breather.
pub const DEFAULT_BREATHER_TICKS: i64 = 180;

// --- Endless mode ---

pub const ENDLESS_BASE_SPAWN_INTERVAL: i64 = 120;
pub const ENDLESS_MIN_SPAWN_INTERVAL: i64 = 20;
pub const ENDLESS_SPAWN_INTERVAL_STEP: i64 = 8;
pub const ENDLESS_BASE_MAX_HOSTILES: usize = 60;
pub const ENDLESS_MAX_HOSTILES_CEILING: usize = 120;
pub const ENDLESS_MAX_HOSTILES_STEP: usize = 8;
pub const ENDLESS_DIFFICULTY_TICKS: u32 = 1800;
pub const ENDLESS_SPAWN_DISTANCE: f32 = 60.0;
pub const ENDLESS_BOSS_AFTER_MS: u64 = 120_000;

// --- Effects ---

pub const KILL_SHAKE: (u32, f32) = (15, 5.0);
pub const BOSS_KILL_SHAKE: (u32, f32) = (50, 10.0);
pub const PLAYER_HIT_SHAKE: (u32, f32) = (20, 5.0);

pub const KILL_PARTICLES: u32 = 15;
pub const KILL_PARTICLE_LIFE: f32 = 1.2;
pub const PLAYER_HIT_PARTICLES: u32 = 10;
pub const PICKUP_PARTICLES: u32 = 10;
pub const DASH_START_PARTICLES: u32 = 30;
pub const DASH_START_PARTICLE_LIFE: f32 = 0.8;
pub const DASH_TRAIL_PARTICLES: u32 = 3;
pub const DASH_TRAIL_PARTICLE_LIFE: f32 = 0.5;

// --- Colors (0xRRGGBB) ---

pub const COLOR_PLAYER_HIT: u32 = 0xff4757;
pub const COLOR_PICKUP: u32 = 0xffd700;
pub const COLOR_COMPANION: u32 = 0x00d4ff;
