//! Arena constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Wave pacing ---

/// Pause between the end of one wave and the start of the next (seconds).
pub const TIME_BETWEEN_WAVES: f32 = 5.0;

/// Per-endless-wave health scalar base. Applied as `base^endless_index`
/// to enemies spawned in synthetic waves.
pub const ENEMY_HEALTH_MULTIPLIER: f32 = 1.1;

/// Per-endless-wave damage scalar base.
pub const ENEMY_DAMAGE_MULTIPLIER: f32 = 1.05;

/// Spawn interval shrink factor for synthetic waves (< 1 means faster spawns).
pub const SPAWN_RATE_MULTIPLIER: f32 = 0.95;

/// Enemy count growth factor for synthetic waves.
pub const ENDLESS_COUNT_GROWTH: f32 = 1.2;

/// Wave duration growth factor for synthetic waves.
pub const ENDLESS_DURATION_GROWTH: f32 = 1.1;

// --- Player defaults ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_BASE_DAMAGE: f32 = 10.0;
pub const PLAYER_MOVE_SPEED: f32 = 5.0;

// --- Economy ---

/// Preference-store key for the persistent gold balance.
pub const CURRENCY_KEY: &str = "player_currency";

// --- Enemy lifecycle ---

/// Delay between an enemy's death and its despawn, leaving time for
/// a death animation on the presentation side (seconds).
pub const DEATH_DESPAWN_DELAY: f32 = 4.0;

// --- Consumable effects ---

pub const HEALTH_POTION_HEAL: f32 = 50.0;
pub const TEMP_BOOST_AMOUNT: f32 = 10.0;
pub const TEMP_BOOST_DURATION: f32 = 30.0;

// --- Persistent effect actors ---

pub const FIREBALL_DAMAGE: f32 = 10.0;
pub const FIREBALL_RADIUS: f32 = 2.0;
pub const FIREBALL_ROTATION_DEG_PER_SEC: f32 = 180.0;

pub const SWORD_DAMAGE: f32 = 25.0;
pub const SWORD_RANGE: f32 = 3.0;
pub const SWORD_INTERVAL: f32 = 5.0;
