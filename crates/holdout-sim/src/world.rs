//! World components, spawn factories, and cleanup.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::constants;
use holdout_core::enums::{EnemyArchetype, UpgradeKind};
use holdout_core::stats::CombatantStats;
use holdout_core::types::Countdown;

use crate::scheduler::SpawnOrder;

/// Arena position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Marker plus per-enemy bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    pub gold_on_death: u32,
}

/// Corpses linger for a moment before despawning.
#[derive(Debug, Clone, Copy)]
pub struct DespawnTimer(pub Countdown);

/// Marker for entities created by shop purchases, so a full reset can
/// find and remove them.
#[derive(Debug, Clone, Copy)]
pub struct EffectActor {
    pub kind: UpgradeKind,
}

/// A fireball circling the player. Multiple fireballs share the orbit
/// at evenly spaced angles.
#[derive(Debug, Clone, Copy)]
pub struct OrbitingFireball {
    pub index: u32,
    pub total: u32,
    pub damage: f32,
    pub radius: f32,
    pub rotation_speed_deg: f32,
}

/// A sword that swings at fixed intervals, hitting everything in range.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicSword {
    pub damage: f32,
    pub swing_range: f32,
    pub swing_timer: Countdown,
    pub interval_secs: f32,
}

/// Spawn one enemy from an order, baking the order's difficulty scalars
/// into its stats. The archetype and spawn point are drawn from the
/// engine's seeded rng, so identical seeds produce identical arenas.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    spawn_points: &[Vec2],
    order: &SpawnOrder,
) -> Entity {
    let archetype = order.archetype_pool[rng.gen_range(0..order.archetype_pool.len())];
    let point = spawn_points[rng.gen_range(0..spawn_points.len())];
    let profile = archetype.profile();

    let stats = CombatantStats::new(
        profile.max_health * order.health_multiplier,
        profile.contact_damage * order.damage_multiplier,
        profile.move_speed,
    );

    world.spawn((
        Position(point),
        Enemy {
            archetype,
            gold_on_death: profile.gold_on_death,
        },
        stats,
    ))
}

/// Tick despawn timers and remove expired corpses.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run_cleanup(world: &mut World, dt: f32, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, timer) in world.query_mut::<&mut DespawnTimer>() {
        timer.0.tick(dt);
        if timer.0.finished() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Advance the temporary-boost windows of every living enemy.
pub fn run_stat_windows(world: &mut World, dt: f32) {
    for (_, stats) in world.query_mut::<&mut CombatantStats>() {
        stats.tick(dt);
    }
}

/// Mark a dead enemy for delayed despawn.
pub fn schedule_corpse_despawn(world: &mut World, entity: Entity) {
    let _ = world.insert_one(
        entity,
        DespawnTimer(Countdown::new(constants::DEATH_DESPAWN_DELAY)),
    );
}

/// Add one orbiting fireball, then respace the whole orbit so every
/// fireball sits at an even angular offset.
pub fn add_orbiting_fireball(world: &mut World) -> Entity {
    let entity = world.spawn((
        EffectActor {
            kind: UpgradeKind::SpinningFireball,
        },
        OrbitingFireball {
            index: 0,
            total: 1,
            damage: constants::FIREBALL_DAMAGE,
            radius: constants::FIREBALL_RADIUS,
            rotation_speed_deg: constants::FIREBALL_ROTATION_DEG_PER_SEC,
        },
    ));

    let total = world.query_mut::<&OrbitingFireball>().into_iter().count() as u32;
    for (i, (_, fireball)) in world.query_mut::<&mut OrbitingFireball>().into_iter().enumerate() {
        fireball.index = i as u32;
        fireball.total = total;
    }
    entity
}

/// Spawn the sword on first purchase; later purchases sharpen the
/// existing one instead of adding a second.
pub fn spawn_or_upgrade_sword(world: &mut World, bonus_damage: f32) {
    if let Some((_, sword)) = world.query_mut::<&mut PeriodicSword>().into_iter().next() {
        sword.damage = constants::SWORD_DAMAGE + bonus_damage;
        return;
    }
    world.spawn((
        EffectActor {
            kind: UpgradeKind::PeriodicSword,
        },
        PeriodicSword {
            damage: constants::SWORD_DAMAGE + bonus_damage,
            swing_range: constants::SWORD_RANGE,
            swing_timer: Countdown::new(constants::SWORD_INTERVAL),
            interval_secs: constants::SWORD_INTERVAL,
        },
    ));
}

/// Despawn every purchase-created actor. Used by the full shop reset.
pub fn clear_effect_actors(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, _) in world.query_mut::<&EffectActor>() {
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
