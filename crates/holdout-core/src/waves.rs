//! Wave definitions and endless-mode synthesis.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::enums::EnemyArchetype;

/// One authored (or synthesized) batch of enemies.
///
/// Immutable once created; the last definition in the table is the
/// template for the next synthetic wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Archetypes eligible to spawn; each spawn picks uniformly.
    pub archetypes: Vec<EnemyArchetype>,
    pub enemy_count: u32,
    pub spawn_interval_secs: f32,
    /// Time budget; the wave ends when it elapses even if enemies remain.
    pub duration_secs: f32,
}

impl WaveDefinition {
    /// Derive the next endless wave from this one. The result compounds:
    /// it becomes the template for the wave after it, so growth is
    /// geometric rather than reset to the authored original.
    pub fn synthesize_next(&self, scaling: &DifficultyScaling) -> Self {
        Self {
            archetypes: self.archetypes.clone(),
            enemy_count: (self.enemy_count as f32 * constants::ENDLESS_COUNT_GROWTH).round()
                as u32,
            spawn_interval_secs: self.spawn_interval_secs * scaling.spawn_rate_multiplier,
            duration_secs: self.duration_secs * constants::ENDLESS_DURATION_GROWTH,
        }
    }

    /// The default authored table: three escalating waves.
    pub fn authored_table() -> Vec<Self> {
        vec![
            Self {
                archetypes: vec![EnemyArchetype::Goblin],
                enemy_count: 5,
                spawn_interval_secs: 2.0,
                duration_secs: 30.0,
            },
            Self {
                archetypes: vec![EnemyArchetype::Goblin, EnemyArchetype::Mushroom],
                enemy_count: 8,
                spawn_interval_secs: 1.5,
                duration_secs: 35.0,
            },
            Self {
                archetypes: vec![EnemyArchetype::Goblin, EnemyArchetype::Mushroom],
                enemy_count: 12,
                spawn_interval_secs: 1.0,
                duration_secs: 40.0,
            },
        ]
    }
}

/// Difficulty scalars applied to enemies spawned in synthetic waves.
/// Exponentiated by the endless wave index, at spawn time only — never
/// retroactively to entities already in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScaling {
    pub health_multiplier: f32,
    pub damage_multiplier: f32,
    pub spawn_rate_multiplier: f32,
}

impl Default for DifficultyScaling {
    fn default() -> Self {
        Self {
            health_multiplier: constants::ENEMY_HEALTH_MULTIPLIER,
            damage_multiplier: constants::ENEMY_DAMAGE_MULTIPLIER,
            spawn_rate_multiplier: constants::SPAWN_RATE_MULTIPLIER,
        }
    }
}

impl DifficultyScaling {
    pub fn health_scalar(&self, endless_index: u32) -> f32 {
        self.health_multiplier.powi(endless_index as i32)
    }

    pub fn damage_scalar(&self, endless_index: u32) -> f32 {
        self.damage_multiplier.powi(endless_index as i32)
    }
}
