//! Enumeration types used throughout the arena.

use serde::{Deserialize, Serialize};

/// Enemy archetype category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Slow melee bruiser, the baseline enemy.
    Goblin,
    /// Fast, fragile, hits harder on contact.
    Mushroom,
}

/// Base stats for an enemy archetype before difficulty scaling.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeProfile {
    pub max_health: f32,
    pub contact_damage: f32,
    pub move_speed: f32,
    pub gold_on_death: u32,
}

impl EnemyArchetype {
    pub fn profile(&self) -> ArchetypeProfile {
        match self {
            Self::Goblin => ArchetypeProfile {
                max_health: 50.0,
                contact_damage: 10.0,
                move_speed: 2.0,
                gold_on_death: 5,
            },
            Self::Mushroom => ArchetypeProfile {
                max_health: 30.0,
                contact_damage: 15.0,
                move_speed: 5.0,
                gold_on_death: 8,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goblin => "goblin",
            Self::Mushroom => "mushroom",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mushroom" => Self::Mushroom,
            _ => Self::Goblin,
        }
    }
}

/// Shop upgrade identity. This is the stable persistence key; display
/// names change per tier and are never used as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Persistent orbiting fireball actor; a second orb at tier 2.
    SpinningFireball,
    /// Persistent auto-swinging sword actor.
    PeriodicSword,
    /// Permanent max-health increase with equal heal.
    HealthBoost,
    /// Permanent additive-percent damage multiplier increase.
    DamageBoost,
    /// Permanent move-speed increase.
    SpeedBoost,
    /// Consumable: immediate heal.
    HealthPotion,
    /// Consumable: timed flat damage bonus.
    TempDamageBoost,
}

impl UpgradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpinningFireball => "spinning_fireball",
            Self::PeriodicSword => "periodic_sword",
            Self::HealthBoost => "health_boost",
            Self::DamageBoost => "damage_boost",
            Self::SpeedBoost => "speed_boost",
            Self::HealthPotion => "health_potion",
            Self::TempDamageBoost => "temp_damage_boost",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "spinning_fireball" => Self::SpinningFireball,
            "periodic_sword" => Self::PeriodicSword,
            "health_boost" => Self::HealthBoost,
            "speed_boost" => Self::SpeedBoost,
            "health_potion" => Self::HealthPotion,
            "temp_damage_boost" => Self::TempDamageBoost,
            _ => Self::DamageBoost,
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waves are running (or an intermission is counting down).
    #[default]
    Active,
    /// The player died; the arena is frozen until a new game starts.
    GameOver,
}
