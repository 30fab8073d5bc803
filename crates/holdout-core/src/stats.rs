//! Combatant stat state, shared by the player and every enemy.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::Countdown;

/// Mutable stat bag consumed by both player and enemies.
///
/// The player's instance is long-lived across waves; enemy instances are
/// spawn-scoped and go away with the entity. Effective damage is
/// `base × permanent multiplier + temporary bonus` — the temporary bonus
/// is additive after the multiplier, not itself multiplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantStats {
    pub base_damage: f32,
    /// Permanent, additive-percent multiplier (1.0 = no bonus).
    pub damage_multiplier: f32,
    /// Flat bonus active while the boost window runs.
    pub temporary_damage_bonus: f32,
    boost_window: Countdown,
    pub move_speed: f32,
    pub max_health: f32,
    pub current_health: f32,
    dead: bool,
}

impl CombatantStats {
    pub fn new(max_health: f32, base_damage: f32, move_speed: f32) -> Self {
        Self {
            base_damage,
            damage_multiplier: 1.0,
            temporary_damage_bonus: 0.0,
            boost_window: Countdown::new(0.0),
            move_speed,
            max_health,
            current_health: max_health,
            dead: false,
        }
    }

    pub fn player_default() -> Self {
        Self::new(
            constants::PLAYER_MAX_HEALTH,
            constants::PLAYER_BASE_DAMAGE,
            constants::PLAYER_MOVE_SPEED,
        )
    }

    pub fn effective_damage(&self) -> f32 {
        self.base_damage * self.damage_multiplier + self.temporary_damage_bonus
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Remaining seconds on the temporary boost window.
    pub fn boost_time_left(&self) -> f32 {
        self.boost_window.time_left()
    }

    /// Apply damage, clamping health at zero. Returns true exactly once,
    /// on the killing blow; damage after death is ignored.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }
        self.current_health = (self.current_health - amount).max(0.0);
        if self.current_health <= 0.0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Heal up to max health. Does not revive the dead.
    pub fn heal(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    /// Raise max health and grant the same amount as an immediate heal.
    pub fn increase_max_health(&mut self, amount: f32) {
        self.max_health += amount;
        if !self.dead {
            self.current_health = (self.current_health + amount).min(self.max_health);
        }
    }

    /// `boost` is a percentage: 5.0 adds +5% to the permanent multiplier.
    pub fn add_permanent_damage_boost(&mut self, boost: f32) {
        self.damage_multiplier += boost / 100.0;
    }

    /// Start (or replace) a timed flat damage bonus. A new boost cancels
    /// any prior window rather than stacking.
    pub fn add_temporary_damage_boost(&mut self, bonus: f32, duration_secs: f32) {
        self.temporary_damage_bonus = bonus;
        self.boost_window.restart(duration_secs);
    }

    pub fn add_speed_boost(&mut self, boost: f32) {
        self.move_speed += boost;
    }

    /// Advance timed state. The temporary bonus holds its full value
    /// until the window closes, then drops to zero in one step.
    pub fn tick(&mut self, dt: f32) {
        if self.temporary_damage_bonus > 0.0 {
            self.boost_window.tick(dt);
            if self.boost_window.finished() {
                self.temporary_damage_bonus = 0.0;
            }
        }
    }
}
