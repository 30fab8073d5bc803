//! Arena snapshot — the complete visible state a frontend polls each frame.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyArchetype, SessionPhase};
use crate::types::SimTime;

/// Complete observable state after a tick. The UI layer reads this
/// (wave timer, enemies remaining, shop button states) and never mutates
/// engine state directly except through the purchase engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub wave: WaveView,
    pub player: PlayerView,
    /// Current gold balance.
    pub balance: u32,
    pub enemies: Vec<EnemyView>,
    pub shop: Vec<ShopItemView>,
}

/// Wave progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// 1-based number of the current (or upcoming) wave.
    pub number: u32,
    pub in_progress: bool,
    pub enemies_remaining: u32,
    /// Seconds left on the wave's time budget.
    pub time_left_secs: f32,
    /// Seconds until the next wave starts, when between waves.
    pub intermission_secs: f32,
}

/// Player status for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub current_health: f32,
    pub max_health: f32,
    pub effective_damage: f32,
    pub move_speed: f32,
    /// Remaining seconds on a temporary damage boost, if any.
    pub boost_secs: f32,
}

/// A live enemy for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub archetype: EnemyArchetype,
    pub x: f32,
    pub y: f32,
    pub current_health: f32,
    pub max_health: f32,
    pub dead: bool,
}

/// One shop entry with its buy-button state resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItemView {
    /// Stable key (see `UpgradeKind::as_str`).
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub cost: u32,
    pub tier: u32,
    pub max_tier: u32,
    pub consumable: bool,
    pub maxed: bool,
    pub can_buy: bool,
}
