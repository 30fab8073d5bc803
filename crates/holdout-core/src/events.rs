//! Events emitted by the arena for UI, audio, and shop feedback.
//!
//! Fire-and-forget notifications: multiple independent observers may
//! subscribe, and no payload is carried beyond the 1-based wave number.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave has begun spawning.
    WaveStarted { wave_number: u32 },
    /// A wave ended, either by clearing all enemies or by timeout.
    /// Carries the number of the wave that just ended.
    WaveCompleted { wave_number: u32 },
    /// The gold balance changed (gain or successful spend).
    CurrencyChanged,
    /// The player died. Carries the last wave the player survived.
    GameOver { waves_survived: u32 },
}
