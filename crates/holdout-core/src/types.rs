//! Fundamental time-keeping types.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f32 {
        constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += constants::DT as f64;
    }
}

/// A one-shot countdown driven by the tick function.
///
/// This is the primitive behind every suspendable sequence in the arena:
/// spawn cadence, inter-wave delay, corpse despawn, temporary boost
/// expiry. Each instance carries its own remaining time and is resumed
/// each tick; calling [`Countdown::restart`] abandons whatever was in
/// flight, so starting a new instance of the same named sequence always
/// cancels the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: f32,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining_secs: secs.max(0.0),
        }
    }

    /// True once the countdown has reached zero.
    pub fn finished(&self) -> bool {
        self.remaining_secs <= 0.0
    }

    pub fn time_left(&self) -> f32 {
        self.remaining_secs
    }

    /// Advance by `dt` seconds, clamping at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining_secs = (self.remaining_secs - dt).max(0.0);
    }

    /// Abandon the current countdown and start over.
    pub fn restart(&mut self, secs: f32) {
        self.remaining_secs = secs.max(0.0);
    }
}
