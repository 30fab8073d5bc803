//! Wave scheduler.
//!
//! Drives the session through its wave lifecycle: spawn enemies on a
//! cadence, watch the completion race (kill-all versus timer expiry),
//! rest between waves, and synthesize new definitions forever once the
//! authored table runs out. The scheduler owns wave bookkeeping only;
//! actually spawning entities is the engine's job, requested through
//! [`SpawnOrder`]s returned from [`WaveScheduler::tick`].

use holdout_core::enums::EnemyArchetype;
use holdout_core::events::GameEvent;
use holdout_core::types::Countdown;
use holdout_core::waves::{DifficultyScaling, WaveDefinition};

/// A request to spawn one enemy, with the difficulty scalars the
/// engine must bake into its stats at spawn time.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnOrder {
    pub archetype_pool: Vec<EnemyArchetype>,
    pub health_multiplier: f32,
    pub damage_multiplier: f32,
}

/// In-flight spawn sequence for the current wave.
#[derive(Debug, Clone)]
struct SpawnSequence {
    to_spawn: u32,
    cadence: Countdown,
    interval_secs: f32,
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    /// Authored table plus any synthesized extensions, in order.
    waves: Vec<WaveDefinition>,
    authored_count: usize,
    scaling: DifficultyScaling,
    time_between_waves: f32,
    current_wave: usize,
    enemies_remaining: u32,
    wave_timer: Countdown,
    in_progress: bool,
    spawning: Option<SpawnSequence>,
    intermission: Option<Countdown>,
}

impl WaveScheduler {
    /// Build a scheduler over an authored wave table.
    ///
    /// The table must be non-empty and every wave must have at least one
    /// archetype and a positive enemy count, or synthesis and spawning
    /// would degenerate.
    pub fn new(
        waves: Vec<WaveDefinition>,
        scaling: DifficultyScaling,
        time_between_waves: f32,
    ) -> Result<Self, String> {
        if waves.is_empty() {
            return Err("Wave table must contain at least one wave".into());
        }
        for (i, wave) in waves.iter().enumerate() {
            if wave.archetypes.is_empty() {
                return Err(format!("Wave {} has no archetypes", i + 1));
            }
            if wave.enemy_count == 0 {
                return Err(format!("Wave {} has a zero enemy count", i + 1));
            }
        }
        let authored_count = waves.len();
        Ok(Self {
            waves,
            authored_count,
            scaling,
            time_between_waves,
            current_wave: 0,
            enemies_remaining: 0,
            wave_timer: Countdown::new(0.0),
            in_progress: false,
            spawning: None,
            intermission: None,
        })
    }

    /// Begin the first wave immediately.
    pub fn start_session(&mut self, events: &mut Vec<GameEvent>) {
        self.begin_wave(events);
    }

    /// Advance the scheduler by `dt` seconds. Spawn requests come back
    /// as orders; lifecycle events are appended to `events`.
    pub fn tick(&mut self, dt: f32, events: &mut Vec<GameEvent>) -> Vec<SpawnOrder> {
        let mut orders = Vec::new();

        if let Some(rest) = &mut self.intermission {
            rest.tick(dt);
            if rest.finished() {
                self.intermission = None;
                self.begin_wave(events);
            }
            return orders;
        }

        if !self.in_progress {
            return orders;
        }

        // At most one spawn per tick; the cadence restarts after each.
        let mut spawn_now = false;
        if let Some(seq) = &mut self.spawning {
            seq.cadence.tick(dt);
            if seq.cadence.finished() && seq.to_spawn > 0 {
                seq.to_spawn -= 1;
                let interval = seq.interval_secs;
                seq.cadence.restart(interval);
                spawn_now = true;
            }
            if seq.to_spawn == 0 {
                self.spawning = None;
            }
        }
        if spawn_now {
            orders.push(self.make_order());
        }

        self.wave_timer.tick(dt);
        if self.enemies_remaining == 0 || self.wave_timer.finished() {
            self.complete_wave(events);
        }

        orders
    }

    /// Record one defeated enemy. Kills that land outside an active
    /// wave (stragglers during intermission) are ignored so they can
    /// never complete the next wave early.
    pub fn enemy_defeated(&mut self) {
        if self.in_progress {
            self.enemies_remaining = self.enemies_remaining.saturating_sub(1);
        }
    }

    /// Rewind to wave one for a fresh session. Synthesized definitions
    /// are kept; they are identical to what re-synthesis would produce.
    pub fn reset(&mut self) {
        self.current_wave = 0;
        self.enemies_remaining = 0;
        self.wave_timer = Countdown::new(0.0);
        self.in_progress = false;
        self.spawning = None;
        self.intermission = None;
    }

    /// 1-based number of the current wave.
    pub fn wave_number(&self) -> u32 {
        self.current_wave as u32 + 1
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.enemies_remaining
    }

    pub fn time_left(&self) -> f32 {
        if self.in_progress {
            self.wave_timer.time_left()
        } else {
            0.0
        }
    }

    pub fn intermission_secs(&self) -> f32 {
        self.intermission.map(|c| c.time_left()).unwrap_or(0.0)
    }

    fn begin_wave(&mut self, events: &mut Vec<GameEvent>) {
        // Extend the table on demand: each synthetic wave derives from
        // the one before it, so growth compounds.
        if self.current_wave >= self.waves.len() {
            if let Some(last) = self.waves.last() {
                let next = last.synthesize_next(&self.scaling);
                self.waves.push(next);
            }
        }

        let wave = &self.waves[self.current_wave];
        self.enemies_remaining = wave.enemy_count;
        self.wave_timer = Countdown::new(wave.duration_secs);
        // A cadence of zero fires on the next tick, so the first enemy
        // appears as soon as the wave opens.
        self.spawning = Some(SpawnSequence {
            to_spawn: wave.enemy_count,
            cadence: Countdown::new(0.0),
            interval_secs: wave.spawn_interval_secs,
        });
        self.in_progress = true;

        events.push(GameEvent::WaveStarted {
            wave_number: self.wave_number(),
        });
    }

    fn complete_wave(&mut self, events: &mut Vec<GameEvent>) {
        self.in_progress = false;
        self.spawning = None;
        self.enemies_remaining = 0;
        // Completion is announced before the index advances, so the
        // event names the wave that just ended.
        events.push(GameEvent::WaveCompleted {
            wave_number: self.wave_number(),
        });
        self.current_wave += 1;
        self.intermission = Some(Countdown::new(self.time_between_waves));
    }

    fn make_order(&self) -> SpawnOrder {
        let wave = &self.waves[self.current_wave];
        // Authored waves spawn at baseline; synthetic waves compound the
        // per-wave scalars starting from the first endless index.
        let endless_index = if self.current_wave >= self.authored_count {
            (self.current_wave - self.authored_count) as u32 + 1
        } else {
            0
        };
        SpawnOrder {
            archetype_pool: wave.archetypes.clone(),
            health_multiplier: self.scaling.health_scalar(endless_index),
            damage_multiplier: self.scaling.damage_scalar(endless_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::constants;

    fn single_wave(count: u32, interval: f32, duration: f32) -> WaveScheduler {
        WaveScheduler::new(
            vec![WaveDefinition {
                archetypes: vec![EnemyArchetype::Goblin],
                enemy_count: count,
                spawn_interval_secs: interval,
                duration_secs: duration,
            }],
            DifficultyScaling::default(),
            constants::TIME_BETWEEN_WAVES,
        )
        .unwrap()
    }

    /// Run one tick and collect both orders and events.
    fn step(s: &mut WaveScheduler, dt: f32) -> (Vec<SpawnOrder>, Vec<GameEvent>) {
        let mut events = Vec::new();
        let orders = s.tick(dt, &mut events);
        (orders, events)
    }

    #[test]
    fn rejects_degenerate_tables() {
        assert!(WaveScheduler::new(vec![], DifficultyScaling::default(), 5.0).is_err());

        let no_archetypes = vec![WaveDefinition {
            archetypes: vec![],
            enemy_count: 3,
            spawn_interval_secs: 1.0,
            duration_secs: 10.0,
        }];
        assert!(WaveScheduler::new(no_archetypes, DifficultyScaling::default(), 5.0).is_err());

        let zero_count = vec![WaveDefinition {
            archetypes: vec![EnemyArchetype::Goblin],
            enemy_count: 0,
            spawn_interval_secs: 1.0,
            duration_secs: 10.0,
        }];
        assert!(WaveScheduler::new(zero_count, DifficultyScaling::default(), 5.0).is_err());
    }

    #[test]
    fn first_spawn_is_immediate() {
        let mut s = single_wave(3, 2.0, 30.0);
        let mut events = Vec::new();
        s.start_session(&mut events);
        assert_eq!(events, vec![GameEvent::WaveStarted { wave_number: 1 }]);

        let (orders, _) = step(&mut s, 0.1);
        assert_eq!(orders.len(), 1);
    }

    #[test]
    fn spawns_follow_the_cadence() {
        let mut s = single_wave(3, 2.0, 30.0);
        s.start_session(&mut Vec::new());

        let mut spawned = 0;
        for _ in 0..40 {
            let (orders, _) = step(&mut s, 0.1);
            spawned += orders.len();
        }
        // t in [0, 4): spawns at ~0, ~2, then the third at ~4.
        assert_eq!(spawned, 2);
        let (orders, _) = step(&mut s, 0.1);
        spawned += orders.len();
        assert_eq!(spawned, 3);
    }

    #[test]
    fn wave_completes_when_all_enemies_die() {
        let mut s = single_wave(2, 0.5, 30.0);
        s.start_session(&mut Vec::new());

        step(&mut s, 0.1);
        step(&mut s, 0.5);
        s.enemy_defeated();
        s.enemy_defeated();

        let (_, events) = step(&mut s, 0.1);
        assert_eq!(events, vec![GameEvent::WaveCompleted { wave_number: 1 }]);
        assert!(!s.is_in_progress());
    }

    #[test]
    fn wave_completes_when_timer_expires() {
        let mut s = single_wave(5, 0.1, 2.0);
        s.start_session(&mut Vec::new());

        let mut completed = Vec::new();
        for _ in 0..25 {
            let (_, events) = step(&mut s, 0.1);
            completed.extend(events);
        }
        assert!(completed.contains(&GameEvent::WaveCompleted { wave_number: 1 }));
        assert!(!s.is_in_progress());
    }

    #[test]
    fn intermission_separates_waves() {
        let mut s = single_wave(1, 0.5, 30.0);
        s.start_session(&mut Vec::new());

        step(&mut s, 0.1);
        s.enemy_defeated();
        let (_, events) = step(&mut s, 0.1);
        assert_eq!(events, vec![GameEvent::WaveCompleted { wave_number: 1 }]);
        assert!(s.intermission_secs() > 0.0);

        // Nothing happens until the rest period elapses.
        let (orders, events) = step(&mut s, 1.0);
        assert!(orders.is_empty());
        assert!(events.is_empty());

        let (_, events) = step(&mut s, constants::TIME_BETWEEN_WAVES);
        assert_eq!(events, vec![GameEvent::WaveStarted { wave_number: 2 }]);
    }

    #[test]
    fn stragglers_do_not_count_against_the_next_wave() {
        let mut s = single_wave(1, 0.5, 30.0);
        s.start_session(&mut Vec::new());
        step(&mut s, 0.1);
        s.enemy_defeated();
        step(&mut s, 0.1);
        assert!(!s.is_in_progress());

        // A kill during intermission is ignored.
        s.enemy_defeated();
        step(&mut s, constants::TIME_BETWEEN_WAVES + 0.1);
        assert!(s.is_in_progress());
        assert_eq!(s.enemies_remaining(), 1);
    }

    #[test]
    fn endless_waves_synthesize_past_the_table() {
        let mut s = single_wave(1, 0.5, 1.0);
        s.start_session(&mut Vec::new());

        let mut started = Vec::new();
        for _ in 0..2000 {
            let mut events = Vec::new();
            s.tick(0.1, &mut events);
            for e in events {
                if let GameEvent::WaveStarted { wave_number } = e {
                    started.push(wave_number);
                }
            }
            if started.len() >= 3 {
                break;
            }
        }
        assert!(started.contains(&2));
        assert!(started.contains(&3));
    }

    #[test]
    fn endless_orders_carry_compounding_scalars() {
        let mut s = single_wave(1, 0.5, 1.0);
        s.start_session(&mut Vec::new());

        // Wave 1 is authored: baseline scalars.
        let (orders, _) = step(&mut s, 0.1);
        assert!((orders[0].health_multiplier - 1.0).abs() < 1e-6);

        // Drive into the second synthetic wave (wave 3 overall).
        let mut second_endless = None;
        for _ in 0..5000 {
            let (orders, _) = step(&mut s, 0.1);
            if s.wave_number() == 3 {
                if let Some(order) = orders.into_iter().next() {
                    second_endless = Some(order);
                    break;
                }
            }
        }
        let order = second_endless.unwrap();
        assert!((order.health_multiplier - 1.1_f32.powi(2)).abs() < 1e-5);
        assert!((order.damage_multiplier - 1.05_f32.powi(2)).abs() < 1e-5);
    }

    #[test]
    fn reset_rewinds_to_wave_one() {
        let mut s = single_wave(1, 0.5, 1.0);
        s.start_session(&mut Vec::new());
        for _ in 0..200 {
            step(&mut s, 0.1);
        }
        assert!(s.wave_number() > 1);

        s.reset();
        assert_eq!(s.wave_number(), 1);
        assert!(!s.is_in_progress());

        let mut events = Vec::new();
        s.start_session(&mut events);
        assert_eq!(events, vec![GameEvent::WaveStarted { wave_number: 1 }]);
    }
}
