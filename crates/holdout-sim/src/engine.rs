//! Arena engine — the core of the game.
//!
//! `ArenaEngine` owns the hecs ECS world, the wave scheduler, the
//! economy ledger, and the shop, and produces `ArenaSnapshot`s each
//! tick. Completely headless (no rendering dependency), enabling
//! deterministic testing: same seed, same inputs, same arena.

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use holdout_core::constants;
use holdout_core::enums::{SessionPhase, UpgradeKind};
use holdout_core::events::GameEvent;
use holdout_core::state::{ArenaSnapshot, EnemyView, PlayerView, ShopItemView, WaveView};
use holdout_core::stats::CombatantStats;
use holdout_core::types::SimTime;
use holdout_core::waves::{DifficultyScaling, WaveDefinition};

use crate::bus::{EventBus, SubscriberId};
use crate::ledger::EconomyLedger;
use crate::persistence::PrefStore;
use crate::scheduler::WaveScheduler;
use crate::shop::Shop;
use crate::world::{self, Enemy, Position};

/// Configuration for starting a new arena.
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same arena.
    pub seed: u64,
    /// Authored wave table; extended by synthesis once exhausted.
    pub waves: Vec<WaveDefinition>,
    /// Points enemies may appear at; each spawn picks one uniformly.
    pub spawn_points: Vec<Vec2>,
    pub time_between_waves: f32,
    pub scaling: DifficultyScaling,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            waves: WaveDefinition::authored_table(),
            spawn_points: vec![
                Vec2::new(-10.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, -10.0),
                Vec2::new(0.0, 10.0),
            ],
            time_between_waves: constants::TIME_BETWEEN_WAVES,
            scaling: DifficultyScaling::default(),
        }
    }
}

/// The arena engine. Owns the ECS world and all session state.
///
/// The player's stats live on the engine rather than in the world:
/// the player is a singleton whose stats the shop mutates directly,
/// while enemies and effect actors are entities.
pub struct ArenaEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    bus: EventBus,
    scheduler: WaveScheduler,
    ledger: EconomyLedger,
    shop: Shop,
    store: PrefStore,
    spawn_points: Vec<Vec2>,
    player: CombatantStats,
    phase: SessionPhase,
    waves_survived: u32,
    despawn_buffer: Vec<Entity>,
}

impl ArenaEngine {
    /// Create an engine over a preference store, restoring the gold
    /// balance and replaying owned upgrades from it.
    pub fn new(config: ArenaConfig, store: PrefStore) -> Result<Self, String> {
        if config.spawn_points.is_empty() {
            return Err("Arena needs at least one spawn point".into());
        }
        let scheduler =
            WaveScheduler::new(config.waves, config.scaling, config.time_between_waves)?;

        let mut world = World::new();
        let mut player = CombatantStats::player_default();
        let ledger = EconomyLedger::load(&store);
        let mut shop = Shop::default();
        shop.load_owned(&store, &mut player, &mut world);

        Ok(Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bus: EventBus::new(),
            scheduler,
            ledger,
            shop,
            store,
            spawn_points: config.spawn_points,
            player,
            phase: SessionPhase::default(),
            waves_survived: 0,
            despawn_buffer: Vec::new(),
        })
    }

    /// Kick off wave one. Call once before the first tick.
    pub fn start_session(&mut self) {
        let mut events = Vec::new();
        self.scheduler.start_session(&mut events);
        self.publish_all(events);
    }

    /// Advance the arena by one fixed tick and return the resulting
    /// snapshot. After game over the arena is frozen: time stops and
    /// no further spawns, timers, or events run.
    pub fn tick(&mut self) -> ArenaSnapshot {
        if self.phase == SessionPhase::Active {
            let dt = self.time.dt();

            let mut events = Vec::new();
            let orders = self.scheduler.tick(dt, &mut events);
            for order in &orders {
                world::spawn_enemy(&mut self.world, &mut self.rng, &self.spawn_points, order);
            }

            self.player.tick(dt);
            world::run_stat_windows(&mut self.world, dt);
            world::run_cleanup(&mut self.world, dt, &mut self.despawn_buffer);

            for event in &events {
                if let GameEvent::WaveCompleted { wave_number } = event {
                    self.waves_survived = self.waves_survived.max(*wave_number);
                }
            }
            self.publish_all(events);

            self.time.advance();
        }

        self.snapshot()
    }

    /// Deal damage to an enemy. On the killing blow the bounty is
    /// credited, the wave's remaining count drops, and the corpse is
    /// left in place briefly before despawning. Returns whether this
    /// call was the killing blow.
    pub fn damage_enemy(&mut self, entity: Entity, amount: f32) -> bool {
        let Ok((stats, enemy)) = self
            .world
            .query_one_mut::<(&mut CombatantStats, &Enemy)>(entity)
        else {
            return false;
        };
        if !stats.take_damage(amount) {
            return false;
        }
        let gold = enemy.gold_on_death;

        self.ledger.add(gold, &mut self.store, &mut self.bus);
        self.scheduler.enemy_defeated();
        world::schedule_corpse_despawn(&mut self.world, entity);
        true
    }

    /// Deal damage to the player. Death ends the session: half the
    /// gold is forfeited, owned upgrades are wiped, and `GameOver` is
    /// published carrying the last wave fully survived. Damage after
    /// game over is ignored.
    pub fn damage_player(&mut self, amount: f32) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        if self.player.take_damage(amount) {
            self.game_over();
        }
    }

    /// Buy a shop item for the player.
    pub fn try_buy(&mut self, kind: UpgradeKind) -> bool {
        if self.phase == SessionPhase::GameOver {
            return false;
        }
        self.shop.try_buy(
            kind,
            &mut self.ledger,
            &mut self.store,
            &mut self.bus,
            &mut self.player,
            &mut self.world,
        )
    }

    /// Start a fresh run: zero gold, default shop, full-health player,
    /// wave one. The world is emptied of enemies and effect actors.
    pub fn new_game(&mut self) {
        self.world.clear();
        self.shop.reset_all(&mut self.store, &mut self.world);
        self.ledger.reset(&mut self.store);
        self.player = CombatantStats::player_default();
        self.scheduler.reset();
        self.phase = SessionPhase::Active;
        self.waves_survived = 0;
        self.start_session();
    }

    /// Register an event observer.
    pub fn subscribe(&mut self) -> SubscriberId {
        self.bus.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.bus.unsubscribe(id);
    }

    /// Take the pending events for an observer, in publish order.
    pub fn drain_events(&mut self, id: SubscriberId) -> Vec<GameEvent> {
        self.bus.drain(id)
    }

    /// Persist any state not yet written.
    pub fn flush(&self) -> Result<(), String> {
        self.store.flush()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn balance(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn player(&self) -> &CombatantStats {
        &self.player
    }

    pub fn waves_survived(&self) -> u32 {
        self.waves_survived
    }

    /// Entities of enemies still alive, for drivers that pick targets.
    pub fn living_enemies(&mut self) -> Vec<Entity> {
        self.world
            .query_mut::<(&CombatantStats, &Enemy)>()
            .into_iter()
            .filter(|(_, (stats, _))| !stats.is_dead())
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Contact damage an enemy would deal the player, scaled stats
    /// included.
    pub fn enemy_contact_damage(&self, entity: Entity) -> Option<f32> {
        self.world
            .get::<&CombatantStats>(entity)
            .ok()
            .map(|stats| stats.effective_damage())
    }

    /// Build the complete observable state.
    pub fn snapshot(&mut self) -> ArenaSnapshot {
        let mut enemies = Vec::new();
        for (_, (pos, enemy, stats)) in self
            .world
            .query_mut::<(&Position, &Enemy, &CombatantStats)>()
        {
            enemies.push(EnemyView {
                archetype: enemy.archetype,
                x: pos.0.x,
                y: pos.0.y,
                current_health: stats.current_health,
                max_health: stats.max_health,
                dead: stats.is_dead(),
            });
        }

        let shop = self
            .shop
            .items()
            .iter()
            .map(|item| ShopItemView {
                key: item.kind.as_str().to_string(),
                display_name: item.display_name.clone(),
                description: item.description.clone(),
                cost: item.cost,
                tier: item.tier,
                max_tier: item.max_tier,
                consumable: item.consumable,
                maxed: item.is_maxed(),
                can_buy: !item.is_maxed()
                    && self.ledger.can_afford(item.cost)
                    && self.phase == SessionPhase::Active,
            })
            .collect();

        ArenaSnapshot {
            time: self.time,
            phase: self.phase,
            wave: WaveView {
                number: self.scheduler.wave_number(),
                in_progress: self.scheduler.is_in_progress(),
                enemies_remaining: self.scheduler.enemies_remaining(),
                time_left_secs: self.scheduler.time_left(),
                intermission_secs: self.scheduler.intermission_secs(),
            },
            player: PlayerView {
                current_health: self.player.current_health,
                max_health: self.player.max_health,
                effective_damage: self.player.effective_damage(),
                move_speed: self.player.move_speed,
                boost_secs: self.player.boost_time_left(),
            },
            balance: self.ledger.balance(),
            enemies,
            shop,
        }
    }

    fn game_over(&mut self) {
        self.phase = SessionPhase::GameOver;
        self.ledger.apply_defeat_penalty(&mut self.store);
        self.shop.reset_all(&mut self.store, &mut self.world);
        self.bus.publish(&GameEvent::GameOver {
            waves_survived: self.waves_survived,
        });
    }

    fn publish_all(&mut self, events: Vec<GameEvent>) {
        for event in events {
            self.bus.publish(&event);
        }
    }
}
