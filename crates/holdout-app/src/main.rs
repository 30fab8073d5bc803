//! Headless arena driver.
//!
//! Runs the engine at the fixed tick rate with a scripted combatant:
//! the player trades blows with whatever is alive and spends gold on
//! upgrades as it accumulates. Lifecycle events stream to stdout, so
//! the driver doubles as a smoke test for the whole wave/economy loop.
//!
//! Usage:
//!   holdout-app [--seed <n>] [--ticks <n>] [--save <path>] [--fast] [--json]

use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use holdout_core::constants::TICK_RATE;
use holdout_core::enums::{SessionPhase, UpgradeKind};
use holdout_core::events::GameEvent;
use holdout_sim::engine::{ArenaConfig, ArenaEngine};
use holdout_sim::persistence::PrefStore;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// The scripted player attacks once a second; enemies that have had
/// time to close in retaliate on the same cadence.
const ATTACK_PERIOD_TICKS: u64 = TICK_RATE as u64;

/// Upgrades the script buys whenever it can afford them, cheap first.
const SPENDING_PLAN: [UpgradeKind; 4] = [
    UpgradeKind::SpeedBoost,
    UpgradeKind::HealthBoost,
    UpgradeKind::DamageBoost,
    UpgradeKind::SpinningFireball,
];

struct Args {
    seed: u64,
    ticks: u64,
    save: Option<PathBuf>,
    fast: bool,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        seed: 42,
        ticks: 60 * TICK_RATE as u64,
        save: None,
        fast: false,
        json: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed needs a value")?;
                parsed.seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {value}"))?;
            }
            "--ticks" => {
                i += 1;
                let value = args.get(i).ok_or("--ticks needs a value")?;
                parsed.ticks = value
                    .parse()
                    .map_err(|_| format!("Invalid tick count: {value}"))?;
            }
            "--save" => {
                i += 1;
                let value = args.get(i).ok_or("--save needs a path")?;
                parsed.save = Some(PathBuf::from(value));
            }
            "--fast" => parsed.fast = true,
            "--json" => parsed.json = true,
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(parsed)
}

fn print_usage() {
    eprintln!(
        "holdout-app: headless wave-survival arena driver\n\
         \n\
         Options:\n\
           --seed <n>     RNG seed (default: 42)\n\
           --ticks <n>    Ticks to run (default: one minute of sim time)\n\
           --save <path>  Preference file for gold and upgrades\n\
           --fast         Run unpaced instead of real time\n\
           --json         Print the final snapshot as JSON\n"
    );
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("holdout: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let store = match &args.save {
        Some(path) => PrefStore::open(path)?,
        None => PrefStore::in_memory(),
    };

    let config = ArenaConfig {
        seed: args.seed,
        ..Default::default()
    };
    let mut engine = ArenaEngine::new(config, store)?;
    let observer = engine.subscribe();
    engine.start_session();

    let mut next_tick_time = Instant::now();
    for tick in 0..args.ticks {
        let snapshot = engine.tick();

        if tick % ATTACK_PERIOD_TICKS == 0 {
            run_scripted_combat(&mut engine);
        }

        for event in engine.drain_events(observer) {
            print_event(&event, snapshot.time.elapsed_secs);
        }

        if engine.phase() == SessionPhase::GameOver {
            break;
        }

        if !args.fast {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral.
                next_tick_time = now;
            }
        }
    }

    engine.flush()?;

    let snapshot = engine.snapshot();
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("Failed to serialize snapshot: {e}"))?;
        println!("{json}");
    } else {
        println!(
            "-- finished: wave {}, {} gold, {:.0}/{:.0} hp, {:.1}s elapsed",
            snapshot.wave.number,
            snapshot.balance,
            snapshot.player.current_health,
            snapshot.player.max_health,
            snapshot.time.elapsed_secs,
        );
    }
    Ok(())
}

/// One exchange of blows, plus a greedy pass over the spending plan.
fn run_scripted_combat(engine: &mut ArenaEngine) {
    let enemies = engine.living_enemies();

    if let Some(&target) = enemies.first() {
        let damage = engine.player().effective_damage();
        engine.damage_enemy(target, damage);
    }

    for &enemy in &enemies {
        if let Some(damage) = engine.enemy_contact_damage(enemy) {
            engine.damage_player(damage);
            if engine.phase() == SessionPhase::GameOver {
                return;
            }
        }
    }

    for kind in SPENDING_PLAN {
        while engine.try_buy(kind) {}
    }
}

fn print_event(event: &GameEvent, elapsed_secs: f64) {
    match event {
        GameEvent::WaveStarted { wave_number } => {
            println!("[{elapsed_secs:8.2}s] wave {wave_number} started");
        }
        GameEvent::WaveCompleted { wave_number } => {
            println!("[{elapsed_secs:8.2}s] wave {wave_number} completed");
        }
        GameEvent::CurrencyChanged => {}
        GameEvent::GameOver { waves_survived } => {
            println!("[{elapsed_secs:8.2}s] game over after {waves_survived} waves");
        }
    }
}
