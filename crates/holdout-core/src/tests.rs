use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Countdown, SimTime};

/// Verify enums and events round-trip through serde_json.
#[test]
fn test_enemy_archetype_serde() {
    let variants = vec![EnemyArchetype::Goblin, EnemyArchetype::Mushroom];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: EnemyArchetype = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn test_upgrade_kind_serde() {
    let variants = vec![
        UpgradeKind::SpinningFireball,
        UpgradeKind::PeriodicSword,
        UpgradeKind::HealthBoost,
        UpgradeKind::DamageBoost,
        UpgradeKind::SpeedBoost,
        UpgradeKind::HealthPotion,
        UpgradeKind::TempDamageBoost,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: UpgradeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn test_upgrade_kind_key_roundtrip() {
    let variants = vec![
        UpgradeKind::SpinningFireball,
        UpgradeKind::PeriodicSword,
        UpgradeKind::HealthBoost,
        UpgradeKind::DamageBoost,
        UpgradeKind::SpeedBoost,
        UpgradeKind::HealthPotion,
        UpgradeKind::TempDamageBoost,
    ];
    for v in variants {
        assert_eq!(UpgradeKind::parse(v.as_str()), v);
    }
}

#[test]
fn test_game_event_serde() {
    let events = vec![
        GameEvent::WaveStarted { wave_number: 1 },
        GameEvent::WaveCompleted { wave_number: 3 },
        GameEvent::CurrencyChanged,
        GameEvent::GameOver { waves_survived: 7 },
    ];
    for e in events {
        let json = serde_json::to_string(&e).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..crate::constants::TICK_RATE {
        time.advance();
    }
    assert_eq!(time.tick, crate::constants::TICK_RATE as u64);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
}

#[test]
fn test_countdown_clamps_and_restarts() {
    let mut cd = Countdown::new(1.0);
    assert!(!cd.finished());
    cd.tick(0.6);
    assert!(!cd.finished());
    cd.tick(0.6);
    assert!(cd.finished());
    assert_eq!(cd.time_left(), 0.0);

    cd.restart(2.0);
    assert!(!cd.finished());
    assert_eq!(cd.time_left(), 2.0);
}

#[test]
fn test_countdown_zero_starts_finished() {
    let cd = Countdown::new(0.0);
    assert!(cd.finished());
}
