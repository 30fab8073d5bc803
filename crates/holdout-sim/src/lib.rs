//! Headless arena engine for HOLDOUT.
//!
//! `ArenaEngine` owns the hecs world, the wave scheduler, the economy
//! ledger, and the shop, and produces `ArenaSnapshot`s each tick.
//! Completely headless (no rendering or input dependency), enabling
//! deterministic testing.

pub mod bus;
pub mod engine;
pub mod ledger;
pub mod persistence;
pub mod scheduler;
pub mod shop;
pub mod world;
