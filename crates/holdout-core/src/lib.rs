//! Core types and definitions for the HOLDOUT arena.
//!
//! This crate defines the vocabulary shared across all other crates:
//! combatant stats, wave definitions, events, snapshot views, and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;
pub mod waves;

#[cfg(test)]
mod tests;
