//! Tabular Q-learning decision core for a turn-based grid artillery duel.
//!
//! This crate provides:
//! - Discrete state encoding for two game-difficulty variants
//! - ε-greedy action selection over movement and shooting decisions
//! - One-step Q-learning updates with synchronous table persistence
//! - MessagePack-backed table storage with shape/version validation
//!
//! The host application owns the game itself (board, turn order, wind
//! physics, opponents); it feeds observations and rewards into a
//! [`DuelAgent`] and executes the actions it gets back.

pub mod adapters;
pub mod agent;
pub mod config;
pub mod error;
pub mod learner;
pub mod policy;
pub mod ports;
pub mod q_table;
pub mod schema;
pub mod store;
pub mod types;

pub use agent::DuelAgent;
pub use config::AgentConfig;
pub use error::{Error, Result};
pub use q_table::QTable;
pub use schema::Variant;
pub use store::{QTableStore, TableKind};
pub use types::{
    AmmoStock, AmmoType, GridPos, MoveAction, MoveObservation, ShootAction, ShootObservation,
    Wind, WindDirection,
};
