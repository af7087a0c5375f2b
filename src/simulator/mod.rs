//! Game balance simulator for Monte Carlo analysis.
//!
//! Fights thousands of battles between a class preset and a location's
//! roster to see how win rate, battle length and rewards shift with class,
//! location and prior victories. Battles run through [`crate::battle`], so
//! results match real gameplay.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleStats, EnemyRecord, SimReport};
pub use runner::{choose_action, run_simulation, simulate_battle, simulate_battle_with};
