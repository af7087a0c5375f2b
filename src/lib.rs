//! Battle of the Druids - turn-based combat and progression resolver.
//!
//! This library holds the game rules: character stats and equipment, damage
//! and spell resolution, enemy scaling, the store, battle flow, location
//! unlocking, save files and a balance simulator. Presentation lives
//! elsewhere and only calls into these modules.

pub mod battle;
pub mod character;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod items;
pub mod simulator;
pub mod store;
pub mod zones;
