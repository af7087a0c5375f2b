//! World locations and progression through them.
//!
//! Each location has a difficulty multiplier for enemy stats, a roster of
//! enemies, and a gate of total victories (plus completed locations for the
//! end-game areas).

mod data;
mod progression;

pub use data::Location;
pub use progression::{
    is_location_completed, is_location_unlocked, locked_message, missing_requirements,
    unlocked_locations,
};
