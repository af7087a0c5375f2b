//! Combat resolution: attacks, spells, and enemy turns.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
