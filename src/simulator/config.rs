//! Simulation configuration.

use crate::character::CharacterClass;
use crate::zones::Location;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Class preset the simulated player uses
    pub class: CharacterClass,

    /// Where the battles take place
    pub location: Location,

    /// Total victories the player already has, which scales enemies
    pub starting_victories: u32,

    /// Player turns before a battle is called a timeout
    pub max_turns_per_battle: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per battle)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            class: CharacterClass::Knight,
            location: Location::Arena,
            starting_victories: 0,
            max_turns_per_battle: 200,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for comparing one class against the opening arena
    pub fn class_balance_test(class: CharacterClass) -> Self {
        Self {
            num_runs: 500,
            class,
            ..Default::default()
        }
    }

    /// A player arriving at `location` with just enough victories to enter
    pub fn location_balance_test(location: Location) -> Self {
        Self {
            num_runs: 500,
            location,
            starting_victories: location.min_victories_required(),
            ..Default::default()
        }
    }

    /// The castle fight after a long campaign
    pub fn end_game_test(class: CharacterClass) -> Self {
        Self {
            num_runs: 200,
            class,
            location: Location::DruidsCastle,
            starting_victories: 25,
            ..Default::default()
        }
    }
}
