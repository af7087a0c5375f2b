//! Location unlock and completion rules.

use super::data::Location;
use crate::character::Progression;
use crate::core::constants::LOCATION_COMPLETION_VICTORIES;

/// A location opens once the player has enough total victories and has
/// completed every prerequisite location.
pub fn is_location_unlocked(progression: &Progression, location: Location) -> bool {
    if progression.victories < location.min_victories_required() {
        return false;
    }

    location
        .unlock_requirements()
        .iter()
        .all(|req| is_location_completed(progression, *req))
}

pub fn is_location_completed(progression: &Progression, location: Location) -> bool {
    progression.victories_at(location.name()) >= LOCATION_COMPLETION_VICTORIES
}

/// Prerequisites the player has not won at even once.
pub fn missing_requirements(progression: &Progression, location: Location) -> Vec<Location> {
    location
        .unlock_requirements()
        .iter()
        .copied()
        .filter(|req| progression.victories_at(req.name()) == 0)
        .collect()
}

/// Human-readable reason a location is locked, e.g. for a map tooltip.
pub fn locked_message(progression: &Progression, location: Location) -> String {
    let mut message = format!(
        "Locked: Need {} victories",
        location.min_victories_required()
    );
    let missing = missing_requirements(progression, location);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(Location::name).collect();
        message.push_str(&format!("\nAlso need: {}", names.join(", ")));
    }
    message
}

pub fn unlocked_locations(progression: &Progression) -> Vec<Location> {
    Location::ALL
        .into_iter()
        .filter(|location| is_location_unlocked(progression, *location))
        .collect()
}
