//! Battle locations and their enemy rosters.

use crate::enemies::EnemyKind;

/// A place on the world map where battles happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Arena,
    Maze,
    HauntedMansion,
    PirateDocks,
    AncientCity,
    SacredShrine,
    VolcanicCaves,
    DruidsCastle,
    BotAttack,
}

/// Locations that must be completed before the two end-game areas open.
const END_GAME_REQUIREMENTS: &[Location] = &[
    Location::Arena,
    Location::HauntedMansion,
    Location::PirateDocks,
    Location::AncientCity,
    Location::SacredShrine,
    Location::VolcanicCaves,
];

impl Location {
    pub const ALL: [Location; 9] = [
        Location::Arena,
        Location::Maze,
        Location::HauntedMansion,
        Location::PirateDocks,
        Location::AncientCity,
        Location::SacredShrine,
        Location::VolcanicCaves,
        Location::DruidsCastle,
        Location::BotAttack,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Location::Arena => "Arena",
            Location::Maze => "Maze",
            Location::HauntedMansion => "Haunted Mansion",
            Location::PirateDocks => "Pirate Docks",
            Location::AncientCity => "Ancient City",
            Location::SacredShrine => "Sacred Shrine",
            Location::VolcanicCaves => "Volcanic Caves",
            Location::DruidsCastle => "Battle of Druids Castle",
            Location::BotAttack => "Bot Attack",
        }
    }

    /// Exact, case-sensitive match on the display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|location| location.name() == name)
    }

    /// Enemy stat multiplier, from 1.0 in the Arena up to 2.0 in end-game areas.
    pub fn multiplier(&self) -> f64 {
        match self {
            Location::Arena => 1.0,
            Location::Maze => 1.1,
            Location::HauntedMansion => 1.2,
            Location::PirateDocks => 1.3,
            Location::AncientCity => 1.4,
            Location::SacredShrine => 1.5,
            Location::VolcanicCaves => 1.6,
            Location::DruidsCastle => 2.0,
            Location::BotAttack => 2.0,
        }
    }

    pub fn enemies(&self) -> &'static [EnemyKind] {
        use EnemyKind::*;
        match self {
            Location::Arena => &[Goblin, DarkMage, Skeleton, Orc],
            Location::Maze => &[Minotaur, LostSoul],
            Location::HauntedMansion => &[Ghost, Vampire, Lich, Banshee],
            Location::PirateDocks => &[Pirate, SeaSerpent, KrakenSpawn, GhostShip],
            Location::AncientCity => &[CityGuard, Assassin, Golem, AncientWarrior],
            Location::SacredShrine => &[TempleGuardian, SpiritMonk, DivineBeast, Celestial],
            Location::VolcanicCaves => &[FireElemental, LavaBeast, DragonWhelp, MagmaGolem],
            Location::DruidsCastle => &[DruidLord, AncientGuardian],
            Location::BotAttack => &[MechDragon, WarMachine],
        }
    }

    /// Total victories needed before the location can be entered.
    pub fn min_victories_required(&self) -> u32 {
        match self {
            Location::Arena => 0,
            Location::Maze => 1,
            Location::HauntedMansion => 2,
            Location::PirateDocks => 3,
            Location::AncientCity => 4,
            Location::SacredShrine => 5,
            Location::VolcanicCaves => 6,
            Location::DruidsCastle | Location::BotAttack => 7,
        }
    }

    /// Locations that must each be completed first.
    pub fn unlock_requirements(&self) -> &'static [Location] {
        match self {
            Location::DruidsCastle | Location::BotAttack => END_GAME_REQUIREMENTS,
            _ => &[],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Location::Arena => "A gladiatorial arena where warriors prove their worth.",
            Location::Maze => "An ever-changing labyrinth of stone and shadow.",
            Location::HauntedMansion => "A decrepit mansion filled with supernatural entities.",
            Location::PirateDocks => "Dangerous docks where sea raiders gather.",
            Location::AncientCity => "Ruins of a once-great civilization.",
            Location::SacredShrine => "A holy place protected by divine guardians.",
            Location::VolcanicCaves => "Molten caves deep within an active volcano.",
            Location::DruidsCastle => "The final stronghold of the ancient druid order.",
            Location::BotAttack => "A futuristic battlefield where metal giants clash.",
        }
    }

    /// Whether winning here enough times ends the campaign.
    pub fn is_finale(&self) -> bool {
        matches!(self, Location::DruidsCastle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for location in Location::ALL {
            assert_eq!(Location::from_name(location.name()), Some(location));
        }
        assert_eq!(Location::from_name("Nowhere"), None);
        assert_eq!(Location::from_name("arena"), None);
    }

    #[test]
    fn test_multipliers_in_range() {
        for location in Location::ALL {
            let m = location.multiplier();
            assert!((1.0..=2.0).contains(&m), "{:?} -> {}", location, m);
        }
        assert!((Location::Arena.multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((Location::BotAttack.multiplier() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_enemy_appears_in_exactly_one_roster() {
        for kind in EnemyKind::ALL {
            let homes = Location::ALL
                .iter()
                .filter(|l| l.enemies().contains(&kind))
                .count();
            assert_eq!(homes, 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_only_end_game_has_requirements() {
        for location in Location::ALL {
            let gated = matches!(location, Location::DruidsCastle | Location::BotAttack);
            assert_eq!(!location.unlock_requirements().is_empty(), gated);
        }
    }
}
