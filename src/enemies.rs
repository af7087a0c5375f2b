//! Enemy table and scaling.
//!
//! Enemy stats grow with the player's total victories and with the
//! difficulty multiplier of the location the battle takes place in.

use crate::character::{BaseStats, Character};
use crate::core::constants::{
    DEFAULT_ENEMY_STATS, DEFAULT_LOCATION_MULTIPLIER, ENEMY_SCALE_PER_VICTORY,
};
use crate::zones::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    // Arena
    Goblin,
    DarkMage,
    Skeleton,
    Orc,
    // Maze
    Minotaur,
    LostSoul,
    // Haunted Mansion
    Ghost,
    Vampire,
    Lich,
    Banshee,
    // Pirate Docks
    Pirate,
    SeaSerpent,
    KrakenSpawn,
    GhostShip,
    // Ancient City
    CityGuard,
    Assassin,
    Golem,
    AncientWarrior,
    // Sacred Shrine
    TempleGuardian,
    SpiritMonk,
    DivineBeast,
    Celestial,
    // Volcanic Caves
    FireElemental,
    LavaBeast,
    DragonWhelp,
    MagmaGolem,
    // Battle of Druids Castle
    DruidLord,
    AncientGuardian,
    // Bot Attack
    MechDragon,
    WarMachine,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 30] = [
        EnemyKind::Goblin,
        EnemyKind::DarkMage,
        EnemyKind::Skeleton,
        EnemyKind::Orc,
        EnemyKind::Minotaur,
        EnemyKind::LostSoul,
        EnemyKind::Ghost,
        EnemyKind::Vampire,
        EnemyKind::Lich,
        EnemyKind::Banshee,
        EnemyKind::Pirate,
        EnemyKind::SeaSerpent,
        EnemyKind::KrakenSpawn,
        EnemyKind::GhostShip,
        EnemyKind::CityGuard,
        EnemyKind::Assassin,
        EnemyKind::Golem,
        EnemyKind::AncientWarrior,
        EnemyKind::TempleGuardian,
        EnemyKind::SpiritMonk,
        EnemyKind::DivineBeast,
        EnemyKind::Celestial,
        EnemyKind::FireElemental,
        EnemyKind::LavaBeast,
        EnemyKind::DragonWhelp,
        EnemyKind::MagmaGolem,
        EnemyKind::DruidLord,
        EnemyKind::AncientGuardian,
        EnemyKind::MechDragon,
        EnemyKind::WarMachine,
    ];

    /// Snake-case identifier used in rosters and save data.
    pub fn id(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "goblin",
            EnemyKind::DarkMage => "dark_mage",
            EnemyKind::Skeleton => "skeleton",
            EnemyKind::Orc => "orc",
            EnemyKind::Minotaur => "minotaur",
            EnemyKind::LostSoul => "lost_soul",
            EnemyKind::Ghost => "ghost",
            EnemyKind::Vampire => "vampire",
            EnemyKind::Lich => "lich",
            EnemyKind::Banshee => "banshee",
            EnemyKind::Pirate => "pirate",
            EnemyKind::SeaSerpent => "sea_serpent",
            EnemyKind::KrakenSpawn => "kraken_spawn",
            EnemyKind::GhostShip => "ghost_ship",
            EnemyKind::CityGuard => "city_guard",
            EnemyKind::Assassin => "assassin",
            EnemyKind::Golem => "golem",
            EnemyKind::AncientWarrior => "ancient_warrior",
            EnemyKind::TempleGuardian => "temple_guardian",
            EnemyKind::SpiritMonk => "spirit_monk",
            EnemyKind::DivineBeast => "divine_beast",
            EnemyKind::Celestial => "celestial",
            EnemyKind::FireElemental => "fire_elemental",
            EnemyKind::LavaBeast => "lava_beast",
            EnemyKind::DragonWhelp => "dragon_whelp",
            EnemyKind::MagmaGolem => "magma_golem",
            EnemyKind::DruidLord => "druid_lord",
            EnemyKind::AncientGuardian => "ancient_guardian",
            EnemyKind::MechDragon => "mech_dragon",
            EnemyKind::WarMachine => "war_machine",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Unscaled (health, attack, defense, speed).
    pub fn base_stats(&self) -> BaseStats {
        let (health, attack, defense, speed) = match self {
            EnemyKind::Goblin => (85, 60, 18, 75),
            EnemyKind::DarkMage => (75, 85, 15, 70),
            EnemyKind::Skeleton => (70, 70, 22, 60),
            EnemyKind::Orc => (105, 75, 28, 50),
            EnemyKind::Minotaur => (130, 90, 45, 60),
            EnemyKind::LostSoul => (70, 80, 15, 85),
            EnemyKind::Ghost => (65, 70, 15, 90),
            EnemyKind::Vampire => (85, 80, 30, 85),
            EnemyKind::Lich => (75, 95, 40, 65),
            EnemyKind::Banshee => (60, 90, 20, 95),
            EnemyKind::Pirate => (80, 75, 30, 70),
            EnemyKind::SeaSerpent => (120, 70, 25, 60),
            EnemyKind::KrakenSpawn => (100, 85, 40, 40),
            EnemyKind::GhostShip => (150, 60, 45, 30),
            EnemyKind::CityGuard => (95, 70, 45, 55),
            EnemyKind::Assassin => (70, 95, 25, 100),
            EnemyKind::Golem => (140, 80, 55, 30),
            EnemyKind::AncientWarrior => (110, 85, 40, 65),
            EnemyKind::TempleGuardian => (120, 75, 50, 50),
            EnemyKind::SpiritMonk => (90, 85, 35, 80),
            EnemyKind::DivineBeast => (130, 90, 45, 70),
            EnemyKind::Celestial => (100, 100, 50, 85),
            EnemyKind::FireElemental => (85, 95, 30, 90),
            EnemyKind::LavaBeast => (140, 85, 50, 45),
            EnemyKind::DragonWhelp => (110, 100, 40, 75),
            EnemyKind::MagmaGolem => (160, 90, 60, 25),
            EnemyKind::DruidLord => (200, 110, 55, 80),
            EnemyKind::AncientGuardian => (180, 95, 60, 65),
            EnemyKind::MechDragon => (220, 120, 50, 70),
            EnemyKind::WarMachine => (200, 100, 65, 50),
        };
        BaseStats::new(health, attack, defense, speed)
    }

    pub fn display_name(&self) -> String {
        display_name(self.id())
    }
}

/// Turns an enemy id into a display name: underscores become spaces and the
/// first letter of every word is upper-cased ("dark_mage" -> "Dark Mage").
pub fn display_name(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut at_word_start = true;
    for c in id.chars() {
        let c = if c == '_' { ' ' } else { c };
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Combined stat multiplier for an enemy fought after `player_victories`
/// wins at a location with the given difficulty multiplier.
pub fn scale_factor(player_victories: u32, location_multiplier: f64) -> f64 {
    (1.0 + player_victories as f64 * ENEMY_SCALE_PER_VICTORY) * location_multiplier
}

fn scale_stats(stats: BaseStats, factor: f64) -> BaseStats {
    let scale = |value: u32| (value as f64 * factor).floor() as u32;
    BaseStats::new(
        scale(stats.health),
        scale(stats.attack),
        scale(stats.defense),
        scale(stats.speed),
    )
}

/// Creates a scaled enemy from typed inputs.
pub fn spawn_enemy(kind: EnemyKind, player_victories: u32, location: Location) -> Character {
    let factor = scale_factor(player_victories, location.multiplier());
    Character::enemy(
        Some(kind),
        kind.display_name(),
        scale_stats(kind.base_stats(), factor),
    )
}

/// Creates a scaled enemy from string identifiers.
///
/// Unknown enemy ids use the default stat line and unknown location names
/// use a multiplier of 1.0; neither is an error.
pub fn create_enemy(enemy_type: &str, player_victories: u32, location_name: &str) -> Character {
    let kind = EnemyKind::from_id(enemy_type);
    let stats = match kind {
        Some(kind) => kind.base_stats(),
        None => {
            tracing::warn!(enemy_type, "unknown enemy type, using default stats");
            let (health, attack, defense, speed) = DEFAULT_ENEMY_STATS;
            BaseStats::new(health, attack, defense, speed)
        }
    };

    let location_multiplier = match Location::from_name(location_name) {
        Some(location) => location.multiplier(),
        None => {
            tracing::warn!(location_name, "unknown location, using default multiplier");
            DEFAULT_LOCATION_MULTIPLIER
        }
    };

    let factor = scale_factor(player_victories, location_multiplier);
    Character::enemy(kind, display_name(enemy_type), scale_stats(stats, factor))
}
