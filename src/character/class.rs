use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Knight,
    Wizard,
    Rogue,
    Soldier,
    Enemy,
}

/// Unscaled vitals and attributes for a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub const fn new(health: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            health,
            attack,
            defense,
            speed,
        }
    }
}

impl CharacterClass {
    /// Classes a player can pick.
    pub const PLAYABLE: [CharacterClass; 4] = [
        CharacterClass::Knight,
        CharacterClass::Wizard,
        CharacterClass::Rogue,
        CharacterClass::Soldier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Knight => "Knight",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Soldier => "Soldier",
            CharacterClass::Enemy => "Enemy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::PLAYABLE
            .into_iter()
            .chain(std::iter::once(CharacterClass::Enemy))
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }

    /// Starting stats for a playable class. Enemies have no preset; their
    /// stats come from the enemy table.
    pub fn preset(&self) -> Option<BaseStats> {
        match self {
            CharacterClass::Knight => Some(BaseStats::new(120, 65, 95, 70)),
            CharacterClass::Wizard => Some(BaseStats::new(90, 75, 70, 85)),
            CharacterClass::Rogue => Some(BaseStats::new(95, 70, 75, 105)),
            CharacterClass::Soldier => Some(BaseStats::new(110, 68, 85, 80)),
            CharacterClass::Enemy => None,
        }
    }

    pub fn is_caster(&self) -> bool {
        matches!(self, CharacterClass::Wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(
            CharacterClass::Knight.preset(),
            Some(BaseStats::new(120, 65, 95, 70))
        );
        assert_eq!(
            CharacterClass::Rogue.preset().map(|s| s.speed),
            Some(105)
        );
        assert!(CharacterClass::Enemy.preset().is_none());
    }

    #[test]
    fn test_only_wizard_casts() {
        for class in CharacterClass::PLAYABLE {
            assert_eq!(class.is_caster(), class == CharacterClass::Wizard);
        }
        assert!(!CharacterClass::Enemy.is_caster());
    }

    #[test]
    fn test_from_name_round_trips() {
        for class in CharacterClass::PLAYABLE {
            assert_eq!(CharacterClass::from_name(class.name()), Some(class));
        }
        assert_eq!(CharacterClass::from_name("wizard"), Some(CharacterClass::Wizard));
        assert_eq!(CharacterClass::from_name("Bard"), None);
    }
}
