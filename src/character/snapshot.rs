//! Persistent form of a player character.

use super::class::CharacterClass;
use super::save::SaveError;
use super::types::{Character, Progression};
use crate::core::constants::CASTER_MAX_MANA;
use crate::items::Loadout;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const REQUIRED_FIELDS: [&str; 3] = ["class", "name", "health"];

/// Everything about a character that survives between sessions. Battle-only
/// state (frozen turns) is not persisted.
///
/// Optional stats fall back to the class preset when absent, so hand-edited
/// or older saves still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub class: CharacterClass,
    pub name: String,
    pub health: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_health: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_attack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_defense: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_speed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mana: Option<u32>,
    #[serde(default)]
    pub progression: Progression,
    #[serde(default)]
    pub equipment: Loadout,
}

impl CharacterSnapshot {
    pub fn from_character(character: &Character) -> Self {
        Self {
            class: character.class,
            name: character.name.clone(),
            health: character.health,
            max_health: Some(character.max_health),
            base_attack: Some(character.base_attack),
            base_defense: Some(character.base_defense),
            base_speed: Some(character.base_speed),
            mana: Some(character.mana),
            max_mana: Some(character.max_mana),
            progression: character.progression.clone(),
            equipment: character.loadout().clone(),
        }
    }

    /// Rebuilds a player character, clamping vitals into range.
    ///
    /// Saved max health already includes gear health bonuses, so gear is
    /// re-slotted by each item's own slot without rescaling health.
    pub fn into_character(self) -> Result<Character, SaveError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SaveError::InvalidSnapshot("name is empty".to_string()));
        }
        let preset = self.class.preset().ok_or_else(|| {
            SaveError::InvalidSnapshot(format!("{} is not a playable class", self.class.name()))
        })?;

        let mut character = Character::new(self.class, name);
        let mut loadout = Loadout::new();
        for item in self.equipment.iter_equipped() {
            if let Some(previous) = loadout.replace(item.slot, Some(item.clone())) {
                tracing::warn!(item = %previous.name, "dropping duplicate item for slot");
            }
        }
        character.equipped = loadout;

        character.base_attack = self.base_attack.unwrap_or(preset.attack);
        character.base_defense = self.base_defense.unwrap_or(preset.defense);
        character.base_speed = self.base_speed.unwrap_or(preset.speed);
        character.max_health = self.max_health.unwrap_or(preset.health).max(1);
        character.health = self.health.min(character.max_health);

        let default_mana = if self.class.is_caster() {
            CASTER_MAX_MANA
        } else {
            0
        };
        character.max_mana = self.max_mana.unwrap_or(default_mana);
        character.mana = self
            .mana
            .unwrap_or(character.max_mana)
            .min(character.max_mana);

        character.progression = self.progression;
        Ok(character)
    }

    /// Flattens the snapshot into a plain key-value map.
    pub fn to_key_values(&self) -> Result<Map<String, Value>, SaveError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(SaveError::InvalidSnapshot(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }

    /// Parses a key-value map, requiring at least class, name and health.
    pub fn from_key_values(map: &Map<String, Value>) -> Result<Self, SaveError> {
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !map.contains_key(**key)) {
            return Err(SaveError::InvalidSnapshot(format!(
                "missing field '{}'",
                missing
            )));
        }

        serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| SaveError::InvalidSnapshot(e.to_string()))
    }
}

impl Character {
    pub fn to_snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot::from_character(self)
    }

    pub fn from_snapshot(snapshot: CharacterSnapshot) -> Result<Self, SaveError> {
        snapshot.into_character()
    }
}
