use super::class::{BaseStats, CharacterClass};
use super::health::{rescale_health, restore};
use crate::core::constants::{CASTER_MAX_MANA, DEFAULT_ENEMY_STATS, STARTING_GOLD};
use crate::enemies::EnemyKind;
use crate::items::{find_equipment, starting_equipment, Equipment, EquipmentSlot, Loadout, StatBonuses};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player progress carried between battles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub victories: u32,
    pub gold: u32,
    #[serde(default)]
    pub dragon_shards: u32,
    /// Victories per location, keyed by location display name.
    #[serde(default)]
    pub location_victories: BTreeMap<String, u32>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            victories: 0,
            gold: STARTING_GOLD,
            dragon_shards: 0,
            location_victories: BTreeMap::new(),
        }
    }
}

impl Progression {
    pub fn victories_at(&self, location_name: &str) -> u32 {
        self.location_victories
            .get(location_name)
            .copied()
            .unwrap_or(0)
    }

    /// Counts a won battle at `location_name`, returning the new count there.
    pub fn record_victory(&mut self, location_name: &str) -> u32 {
        self.victories = self.victories.saturating_add(1);
        let count = self
            .location_victories
            .entry(location_name.to_string())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }
}

/// A combatant: the player character or a spawned enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub class: CharacterClass,
    pub name: String,
    pub is_enemy: bool,
    pub enemy_kind: Option<EnemyKind>,
    pub health: u32,
    pub max_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_speed: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub frozen_turns: u32,
    pub progression: Progression,
    pub(crate) equipped: Loadout,
}

impl Character {
    /// Creates a player character from its class preset, wearing starting gear.
    pub fn new(class: CharacterClass, name: impl Into<String>) -> Self {
        let stats = class.preset().unwrap_or_else(default_enemy_stats);
        let mut character = Self::blank(class, name.into(), stats);
        for slot in EquipmentSlot::ALL {
            character.equip(&starting_equipment(slot));
        }
        character
    }

    /// Creates an enemy combatant with already-scaled stats and no gear.
    pub fn enemy(kind: Option<EnemyKind>, name: impl Into<String>, stats: BaseStats) -> Self {
        let mut character = Self::blank(CharacterClass::Enemy, name.into(), stats);
        character.is_enemy = true;
        character.enemy_kind = kind;
        character
    }

    fn blank(class: CharacterClass, name: String, stats: BaseStats) -> Self {
        let max_mana = if class.is_caster() { CASTER_MAX_MANA } else { 0 };
        Self {
            class,
            name,
            is_enemy: false,
            enemy_kind: None,
            health: stats.health,
            max_health: stats.health,
            base_attack: stats.attack,
            base_defense: stats.defense,
            base_speed: stats.speed,
            mana: max_mana,
            max_mana,
            frozen_turns: 0,
            progression: Progression::default(),
            equipped: Loadout::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_caster(&self) -> bool {
        self.class.is_caster()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    pub fn loadout(&self) -> &Loadout {
        &self.equipped
    }

    pub fn equipped_item(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        self.equipped.get(slot)
    }

    pub fn equipment_bonuses(&self) -> StatBonuses {
        self.equipped.total_bonuses()
    }

    /// Sum of attack bonuses across all equipped items. Spells add this to
    /// their base damage.
    pub fn weapon_bonus(&self) -> u32 {
        self.equipment_bonuses().attack
    }

    pub fn total_attack(&self) -> u32 {
        self.base_attack.saturating_add(self.equipment_bonuses().attack)
    }

    pub fn total_defense(&self) -> u32 {
        self.base_defense.saturating_add(self.equipment_bonuses().defense)
    }

    pub fn total_speed(&self) -> u32 {
        self.base_speed.saturating_add(self.equipment_bonuses().speed)
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restores up to `amount` health, returning the amount actually healed.
    pub fn heal_by(&mut self, amount: u32) -> u32 {
        restore(&mut self.health, self.max_health, amount)
    }

    pub fn restore_full_health(&mut self) {
        self.health = self.max_health;
    }

    /// Permanently raises max health and current health by the same amount.
    pub fn add_max_health(&mut self, amount: u32) {
        self.max_health = self.max_health.saturating_add(amount);
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Regains mana up to the cap. No effect on non-casters.
    pub fn regenerate_mana(&mut self, amount: u32) {
        if self.is_caster() {
            self.mana = self.mana.saturating_add(amount).min(self.max_mana);
        }
    }

    /// Deducts `cost` mana if enough is available.
    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Equips a copy of `item`, returning the item it displaced.
    ///
    /// Health bonuses move max health while keeping the current fraction of
    /// health: the displaced bonus comes off first (never dropping below 1
    /// health), then the new bonus is applied.
    pub fn equip(&mut self, item: &Equipment) -> Option<Equipment> {
        let (old_health, old_max) = (self.health, self.max_health);
        let displaced = self.equipped.replace(item.slot, Some(item.clone()));

        if let Some(old) = displaced.as_ref().filter(|old| old.health_bonus > 0) {
            self.max_health = self.max_health.saturating_sub(old.health_bonus);
            self.health = rescale_health(old_health, old_max, self.max_health)
                .max(1)
                .min(self.max_health);
        }

        if item.health_bonus > 0 {
            self.max_health = self.max_health.saturating_add(item.health_bonus);
            self.health = rescale_health(old_health, old_max, self.max_health);
        }

        tracing::debug!(
            character = %self.name,
            slot = item.slot.name(),
            item = %item.name,
            "equipped item"
        );
        displaced
    }

    /// Equips a catalog item by name. Returns false, changing nothing, when
    /// the name is not a known piece of gear.
    pub fn equip_by_name(&mut self, name: &str) -> bool {
        match find_equipment(name) {
            Some(item) => {
                self.equip(&item);
                true
            }
            None => {
                tracing::warn!(item = name, "cannot equip unknown item");
                false
            }
        }
    }

    /// Empties `slot`, returning the removed item. Health bonuses come off
    /// with the same ratio rule as [`Character::equip`].
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        let (old_health, old_max) = (self.health, self.max_health);
        let removed = self.equipped.replace(slot, None)?;

        if removed.health_bonus > 0 {
            self.max_health = self.max_health.saturating_sub(removed.health_bonus);
            self.health = rescale_health(old_health, old_max, self.max_health)
                .max(1)
                .min(self.max_health);
        }
        Some(removed)
    }
}

fn default_enemy_stats() -> BaseStats {
    let (health, attack, defense, speed) = DEFAULT_ENEMY_STATS;
    BaseStats::new(health, attack, defense, speed)
}
