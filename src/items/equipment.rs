use super::types::{Equipment, EquipmentSlot, StatBonuses};
use serde::{Deserialize, Serialize};

/// Items worn by a character, one per slot.
///
/// New slots need `#[serde(default)]` so older snapshots keep loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    #[serde(default)]
    pub weapon: Option<Equipment>,
    #[serde(default)]
    pub armor: Option<Equipment>,
    #[serde(default)]
    pub accessory: Option<Equipment>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
        }
    }

    /// Puts `item` into `slot`, returning whatever was there before.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Option<Equipment>) -> Option<Equipment> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        };
        std::mem::replace(target, item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Equipment> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn total_bonuses(&self) -> StatBonuses {
        self.iter_equipped()
            .map(Equipment::bonuses)
            .fold(StatBonuses::default(), |acc, b| acc + b)
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::ItemTier;
    use super::*;

    fn item(slot: EquipmentSlot, attack: u32, defense: u32, speed: u32) -> Equipment {
        Equipment {
            name: format!("Test {}", slot.name()),
            slot,
            tier: ItemTier::Basic,
            attack_bonus: attack,
            defense_bonus: defense,
            speed_bonus: speed,
            health_bonus: 0,
            price: 0,
            description: String::new(),
        }
    }

    #[test]
    fn test_loadout_starts_empty() {
        let loadout = Loadout::new();
        assert_eq!(loadout.iter_equipped().count(), 0);
        assert_eq!(loadout.total_bonuses(), StatBonuses::default());
    }

    #[test]
    fn test_replace_returns_previous_occupant() {
        let mut loadout = Loadout::new();
        let old = item(EquipmentSlot::Weapon, 5, 0, 0);
        let new = item(EquipmentSlot::Weapon, 9, 0, 0);

        assert!(loadout.replace(EquipmentSlot::Weapon, Some(old.clone())).is_none());
        let displaced = loadout.replace(EquipmentSlot::Weapon, Some(new.clone()));

        assert_eq!(displaced, Some(old));
        assert_eq!(loadout.get(EquipmentSlot::Weapon), Some(&new));
        assert_eq!(loadout.iter_equipped().count(), 1);
    }

    #[test]
    fn test_total_bonuses_sums_all_slots() {
        let mut loadout = Loadout::new();
        loadout.replace(EquipmentSlot::Weapon, Some(item(EquipmentSlot::Weapon, 8, 0, 0)));
        loadout.replace(EquipmentSlot::Armor, Some(item(EquipmentSlot::Armor, 0, 12, 0)));
        loadout.replace(
            EquipmentSlot::Accessory,
            Some(item(EquipmentSlot::Accessory, 1, 2, 5)),
        );

        let total = loadout.total_bonuses();
        assert_eq!(total.attack, 9);
        assert_eq!(total.defense, 14);
        assert_eq!(total.speed, 5);
    }

    #[test]
    fn test_clearing_a_slot() {
        let mut loadout = Loadout::new();
        loadout.replace(EquipmentSlot::Armor, Some(item(EquipmentSlot::Armor, 0, 3, 0)));
        assert!(loadout.replace(EquipmentSlot::Armor, None).is_some());
        assert!(loadout.get(EquipmentSlot::Armor).is_none());
    }
}
