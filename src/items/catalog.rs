//! Static item data: starting gear and the store inventory.

use super::types::{Consumable, Equipment, EquipmentSlot, ItemTier, StoreItem};

#[allow(clippy::too_many_arguments)]
fn gear(
    name: &str,
    slot: EquipmentSlot,
    tier: ItemTier,
    attack_bonus: u32,
    defense_bonus: u32,
    speed_bonus: u32,
    price: u32,
    description: &str,
) -> Equipment {
    Equipment {
        name: name.to_string(),
        slot,
        tier,
        attack_bonus,
        defense_bonus,
        speed_bonus,
        health_bonus: 0,
        price,
        description: description.to_string(),
    }
}

fn consumable(name: &str, tier: ItemTier, health: u32, price: u32, description: &str) -> StoreItem {
    StoreItem::Consumable(Consumable {
        name: name.to_string(),
        tier,
        health,
        price,
        description: description.to_string(),
    })
}

/// Gear every new player character starts with.
pub fn starting_equipment(slot: EquipmentSlot) -> Equipment {
    match slot {
        EquipmentSlot::Weapon => gear(
            "Basic Weapon",
            slot,
            ItemTier::Basic,
            8,
            0,
            0,
            0,
            "A simple starter weapon",
        ),
        EquipmentSlot::Armor => gear(
            "Leather Armor",
            slot,
            ItemTier::Basic,
            0,
            12,
            0,
            0,
            "Basic leather protection",
        ),
        EquipmentSlot::Accessory => gear(
            "Simple Ring",
            slot,
            ItemTier::Basic,
            0,
            0,
            5,
            0,
            "A plain metal ring",
        ),
    }
}

/// Store inventory for one tier: weapon, armor, accessory, then a consumable.
pub fn store_items(tier: ItemTier) -> Vec<StoreItem> {
    use EquipmentSlot::{Accessory, Armor, Weapon};

    match tier {
        ItemTier::Basic => vec![
            StoreItem::Gear(gear("Iron Sword", Weapon, tier, 8, 0, 0, 50, "A sturdy iron blade")),
            StoreItem::Gear(gear(
                "Studded Leather",
                Armor,
                tier,
                0,
                12,
                0,
                40,
                "Reinforced leather armor",
            )),
            StoreItem::Gear(gear(
                "Swift Boots",
                Accessory,
                tier,
                0,
                0,
                5,
                30,
                "Lightweight traveling boots",
            )),
            consumable("Health Potion", tier, 20, 25, "Restores health"),
        ],
        ItemTier::Intermediate => vec![
            StoreItem::Gear(gear("Steel Blade", Weapon, tier, 15, 0, 0, 120, "Sharp steel weapon")),
            StoreItem::Gear(gear(
                "Chainmail",
                Armor,
                tier,
                0,
                18,
                0,
                100,
                "Interlocked metal rings",
            )),
            StoreItem::Gear(gear(
                "Runner's Boots",
                Accessory,
                tier,
                0,
                0,
                10,
                80,
                "Enhanced movement boots",
            )),
            consumable("Magic Elixir", tier, 40, 60, "Magical healing potion"),
        ],
        ItemTier::Advanced => vec![
            StoreItem::Gear(gear(
                "Enchanted Sword",
                Weapon,
                tier,
                25,
                0,
                0,
                250,
                "Magically enhanced blade",
            )),
            StoreItem::Gear(gear("Plate Armor", Armor, tier, 0, 28, 0, 200, "Heavy metal plating")),
            StoreItem::Gear(gear(
                "Wind Walker Boots",
                Accessory,
                tier,
                0,
                0,
                18,
                150,
                "Boots blessed by wind spirits",
            )),
            consumable("Greater Healing Potion", tier, 60, 120, "Powerful healing elixir"),
        ],
        ItemTier::Legendary => vec![
            StoreItem::Gear(gear(
                "Dragon Slayer",
                Weapon,
                tier,
                40,
                0,
                0,
                500,
                "Forged to slay dragons",
            )),
            StoreItem::Gear(gear(
                "Guardian's Plate",
                Armor,
                tier,
                0,
                42,
                0,
                400,
                "Armor of ancient guardians",
            )),
            StoreItem::Gear(gear(
                "Hermes Sandals",
                Accessory,
                tier,
                0,
                0,
                30,
                300,
                "Divine messenger's footwear",
            )),
            consumable("Phoenix Tears", tier, 100, 250, "Legendary healing essence"),
        ],
        ItemTier::Mythic => vec![
            StoreItem::Gear(gear(
                "Blade of Eternity",
                Weapon,
                tier,
                60,
                0,
                0,
                1000,
                "Weapon of the gods",
            )),
            StoreItem::Gear(gear(
                "Aegis of the Gods",
                Armor,
                tier,
                0,
                55,
                0,
                800,
                "Divine protection",
            )),
            StoreItem::Gear(gear(
                "Teleport Boots",
                Accessory,
                tier,
                0,
                0,
                45,
                600,
                "Instant movement capability",
            )),
            consumable("Ambrosia", tier, 150, 500, "Food of the gods"),
        ],
    }
}

/// Every store item across all tiers, cheapest tier first.
pub fn all_store_items() -> Vec<StoreItem> {
    ItemTier::ALL.into_iter().flat_map(store_items).collect()
}

/// Looks up a store item by display name (case-insensitive).
pub fn find_store_item(name: &str) -> Option<StoreItem> {
    let name = name.trim();
    all_store_items()
        .into_iter()
        .find(|item| item.name().eq_ignore_ascii_case(name))
}

/// Looks up any known piece of gear by name: starting gear first, then the store.
pub fn find_equipment(name: &str) -> Option<Equipment> {
    let name = name.trim();
    EquipmentSlot::ALL
        .into_iter()
        .map(starting_equipment)
        .find(|item| item.name.eq_ignore_ascii_case(name))
        .or_else(|| match find_store_item(name) {
            Some(StoreItem::Gear(item)) => Some(item),
            _ => None,
        })
}
