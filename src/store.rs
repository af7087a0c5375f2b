//! Store transactions.

use crate::character::Character;
use crate::items::StoreItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseResult {
    pub success: bool,
    pub message: String,
}

impl PurchaseResult {
    fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// Buys `item` for `player`. Gear is equipped immediately; consumables with
/// health permanently raise max health.
///
/// Nothing changes when the player cannot afford the item.
pub fn purchase(player: &mut Character, item: &StoreItem) -> PurchaseResult {
    let price = item.price();
    if player.progression.gold < price {
        return PurchaseResult::rejected("Not enough gold!");
    }
    player.progression.gold -= price;

    let result = match item {
        StoreItem::Gear(gear) => {
            player.equip(gear);
            PurchaseResult::ok(format!("Equipped {}!", gear.name))
        }
        StoreItem::Consumable(potion) if potion.health > 0 => {
            player.add_max_health(potion.health);
            PurchaseResult::ok(format!(
                "Used {}! +{} max health!",
                potion.name, potion.health
            ))
        }
        StoreItem::Consumable(other) => PurchaseResult::ok(format!("Purchased {}!", other.name)),
    };

    tracing::info!(
        player = %player.name,
        item = item.name(),
        price,
        gold_left = player.progression.gold,
        "purchase"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::items::{find_store_item, Consumable, EquipmentSlot, ItemTier};

    fn knight() -> Character {
        Character::new(CharacterClass::Knight, "Aldric")
    }

    #[test]
    fn test_cannot_afford() {
        let mut player = knight();
        player.progression.gold = 40;
        let before = player.clone();

        let sword = find_store_item("Iron Sword").unwrap();
        let result = purchase(&mut player, &sword);
        assert!(!result.success);
        assert_eq!(result.message, "Not enough gold!");
        assert_eq!(player, before);
    }

    #[test]
    fn test_gear_is_equipped() {
        let mut player = knight();
        let sword = find_store_item("Iron Sword").unwrap();
        let result = purchase(&mut player, &sword);

        assert!(result.success);
        assert_eq!(result.message, "Equipped Iron Sword!");
        assert_eq!(player.progression.gold, 100);
        assert_eq!(
            player.equipped_item(EquipmentSlot::Weapon).map(|i| i.name.as_str()),
            Some("Iron Sword")
        );
    }

    #[test]
    fn test_exact_gold_is_enough() {
        let mut player = knight();
        player.progression.gold = 50;
        let sword = find_store_item("Iron Sword").unwrap();
        assert!(purchase(&mut player, &sword).success);
        assert_eq!(player.progression.gold, 0);
    }

    #[test]
    fn test_potion_raises_max_health() {
        let mut player = knight();
        player.take_damage(50);
        let potion = find_store_item("Health Potion").unwrap();

        let result = purchase(&mut player, &potion);
        assert_eq!(result.message, "Used Health Potion! +20 max health!");
        assert_eq!(player.max_health, 140);
        assert_eq!(player.health, 90);
        assert_eq!(player.progression.gold, 125);
    }

    #[test]
    fn test_consumable_without_health() {
        let mut player = knight();
        let trinket = StoreItem::Consumable(Consumable {
            name: "Lucky Charm".to_string(),
            tier: ItemTier::Basic,
            health: 0,
            price: 10,
            description: String::new(),
        });
        let result = purchase(&mut player, &trinket);
        assert!(result.success);
        assert_eq!(result.message, "Purchased Lucky Charm!");
        assert_eq!(player.max_health, 120);
        assert_eq!(player.progression.gold, 140);
    }
}
