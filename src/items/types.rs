use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Accessory => "accessory",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Ordinal rarity of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemTier {
    Basic = 0,
    Intermediate = 1,
    Advanced = 2,
    Legendary = 3,
    Mythic = 4,
}

impl ItemTier {
    pub const ALL: [ItemTier; 5] = [
        ItemTier::Basic,
        ItemTier::Intermediate,
        ItemTier::Advanced,
        ItemTier::Legendary,
        ItemTier::Mythic,
    ];

    /// Returns the display name for this tier.
    pub fn name(&self) -> &'static str {
        match self {
            ItemTier::Basic => "Basic",
            ItemTier::Intermediate => "Intermediate",
            ItemTier::Advanced => "Advanced",
            ItemTier::Legendary => "Legendary",
            ItemTier::Mythic => "Mythic",
        }
    }
}

/// Flat stat bonuses summed across equipped items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonuses {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub health: u32,
}

impl std::ops::Add for StatBonuses {
    type Output = StatBonuses;

    fn add(self, other: StatBonuses) -> StatBonuses {
        StatBonuses {
            attack: self.attack.saturating_add(other.attack),
            defense: self.defense.saturating_add(other.defense),
            speed: self.speed.saturating_add(other.speed),
            health: self.health.saturating_add(other.health),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub slot: EquipmentSlot,
    pub tier: ItemTier,
    #[serde(default)]
    pub attack_bonus: u32,
    #[serde(default)]
    pub defense_bonus: u32,
    #[serde(default)]
    pub speed_bonus: u32,
    #[serde(default)]
    pub health_bonus: u32,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub description: String,
}

impl Equipment {
    pub fn bonuses(&self) -> StatBonuses {
        StatBonuses {
            attack: self.attack_bonus,
            defense: self.defense_bonus,
            speed: self.speed_bonus,
            health: self.health_bonus,
        }
    }

    /// Short stat line, e.g. "ATK +8 HP +20".
    pub fn stat_text(&self) -> String {
        let mut parts = Vec::new();
        if self.attack_bonus > 0 {
            parts.push(format!("ATK +{}", self.attack_bonus));
        }
        if self.defense_bonus > 0 {
            parts.push(format!("DEF +{}", self.defense_bonus));
        }
        if self.speed_bonus > 0 {
            parts.push(format!("SPD +{}", self.speed_bonus));
        }
        if self.health_bonus > 0 {
            parts.push(format!("HP +{}", self.health_bonus));
        }
        parts.join(" ")
    }
}

/// A consumable sold in the store. Health is a permanent max-health increase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub name: String,
    pub tier: ItemTier,
    pub health: u32,
    pub price: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreItem {
    Gear(Equipment),
    Consumable(Consumable),
}

impl StoreItem {
    pub fn name(&self) -> &str {
        match self {
            StoreItem::Gear(item) => &item.name,
            StoreItem::Consumable(item) => &item.name,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            StoreItem::Gear(item) => item.price,
            StoreItem::Consumable(item) => item.price,
        }
    }

    pub fn tier(&self) -> ItemTier {
        match self {
            StoreItem::Gear(item) => item.tier,
            StoreItem::Consumable(item) => item.tier,
        }
    }

    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self {
            StoreItem::Gear(item) => Some(item.slot),
            StoreItem::Consumable(_) => None,
        }
    }
}
