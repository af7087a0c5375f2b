// Damage rolls
pub const DAMAGE_RANGE_FRACTION: f64 = 0.2;
pub const SPECIAL_ATTACK_MULTIPLIER: f64 = 1.5;

// Defense mitigation: reduction = def / (def + DEFENSE_SOFTCAP)
pub const DEFENSE_SOFTCAP: f64 = 150.0;
pub const MIN_DAMAGE_FRACTION: f64 = 0.4;

// Healing (inclusive ranges)
pub const HEAL_MIN: u32 = 25;
pub const HEAL_MAX: u32 = 40;
pub const SPELL_HEAL_MIN: u32 = 40;
pub const SPELL_HEAL_MAX: u32 = 60;

// Mana
pub const CASTER_MAX_MANA: u32 = 100;
pub const MANA_REGEN_PER_ATTACK: u32 = 8;

// Status effects
pub const FREEZE_TURNS: u32 = 2;

// Enemy AI: roll < ATTACK -> attack, < SPECIAL -> special, else heal
pub const ENEMY_ATTACK_THRESHOLD: f64 = 0.6;
pub const ENEMY_SPECIAL_THRESHOLD: f64 = 0.8;

// Enemy scaling
pub const ENEMY_SCALE_PER_VICTORY: f64 = 0.03;
pub const DEFAULT_LOCATION_MULTIPLIER: f64 = 1.0;

// Fallback stats for enemy ids missing from the table (health, attack, defense, speed)
pub const DEFAULT_ENEMY_STATS: (u32, u32, u32, u32) = (80, 70, 35, 65);

// Economy
pub const STARTING_GOLD: u32 = 150;
pub const VICTORY_GOLD_MIN: u32 = 30;
pub const VICTORY_GOLD_MAX: u32 = 60;
pub const VICTORY_GOLD_PER_REQUIRED_VICTORY: u32 = 15;
pub const VICTORY_SHARDS_MIN: u32 = 1;
pub const VICTORY_SHARDS_MAX: u32 = 3;

// Locations
pub const LOCATION_COMPLETION_VICTORIES: u32 = 3;

// Save system
pub const SAVE_PREFIX: &str = "battle_druids_";
pub const QUICK_SAVE_KEY: &str = "battle_druids_quicksave";
pub const AUTO_SAVE_KEY: &str = "battle_druids_autosave";
pub const SAVE_FORMAT_VERSION: &str = "1.0.0";
pub const MAX_AUTO_SAVES: usize = 5;
