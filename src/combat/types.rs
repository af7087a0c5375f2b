use serde::{Deserialize, Serialize};

/// Tag describing what a spell did beyond plain damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellEffect {
    Heal,
    Fire,
    Freeze,
    Pierce,
}

impl SpellEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpellEffect::Heal => "heal",
            SpellEffect::Fire => "fire",
            SpellEffect::Freeze => "freeze",
            SpellEffect::Pierce => "pierce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spell {
    Fireball,
    IceShard,
    LightningBolt,
    ArcaneHealing,
}

/// Static definition of a spell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellDef {
    pub name: &'static str,
    pub description: &'static str,
    pub damage_base: u32,
    pub damage_variance: f64,
    pub effect: SpellEffect,
    pub mana_cost: u32,
    /// Probability that the effect's status procs (freeze only).
    pub effect_chance: f64,
}

impl Spell {
    pub const ALL: [Spell; 4] = [
        Spell::Fireball,
        Spell::IceShard,
        Spell::LightningBolt,
        Spell::ArcaneHealing,
    ];

    pub fn def(&self) -> SpellDef {
        match self {
            Spell::Fireball => SpellDef {
                name: "Fireball",
                description: "Explosive fire magic with high damage",
                damage_base: 130,
                damage_variance: 0.3,
                effect: SpellEffect::Fire,
                mana_cost: 25,
                effect_chance: 0.0,
            },
            Spell::IceShard => SpellDef {
                name: "Ice Shard",
                description: "Piercing ice that may freeze the enemy",
                damage_base: 90,
                damage_variance: 0.2,
                effect: SpellEffect::Freeze,
                mana_cost: 20,
                effect_chance: 0.3,
            },
            Spell::LightningBolt => SpellDef {
                name: "Lightning Bolt",
                description: "Electric attack that ignores armor",
                damage_base: 100,
                damage_variance: 0.25,
                effect: SpellEffect::Pierce,
                mana_cost: 22,
                effect_chance: 0.0,
            },
            Spell::ArcaneHealing => SpellDef {
                name: "Arcane Healing",
                description: "Magical restoration of health",
                damage_base: 0,
                damage_variance: 0.0,
                effect: SpellEffect::Heal,
                mana_cost: 15,
                effect_chance: 0.0,
            },
        }
    }

    /// Lookup by camel-case key ("iceShard") or display name ("Ice Shard").
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|spell| {
            spell.def().name.eq_ignore_ascii_case(key) || spell.key().eq_ignore_ascii_case(key)
        })
    }

    pub fn key(&self) -> &'static str {
        match self {
            Spell::Fireball => "fireball",
            Spell::IceShard => "iceShard",
            Spell::LightningBolt => "lightningBolt",
            Spell::ArcaneHealing => "arcaneHealing",
        }
    }
}

/// Outcome of a basic or special attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage rolled before defense.
    pub rolled: u32,
    /// Damage actually dealt after mitigation.
    pub damage: u32,
}

/// Why a spell fizzled without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastFailure {
    NotACaster,
    NotEnoughMana { required: u32, available: u32 },
}

impl CastFailure {
    pub fn message(&self) -> &'static str {
        match self {
            CastFailure::NotACaster => "Not a wizard",
            CastFailure::NotEnoughMana { .. } => "Not enough mana",
        }
    }
}

/// Result of a cast. `amount` is damage dealt, or health restored for a
/// heal. A failed cast has zero amount and no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellResult {
    pub amount: u32,
    pub effect: Option<SpellEffect>,
    pub failure: Option<CastFailure>,
}

impl SpellResult {
    pub(crate) fn failed(failure: CastFailure) -> Self {
        Self {
            amount: 0,
            effect: None,
            failure: Some(failure),
        }
    }

    pub(crate) fn resolved(amount: u32, effect: Option<SpellEffect>) -> Self {
        Self {
            amount,
            effect,
            failure: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// "heal", "fire", "freeze", "pierce", the failure message, or `None`
    /// for plain damage.
    pub fn effect_label(&self) -> Option<&'static str> {
        match (self.failure, self.effect) {
            (Some(failure), _) => Some(failure.message()),
            (None, Some(effect)) => Some(effect.as_str()),
            (None, None) => None,
        }
    }
}

/// What the enemy did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    /// Skipped while frozen; `remaining` is the counter after decrementing.
    Frozen { remaining: u32 },
    Attack(AttackResult),
    SpecialAttack(AttackResult),
    Heal(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_costs() {
        assert_eq!(Spell::Fireball.def().mana_cost, 25);
        assert_eq!(Spell::IceShard.def().mana_cost, 20);
        assert_eq!(Spell::LightningBolt.def().mana_cost, 22);
        assert_eq!(Spell::ArcaneHealing.def().mana_cost, 15);
    }

    #[test]
    fn test_only_ice_shard_procs() {
        for spell in Spell::ALL {
            let def = spell.def();
            if spell == Spell::IceShard {
                assert!((def.effect_chance - 0.3).abs() < f64::EPSILON);
            } else {
                assert_eq!(def.effect_chance, 0.0);
            }
        }
    }

    #[test]
    fn test_from_key_accepts_key_and_name() {
        assert_eq!(Spell::from_key("iceShard"), Some(Spell::IceShard));
        assert_eq!(Spell::from_key("Lightning Bolt"), Some(Spell::LightningBolt));
        assert_eq!(Spell::from_key("fireball"), Some(Spell::Fireball));
        assert_eq!(Spell::from_key("meteor"), None);
    }

    #[test]
    fn test_effect_label() {
        let failed = SpellResult::failed(CastFailure::NotEnoughMana {
            required: 25,
            available: 3,
        });
        assert_eq!(failed.effect_label(), Some("Not enough mana"));
        assert!(!failed.succeeded());

        let plain = SpellResult::resolved(40, None);
        assert_eq!(plain.effect_label(), None);

        let heal = SpellResult::resolved(12, Some(SpellEffect::Heal));
        assert_eq!(heal.effect_label(), Some("heal"));
    }
}
