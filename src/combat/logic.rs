//! Damage, healing, spell and enemy-turn resolution.
//!
//! Every function mutates only the characters passed in and draws all
//! randomness from the supplied generator.

use super::types::{AttackResult, CastFailure, EnemyAction, Spell, SpellEffect, SpellResult};
use crate::character::Character;
use crate::core::constants::*;
use rand::Rng;

/// Rolls uniformly in `base ± floor(base * fraction)`, inclusive.
pub fn roll_damage(base: u32, fraction: f64, rng: &mut impl Rng) -> u32 {
    let spread = (base as f64 * fraction).floor() as u32;
    rng.gen_range(base.saturating_sub(spread)..=base.saturating_add(spread))
}

/// Applies fractional defense: `def / (def + 150)` of the damage is absorbed,
/// but at least 40% of the rolled damage always gets through.
pub fn mitigate(rolled: u32, defense: u32) -> u32 {
    let reduction = defense as f64 / (defense as f64 + DEFENSE_SOFTCAP);
    let reduced = (rolled as f64 * (1.0 - reduction)).floor() as u32;
    let minimum = (rolled as f64 * MIN_DAMAGE_FRACTION).floor() as u32;
    reduced.max(minimum)
}

/// Flat defense used by spells: subtract defense, minimum 1.
pub fn flat_mitigate(rolled: u32, defense: u32) -> u32 {
    rolled.saturating_sub(defense).max(1)
}

fn strike(base: u32, defender: &mut Character, rng: &mut impl Rng) -> AttackResult {
    let rolled = roll_damage(base, DAMAGE_RANGE_FRACTION, rng);
    let damage = mitigate(rolled, defender.total_defense());
    defender.take_damage(damage);
    AttackResult { rolled, damage }
}

pub fn basic_attack(
    attacker: &Character,
    defender: &mut Character,
    rng: &mut impl Rng,
) -> AttackResult {
    strike(attacker.total_attack(), defender, rng)
}

/// Like [`basic_attack`] with 1.5x base damage.
pub fn special_attack(
    attacker: &Character,
    defender: &mut Character,
    rng: &mut impl Rng,
) -> AttackResult {
    let base = (attacker.total_attack() as f64 * SPECIAL_ATTACK_MULTIPLIER).floor() as u32;
    strike(base, defender, rng)
}

/// Self-heal for 25-40. Returns the health actually restored.
pub fn heal(character: &mut Character, rng: &mut impl Rng) -> u32 {
    let amount = rng.gen_range(HEAL_MIN..=HEAL_MAX);
    character.heal_by(amount)
}

pub fn can_cast(caster: &Character, spell: Spell) -> bool {
    caster.is_caster() && caster.mana >= spell.def().mana_cost
}

/// Casts `spell` from `caster` at `target`.
///
/// Mana is spent before the spell resolves. A failed cast leaves both
/// characters untouched.
pub fn cast_spell(
    caster: &mut Character,
    spell: Spell,
    target: &mut Character,
    rng: &mut impl Rng,
) -> SpellResult {
    if !caster.is_caster() {
        return SpellResult::failed(CastFailure::NotACaster);
    }

    let def = spell.def();
    if !caster.spend_mana(def.mana_cost) {
        return SpellResult::failed(CastFailure::NotEnoughMana {
            required: def.mana_cost,
            available: caster.mana,
        });
    }

    let base = def.damage_base + caster.weapon_bonus();
    let (damage, effect) = match def.effect {
        SpellEffect::Heal => {
            let amount = rng.gen_range(SPELL_HEAL_MIN..=SPELL_HEAL_MAX);
            let healed = caster.heal_by(amount);
            tracing::debug!(spell = def.name, healed, "spell heal");
            return SpellResult::resolved(healed, Some(SpellEffect::Heal));
        }
        SpellEffect::Pierce => (
            roll_damage(base, def.damage_variance, rng),
            Some(SpellEffect::Pierce),
        ),
        SpellEffect::Fire => {
            let rolled = roll_damage(base, def.damage_variance, rng);
            (
                flat_mitigate(rolled, target.total_defense()),
                Some(SpellEffect::Fire),
            )
        }
        SpellEffect::Freeze => {
            let rolled = roll_damage(base, def.damage_variance, rng);
            let damage = flat_mitigate(rolled, target.total_defense());
            if rng.gen::<f64>() < def.effect_chance {
                target.frozen_turns = FREEZE_TURNS;
                (damage, Some(SpellEffect::Freeze))
            } else {
                (damage, None)
            }
        }
    };

    target.take_damage(damage);
    tracing::debug!(
        spell = def.name,
        damage,
        effect = effect.map(|e| e.as_str()),
        target = %target.name,
        "spell resolved"
    );
    SpellResult::resolved(damage, effect)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Attack,
    Special,
    Heal,
}

fn intent_for_roll(roll: f64) -> Intent {
    if roll < ENEMY_ATTACK_THRESHOLD {
        Intent::Attack
    } else if roll < ENEMY_SPECIAL_THRESHOLD {
        Intent::Special
    } else {
        Intent::Heal
    }
}

/// Runs the enemy's turn: 60% attack, 20% special attack, 20% self-heal.
/// A frozen enemy loses the turn and thaws by one step instead.
pub fn enemy_turn(
    enemy: &mut Character,
    player: &mut Character,
    rng: &mut impl Rng,
) -> EnemyAction {
    if enemy.frozen_turns > 0 {
        enemy.frozen_turns -= 1;
        return EnemyAction::Frozen {
            remaining: enemy.frozen_turns,
        };
    }

    let roll: f64 = rng.gen();
    match intent_for_roll(roll) {
        Intent::Attack => EnemyAction::Attack(basic_attack(enemy, player, rng)),
        Intent::Special => EnemyAction::SpecialAttack(special_attack(enemy, player, rng)),
        Intent::Heal => EnemyAction::Heal(heal(enemy, rng)),
    }
}
