//! A single battle between the player and one enemy.
//!
//! The player always acts first. Turns alternate until either side drops to
//! zero health; a victory pays out rewards and records progress on the
//! player's [`Progression`](crate::character::Progression).

use crate::character::Character;
use crate::combat::{
    basic_attack, cast_spell, enemy_turn, heal, special_attack, AttackResult, CastFailure,
    EnemyAction, Spell, SpellResult,
};
use crate::core::constants::{
    LOCATION_COMPLETION_VICTORIES, MANA_REGEN_PER_ATTACK, VICTORY_GOLD_MAX, VICTORY_GOLD_MIN,
    VICTORY_GOLD_PER_REQUIRED_VICTORY, VICTORY_SHARDS_MAX, VICTORY_SHARDS_MIN,
};
use crate::enemies::{spawn_enemy, EnemyKind};
use crate::zones::Location;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    SpecialAttack,
    Heal,
    Cast(Spell),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Enemy,
}

/// Paid out on victory. Already applied to the player when returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewards {
    pub gold: u32,
    pub dragon_shards: u32,
    /// Victories at this location including this one.
    pub location_victories: u32,
    /// Winning this battle completes the final location.
    pub finale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory(Rewards),
    Defeat,
}

/// What happened during one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Attack(AttackResult),
    SpecialAttack(AttackResult),
    Heal(u32),
    Spell { spell: Spell, result: SpellResult },
    Enemy(EnemyAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub event: TurnEvent,
    /// Set when this action ended the battle.
    pub outcome: Option<BattleOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("the battle is already over")]
    BattleOver,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("it is not the enemy's turn")]
    NotEnemyTurn,

    #[error("cannot cast: {}", .0.message())]
    CannotCast(CastFailure),
}

#[derive(Debug, Clone)]
pub struct Battle {
    pub location: Location,
    pub enemy: Character,
    pub turn: Turn,
    /// Actions taken by either side so far.
    pub actions_taken: u32,
    outcome: Option<BattleOutcome>,
}

impl Battle {
    /// Starts a battle against a random enemy from the location's roster,
    /// scaled by the player's total victories.
    pub fn start(player: &Character, location: Location, rng: &mut impl Rng) -> Self {
        let kind = location
            .enemies()
            .choose(rng)
            .copied()
            .unwrap_or(EnemyKind::Goblin);
        Self::against(spawn_enemy(kind, player.progression.victories, location), location)
    }

    /// Starts a battle against a specific, already-created enemy.
    pub fn against(enemy: Character, location: Location) -> Self {
        tracing::info!(
            location = location.name(),
            enemy = %enemy.name,
            health = enemy.health,
            "battle started"
        );
        Self {
            location,
            enemy,
            turn: Turn::Player,
            actions_taken: 0,
            outcome: None,
        }
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Resolves the player's action. A rejected action leaves the battle and
    /// both combatants unchanged, and it is still the player's turn.
    pub fn player_action(
        &mut self,
        player: &mut Character,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnReport, TurnError> {
        self.ensure_turn(Turn::Player)?;

        let event = match action {
            PlayerAction::Attack => {
                let result = basic_attack(player, &mut self.enemy, rng);
                player.regenerate_mana(MANA_REGEN_PER_ATTACK);
                TurnEvent::Attack(result)
            }
            PlayerAction::SpecialAttack => {
                TurnEvent::SpecialAttack(special_attack(player, &mut self.enemy, rng))
            }
            PlayerAction::Heal => TurnEvent::Heal(heal(player, rng)),
            PlayerAction::Cast(spell) => {
                let result = cast_spell(player, spell, &mut self.enemy, rng);
                if let Some(failure) = result.failure {
                    return Err(TurnError::CannotCast(failure));
                }
                TurnEvent::Spell { spell, result }
            }
        };
        tracing::debug!(?event, enemy_health = self.enemy.health, "player acted");

        self.actions_taken += 1;
        self.turn = Turn::Enemy;
        let outcome = self.check_end(player, rng);
        Ok(TurnReport { event, outcome })
    }

    /// Runs the enemy AI for its turn.
    pub fn enemy_turn(
        &mut self,
        player: &mut Character,
        rng: &mut impl Rng,
    ) -> Result<TurnReport, TurnError> {
        self.ensure_turn(Turn::Enemy)?;

        let action = enemy_turn(&mut self.enemy, player, rng);
        tracing::debug!(?action, player_health = player.health, "enemy acted");

        self.actions_taken += 1;
        self.turn = Turn::Player;
        let outcome = self.check_end(player, rng);
        Ok(TurnReport {
            event: TurnEvent::Enemy(action),
            outcome,
        })
    }

    fn ensure_turn(&self, expected: Turn) -> Result<(), TurnError> {
        if self.is_over() {
            return Err(TurnError::BattleOver);
        }
        match (expected, self.turn) {
            (Turn::Player, Turn::Enemy) => Err(TurnError::NotPlayerTurn),
            (Turn::Enemy, Turn::Player) => Err(TurnError::NotEnemyTurn),
            _ => Ok(()),
        }
    }

    fn check_end(&mut self, player: &mut Character, rng: &mut impl Rng) -> Option<BattleOutcome> {
        let outcome = if !player.is_alive() {
            BattleOutcome::Defeat
        } else if !self.enemy.is_alive() {
            BattleOutcome::Victory(award_victory(player, self.location, rng))
        } else {
            return None;
        };

        tracing::info!(
            location = self.location.name(),
            enemy = %self.enemy.name,
            ?outcome,
            actions = self.actions_taken,
            "battle over"
        );
        self.outcome = Some(outcome);
        Some(outcome)
    }
}

/// Pays out gold and dragon shards and counts the victory.
pub fn award_victory(player: &mut Character, location: Location, rng: &mut impl Rng) -> Rewards {
    let gold = rng.gen_range(VICTORY_GOLD_MIN..=VICTORY_GOLD_MAX)
        + location.min_victories_required() * VICTORY_GOLD_PER_REQUIRED_VICTORY;
    let dragon_shards = rng.gen_range(VICTORY_SHARDS_MIN..=VICTORY_SHARDS_MAX);

    let progress = &mut player.progression;
    progress.gold = progress.gold.saturating_add(gold);
    progress.dragon_shards = progress.dragon_shards.saturating_add(dragon_shards);
    let location_victories = progress.record_victory(location.name());

    Rewards {
        gold,
        dragon_shards,
        location_victories,
        finale: location.is_finale() && location_victories == LOCATION_COMPLETION_VICTORIES,
    }
}

/// After a defeat the player wakes up at full health.
pub fn recover_from_defeat(player: &mut Character) {
    player.restore_full_health();
    tracing::info!(player = %player.name, "recovered from defeat");
}
