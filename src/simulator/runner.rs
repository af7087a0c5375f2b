//! Main simulation runner using the real battle flow.

use super::config::SimConfig;
use super::report::{BattleStats, SimReport};
use crate::battle::{Battle, BattleOutcome, PlayerAction};
use crate::character::Character;
use crate::combat::{can_cast, Spell};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Below this fraction of max health the simulated player heals.
const LOW_HEALTH_FRACTION: f64 = 0.3;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };

        let stats = simulate_battle(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Battle {}/{} - {} vs {}: {} in {} turns, {} HP left",
                run_idx + 1,
                config.num_runs,
                config.class.name(),
                stats.enemy_name,
                stats.result_label(),
                stats.player_turns,
                stats.player_health_left
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(config, all_runs)
}

/// Fights one battle with a fresh character of the configured class.
pub fn simulate_battle(config: &SimConfig, rng: &mut impl Rng) -> BattleStats {
    simulate_battle_with(config, choose_action, rng)
}

/// Same as [`simulate_battle`] but with a caller-supplied strategy. A rejected
/// action ends the battle and is recorded in [`BattleStats::error`].
pub fn simulate_battle_with(
    config: &SimConfig,
    strategy: impl Fn(&Character) -> PlayerAction,
    rng: &mut impl Rng,
) -> BattleStats {
    let mut player = Character::new(config.class, "Simulated");
    player.progression.victories = config.starting_victories;

    let mut battle = Battle::start(&player, config.location, rng);
    let enemy_name = battle.enemy.name.clone();
    let mut player_turns = 0;
    let mut outcome = None;
    let mut error = None;

    while outcome.is_none() && player_turns < config.max_turns_per_battle {
        let action = strategy(&player);
        player_turns += 1;
        let turn = battle.player_action(&mut player, action, rng).and_then(|report| {
            match report.outcome {
                Some(outcome) => Ok(Some(outcome)),
                None => battle.enemy_turn(&mut player, rng).map(|report| report.outcome),
            }
        });
        match turn {
            Ok(result) => outcome = result,
            Err(e) => {
                tracing::warn!(?action, error = %e, turn = player_turns, "simulated turn rejected");
                error = Some(e.to_string());
                break;
            }
        }
    }

    let (won, gold_earned) = match outcome {
        Some(BattleOutcome::Victory(rewards)) => (Some(true), rewards.gold),
        Some(BattleOutcome::Defeat) => (Some(false), 0),
        None => (None, 0),
    };

    BattleStats {
        enemy_name,
        won,
        player_turns,
        player_health_left: player.health,
        gold_earned,
        error,
    }
}

/// Simple fixed strategy: heal when low, otherwise hit as hard as possible.
/// Wizards prefer spells while they have the mana.
pub fn choose_action(player: &Character) -> PlayerAction {
    let low = (player.health as f64) < player.max_health as f64 * LOW_HEALTH_FRACTION;

    if player.is_caster() {
        if low && can_cast(player, Spell::ArcaneHealing) {
            return PlayerAction::Cast(Spell::ArcaneHealing);
        }
        if can_cast(player, Spell::Fireball) {
            return PlayerAction::Cast(Spell::Fireball);
        }
        // basic attacks regenerate mana
        return if low {
            PlayerAction::Heal
        } else {
            PlayerAction::Attack
        };
    }

    if low {
        PlayerAction::Heal
    } else {
        PlayerAction::SpecialAttack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::zones::Location;

    #[test]
    fn test_seeded_simulation_is_deterministic() {
        let config = SimConfig {
            num_runs: 25,
            seed: Some(99),
            verbosity: 0,
            ..Default::default()
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.runs, b.runs);
        assert_eq!(a.wins, b.wins);
    }

    #[test]
    fn test_every_run_is_accounted_for() {
        let config = SimConfig {
            num_runs: 40,
            seed: Some(3),
            class: CharacterClass::Wizard,
            location: Location::Maze,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config);
        assert_eq!(report.num_runs, 40);
        assert_eq!(report.wins + report.losses + report.timeouts, 40);
        assert_eq!(report.errors, 0);
    }

    #[test]
    fn test_rejected_action_is_not_a_timeout() {
        let config = SimConfig {
            class: CharacterClass::Knight,
            verbosity: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(12);
        let stats = simulate_battle_with(&config, |_| PlayerAction::Cast(Spell::Fireball), &mut rng);

        assert_eq!(stats.won, None);
        assert_eq!(stats.player_turns, 1);
        assert_eq!(stats.result_label(), "error");
        assert!(stats.error.as_deref().unwrap().contains("Not a wizard"));

        let report = SimReport::from_runs(&config, vec![stats]);
        assert_eq!(report.errors, 1);
        assert_eq!(report.timeouts, 0);
    }

    #[test]
    fn test_turn_limit_causes_timeout() {
        let config = SimConfig {
            num_runs: 5,
            seed: Some(1),
            max_turns_per_battle: 0,
            location: Location::DruidsCastle,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config);
        assert!(report.runs.iter().all(|r| r.player_turns == 0));
        assert_eq!(report.timeouts, 5);
        assert_eq!(report.win_rate(), 0.0);
    }

    #[test]
    fn test_strategy() {
        let mut knight = Character::new(CharacterClass::Knight, "Aldric");
        assert_eq!(choose_action(&knight), PlayerAction::SpecialAttack);
        knight.health = 10;
        assert_eq!(choose_action(&knight), PlayerAction::Heal);

        let mut wizard = Character::new(CharacterClass::Wizard, "Merla");
        assert_eq!(choose_action(&wizard), PlayerAction::Cast(Spell::Fireball));
        wizard.mana = 10;
        assert_eq!(choose_action(&wizard), PlayerAction::Attack);
        wizard.health = 5;
        wizard.mana = 20;
        assert_eq!(choose_action(&wizard), PlayerAction::Cast(Spell::ArcaneHealing));
    }
}
