//! Simulation report generation.

use super::config::SimConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of a single simulated battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleStats {
    pub enemy_name: String,
    /// `None` when the battle hit the turn limit.
    pub won: Option<bool>,
    pub player_turns: u32,
    pub player_health_left: u32,
    pub gold_earned: u32,
    /// Set when the battle flow rejected an action and the run was abandoned.
    pub error: Option<String>,
}

impl BattleStats {
    pub fn result_label(&self) -> &'static str {
        match (self.won, &self.error) {
            (Some(true), _) => "victory",
            (Some(false), _) => "defeat",
            (None, Some(_)) => "error",
            (None, None) => "timeout",
        }
    }
}

/// Wins and battles against one enemy type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnemyRecord {
    pub battles: u32,
    pub wins: u32,
}

/// Aggregated results from multiple simulated battles.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub class: String,
    pub location: String,
    pub starting_victories: u32,
    pub num_runs: u32,
    pub wins: u32,
    pub losses: u32,
    pub timeouts: u32,
    /// Runs abandoned because an action was rejected.
    pub errors: u32,

    pub avg_turns: f64,
    /// Average player health left after a win.
    pub avg_health_left_on_win: f64,
    pub avg_gold_per_win: f64,

    pub by_enemy: BTreeMap<String, EnemyRecord>,

    #[serde(skip)]
    pub runs: Vec<BattleStats>,
}

impl SimReport {
    pub fn from_runs(config: &SimConfig, runs: Vec<BattleStats>) -> Self {
        let num_runs = runs.len() as u32;
        let wins = runs.iter().filter(|r| r.won == Some(true)).count() as u32;
        let losses = runs.iter().filter(|r| r.won == Some(false)).count() as u32;
        let errors = runs
            .iter()
            .filter(|r| r.won.is_none() && r.error.is_some())
            .count() as u32;
        let timeouts = num_runs - wins - losses - errors;

        let avg_turns =
            runs.iter().map(|r| r.player_turns as f64).sum::<f64>() / num_runs.max(1) as f64;
        let winning = || runs.iter().filter(|r| r.won == Some(true));
        let avg_health_left_on_win =
            winning().map(|r| r.player_health_left as f64).sum::<f64>() / wins.max(1) as f64;
        let avg_gold_per_win =
            winning().map(|r| r.gold_earned as f64).sum::<f64>() / wins.max(1) as f64;

        let mut by_enemy: BTreeMap<String, EnemyRecord> = BTreeMap::new();
        for run in &runs {
            let record = by_enemy.entry(run.enemy_name.clone()).or_default();
            record.battles += 1;
            if run.won == Some(true) {
                record.wins += 1;
            }
        }

        Self {
            class: config.class.name().to_string(),
            location: config.location.name().to_string(),
            starting_victories: config.starting_victories,
            num_runs,
            wins,
            losses,
            timeouts,
            errors,
            avg_turns,
            avg_health_left_on_win,
            avg_gold_per_win,
            by_enemy,
            runs,
        }
    }

    /// Fraction of battles won, 0.0 to 1.0.
    pub fn win_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        self.wins as f64 / self.num_runs as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "{} at {} ({} prior victories)\n",
            self.class, self.location, self.starting_victories
        ));
        report.push_str(&format!(
            "Battles: {} total, {} won, {} lost, {} timed out\n",
            self.num_runs, self.wins, self.losses, self.timeouts
        ));
        if self.errors > 0 {
            report.push_str(&format!("Rejected actions: {} runs abandoned\n", self.errors));
        }
        report.push_str(&format!("Win rate: {:.1}%\n\n", self.win_rate() * 100.0));

        report.push_str("─── AVERAGES ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Player turns:        {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Health left (wins):  {:.1}\n",
            self.avg_health_left_on_win
        ));
        report.push_str(&format!("  Gold per win:        {:.1}\n\n", self.avg_gold_per_win));

        report.push_str("─── BY ENEMY ──────────────────────────────────────────────────\n");
        for (name, record) in &self.by_enemy {
            let rate = record.wins as f64 / record.battles.max(1) as f64 * 100.0;
            report.push_str(&format!(
                "  {:<20} {:>5} battles  {:>5.1}% won\n",
                name, record.battles, rate
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(enemy: &str, won: Option<bool>, turns: u32, health: u32, gold: u32) -> BattleStats {
        BattleStats {
            enemy_name: enemy.to_string(),
            won,
            player_turns: turns,
            player_health_left: health,
            gold_earned: gold,
            error: None,
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![
            run("Goblin", Some(true), 4, 80, 40),
            run("Goblin", Some(false), 6, 0, 0),
            run("Orc", Some(true), 8, 20, 50),
            run("Orc", None, 200, 60, 0),
        ];
        let report = SimReport::from_runs(&SimConfig::default(), runs);

        assert_eq!(report.num_runs, 4);
        assert_eq!(report.wins, 2);
        assert_eq!(report.losses, 1);
        assert_eq!(report.timeouts, 1);
        assert_eq!(report.errors, 0);
        assert!((report.win_rate() - 0.5).abs() < 1e-9);
        assert!((report.avg_health_left_on_win - 50.0).abs() < 1e-9);
        assert!((report.avg_gold_per_win - 45.0).abs() < 1e-9);
        assert_eq!(report.by_enemy["Goblin"], EnemyRecord { battles: 2, wins: 1 });

        let text = report.to_text();
        assert!(text.contains("Knight at Arena"));
        assert!(text.contains("Win rate: 50.0%"));
        assert!(text.contains("Goblin"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["wins"], 2);
        assert!(json.get("runs").is_none());
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(&SimConfig::default(), Vec::new());
        assert_eq!(report.win_rate(), 0.0);
        assert_eq!(report.avg_turns, 0.0);
    }
}
