//! Per-engine tallies over a result log

use std::collections::HashMap;
use std::path::Path;

use chess_core::{Color, Outcome};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::results::{read_results, RecordedGame};

/// Results of one engine identity across all logged games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Games stopped by the ply limit, or with an unknown result label
    pub unfinished: u32,
}

impl Standing {
    pub fn total_games(&self) -> u32 {
        self.decided_games() + self.unfinished
    }

    pub fn decided_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 per win and 0.5 per draw over decided games; 0.5 with none decided
    pub fn score(&self) -> f64 {
        let decided = self.decided_games() as f64;
        if decided == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / decided
    }
}

/// Tallies keyed by engine identity.
///
/// An engine that played itself is credited from both sides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standings {
    pub engines: HashMap<String, Standing>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and tally a CSV result log.
    pub fn from_csv(path: &Path) -> Result<Self, RecordError> {
        let games = read_results(path)?;
        Ok(Self::from_games(&games))
    }

    pub fn from_games<'a>(games: impl IntoIterator<Item = &'a RecordedGame>) -> Self {
        let mut standings = Self::new();
        for game in games {
            standings.add(game);
        }
        standings
    }

    pub fn add(&mut self, game: &RecordedGame) {
        let outcome = game.outcome();
        for (name, color) in [(&game.bot1, Color::White), (&game.bot2, Color::Black)] {
            let entry = self.engines.entry(name.clone()).or_default();
            match outcome {
                Some(Outcome::Win(winner)) if winner == color => entry.wins += 1,
                Some(Outcome::Win(_)) => entry.losses += 1,
                Some(Outcome::Draw(_)) => entry.draws += 1,
                Some(Outcome::Ongoing | Outcome::TurnLimitReached) | None => entry.unfinished += 1,
            }
        }
    }

    pub fn get(&self, engine: &str) -> Option<&Standing> {
        self.engines.get(engine)
    }

    /// Engines sorted by score, best first; ties broken by name
    pub fn leaderboard(&self) -> Vec<(&str, &Standing)> {
        let mut entries: Vec<_> = self
            .engines
            .iter()
            .map(|(name, standing)| (name.as_str(), standing))
            .collect();
        entries.sort_by(|a, b| {
            b.1.score()
                .partial_cmp(&a.1.score())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// Print leaderboard to stdout
    pub fn print_leaderboard(&self) {
        println!("\n=== Engine Standings ===");
        println!(
            "{:<30} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7}",
            "Engine", "Games", "W", "L", "D", "Unf", "Score"
        );
        println!("{}", "-".repeat(72));
        for (name, s) in self.leaderboard() {
            println!(
                "{:<30} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6.1}%",
                name,
                s.total_games(),
                s.wins,
                s.losses,
                s.draws,
                s.unfinished,
                s.score() * 100.0
            );
        }
        println!();
    }
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;
