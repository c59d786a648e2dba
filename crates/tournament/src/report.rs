//! Session report storage and rendering

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ArenaSettings;
use crate::error::RecordError;

/// Everything that happened in one `tournament play` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Name/description of the session
    pub name: String,
    /// Roster the engines were drawn from
    pub participants: Vec<String>,
    /// Settings used
    pub settings: ArenaSettings,
    /// One entry per attempted match, in order
    pub games: Vec<GameEntry>,
}

/// A single match in the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    pub white: String,
    pub black: String,
    /// Outcome label; absent when the match was aborted
    pub result: Option<String>,
    /// Why the match was aborted
    pub error: Option<String>,
    pub moves: Vec<String>,
}

impl GameEntry {
    pub fn finished(white: &str, black: &str, result: &str, moves: &[String]) -> Self {
        Self {
            white: white.to_string(),
            black: black.to_string(),
            result: Some(result.to_string()),
            error: None,
            moves: moves.to_vec(),
        }
    }

    pub fn aborted(white: &str, black: &str, error: &str, moves: &[String]) -> Self {
        Self {
            white: white.to_string(),
            black: black.to_string(),
            result: None,
            error: Some(error.to_string()),
            moves: moves.to_vec(),
        }
    }

    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

impl SessionReport {
    pub fn new(name: &str, participants: Vec<String>, settings: ArenaSettings) -> Self {
        Self {
            name: name.to_string(),
            participants,
            settings,
            games: Vec::new(),
        }
    }

    pub fn add_game(&mut self, entry: GameEntry) {
        self.games.push(entry);
    }

    pub fn aborted_games(&self) -> usize {
        self.games.iter().filter(|g| g.result.is_none()).count()
    }

    /// Save report to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from a JSON file
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Session: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Config: {} games, {} ms/move, max {} plies\n\n",
            self.settings.games, self.settings.move_time_ms, self.settings.max_plies
        ));

        report.push_str(&format!(
            "{:<4} {:<20} vs {:<20} {:>6}  {}\n",
            "#", "White", "Black", "Plies", "Result"
        ));
        report.push_str(&"-".repeat(80));
        report.push('\n');

        for (i, entry) in self.games.iter().enumerate() {
            let result = match (&entry.result, &entry.error) {
                (Some(result), _) => result.clone(),
                (None, Some(error)) => format!("aborted: {error}"),
                (None, None) => "aborted".to_string(),
            };
            report.push_str(&format!(
                "{:<4} {:<20} vs {:<20} {:>6}  {}\n",
                i + 1,
                entry.white,
                entry.black,
                entry.plies(),
                result
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
