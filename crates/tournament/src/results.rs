//! Game result log
//!
//! One CSV row per finished game: the first three plies, the outcome label
//! and the two engine identities.
//!
//! ```text
//! move1,move2,move3,Result,bot1,bot2
//! e2e4,e7e5,g1f3,White wins!,Stockfish,LCZero
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chess_core::Outcome;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RecordError;

/// Number of opening plies kept per game
pub const OPENING_PLIES: usize = 3;

/// One row of the result log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedGame {
    pub move1: String,
    pub move2: String,
    pub move3: String,
    #[serde(rename = "Result")]
    pub result: String,
    /// Engine playing white
    pub bot1: String,
    /// Engine playing black
    pub bot2: String,
}

impl RecordedGame {
    /// Build a row, keeping the first [`OPENING_PLIES`] moves of `opening`
    /// and padding with empty strings when the game was shorter.
    pub fn new<S: AsRef<str>>(opening: &[S], result: &str, bot1: &str, bot2: &str) -> Self {
        let mut moves = opening.iter().take(OPENING_PLIES).map(|m| m.as_ref().to_string());
        let mut next = || moves.next().unwrap_or_default();
        Self {
            move1: next(),
            move2: next(),
            move3: next(),
            result: result.to_string(),
            bot1: bot1.to_string(),
            bot2: bot2.to_string(),
        }
    }

    /// Outcome behind the stored label, if it is one we write.
    pub fn outcome(&self) -> Option<Outcome> {
        self.result.parse().ok()
    }

    /// The recorded opening plies, without padding
    pub fn opening(&self) -> Vec<&str> {
        [&self.move1, &self.move2, &self.move3]
            .into_iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .collect()
    }
}

/// Destination for finished games.
pub trait ResultRecorder {
    fn record(&mut self, game: &RecordedGame) -> Result<(), RecordError>;
}

/// Keeps games in memory.
impl ResultRecorder for Vec<RecordedGame> {
    fn record(&mut self, game: &RecordedGame) -> Result<(), RecordError> {
        self.push(game.clone());
        Ok(())
    }
}

/// Appends games to a CSV file, writing the header only into a missing or
/// empty file.
#[derive(Debug, Clone)]
pub struct CsvRecorder {
    path: PathBuf,
}

impl CsvRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultRecorder for CsvRecorder {
    fn record(&mut self, game: &RecordedGame) -> Result<(), RecordError> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(game)?;
        writer.flush()?;

        debug!(path = %self.path.display(), result = %game.result, "game result saved");
        Ok(())
    }
}

/// Read every game from a result log.
pub fn read_results(path: &Path) -> Result<Vec<RecordedGame>, RecordError> {
    let mut reader = csv::Reader::from_path(path)?;
    let games = reader.deserialize().collect::<Result<Vec<RecordedGame>, _>>()?;
    Ok(games)
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
