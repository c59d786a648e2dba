use chess_core::{EngineError, Outcome};
use thiserror::Error;

/// Errors from driving a match.
#[derive(Error, Debug)]
pub enum MatchError {
    /// An engine move was requested for a finished game
    #[error("game is already over: {0}")]
    GameAlreadyOver(Outcome),

    #[error("engine {engine} failed: {source}")]
    EngineFailure {
        engine: String,
        #[source]
        source: EngineError,
    },

    #[error("engine {engine} played illegal move {mv}")]
    IllegalEngineMove { engine: String, mv: String },

    #[error("engine roster is empty")]
    EmptyRoster,

    /// Launching one side failed; `white` and `black` name the drawn pairing
    #[error("failed to launch engine {engine} ({white} vs {black}): {source}")]
    Launch {
        engine: String,
        white: String,
        black: String,
        #[source]
        source: EngineError,
    },
}

impl MatchError {
    /// Names of the white and black engines, when the error happened after
    /// the pairing was drawn but before a match existed.
    pub fn launch_pairing(&self) -> Option<(&str, &str)> {
        match self {
            MatchError::Launch { white, black, .. } => Some((white.as_str(), black.as_str())),
            _ => None,
        }
    }

    /// Whether an engine misbehaved, which aborts the match.
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            MatchError::EngineFailure { .. } | MatchError::IllegalEngineMove { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
