use std::time::Duration;

use thiserror::Error;

/// A move handed in as text could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The text is not a move in UCI notation.
    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),

    /// The move parses but is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Failures reported by an [`Engine`](crate::Engine) implementation.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to spawn engine {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),

    #[error("engine process exited unexpectedly")]
    Crashed,

    #[error("unexpected engine reply: {0}")]
    Protocol(String),

    #[error("engine reported no move")]
    NoMove,

    #[error("scripted engine ran out of moves")]
    Exhausted,

    #[error("engine has already been terminated")]
    Terminated,
}
