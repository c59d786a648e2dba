//! Scripted Chess Engine
//!
//! Replays a predetermined list of UCI moves, one per request. Lets match
//! logic be driven deterministically without an engine process.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chess_core::{parse_uci_move, Engine, EngineError, Move, Position, SearchLimits};
use tracing::debug;


/// Counters shared with whoever built the engine, so tests can observe an
/// engine after handing ownership of it to a match.
#[derive(Debug, Default)]
pub struct ScriptProbe {
    requests: AtomicUsize,
    new_games: AtomicUsize,
    terminations: AtomicUsize,
}

impl ScriptProbe {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn new_games(&self) -> usize {
        self.new_games.load(Ordering::SeqCst)
    }

    /// Number of terminate calls that actually released the engine
    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }
}

/// Engine answering with the next move of its script.
///
/// Moves are parsed against the position they are played in, so castling can
/// be scripted as `e1g1`. The script is not checked for legality; that is
/// what makes this engine useful for testing move validation.
#[derive(Debug)]
pub struct ScriptedEngine {
    name: String,
    script: VecDeque<String>,
    probe: Arc<ScriptProbe>,
    terminated: bool,
}

impl ScriptedEngine {
    pub fn new<I, S>(name: impl Into<String>, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            script: moves.into_iter().map(Into::into).collect(),
            probe: Arc::new(ScriptProbe::default()),
            terminated: false,
        }
    }

    pub fn probe(&self) -> Arc<ScriptProbe> {
        Arc::clone(&self.probe)
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Engine for ScriptedEngine {
    fn choose_move(&mut self, pos: &Position, _limits: &SearchLimits) -> Result<Move, EngineError> {
        if self.terminated {
            return Err(EngineError::Terminated);
        }
        self.probe.requests.fetch_add(1, Ordering::SeqCst);

        let txt = self.script.pop_front().ok_or(EngineError::Exhausted)?;
        debug!(engine = %self.name, mv = %txt, "scripted move");
        parse_uci_move(pos.board(), &txt).map_err(|e| EngineError::Protocol(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.probe.new_games.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), EngineError> {
        if !self.terminated {
            self.terminated = true;
            self.probe.terminations.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
