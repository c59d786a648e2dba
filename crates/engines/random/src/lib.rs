//! Random Move Chess Engine
//!
//! A simple engine that selects moves uniformly at random from all legal moves.
//! Useful for:
//! - Exercising the match loop without spawning engine processes
//! - Baseline comparisons (any real engine should easily beat this)
//! - Reaching draw-by-rule endings that real engines avoid

use chess_core::{Engine, EngineError, Move, Position, SearchLimits};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// A chess engine that plays random legal moves.
///
/// Seed it for reproducible games.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    name: String,
    rng: StdRng,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            name: "Random v1.0".to_string(),
            rng,
            nodes: 0,
        }
    }

    /// Rename the engine, e.g. to tell two instances apart in results.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Positions looked at since the last new game
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, pos: &Position, _limits: &SearchLimits) -> Result<Move, EngineError> {
        let moves = pos.legal_moves();
        self.nodes += 1;
        moves.choose(&mut self.rng).copied().ok_or(EngineError::NoMove)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.nodes = 0;
        Ok(())
    }
}
