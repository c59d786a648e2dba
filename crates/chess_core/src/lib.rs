pub mod error;
pub mod outcome;
pub mod position;
pub mod time_control;
pub mod types;
pub mod uci;

pub use error::*;
pub use outcome::*;
pub use position::*;
pub use time_control::*;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait: implemented by everything that can pick a move (UCI
// processes, in-process test engines)
// =============================================================================

/// Something that chooses moves for one side of a game.
///
/// A match owns exactly one `Engine` per side and asks it for a move each
/// time that side is to play. Implementations that hold external resources
/// (processes, threads) release them in [`Engine::terminate`].
pub trait Engine: Send {
    /// Choose a move for the side to move in `pos`.
    ///
    /// # Arguments
    /// * `pos` - The current position, including the moves that led to it
    /// * `limits` - Time budget for this move
    ///
    /// The returned move is expected to be legal; callers may check.
    fn choose_move(&mut self, pos: &Position, limits: &SearchLimits) -> Result<Move, EngineError>;

    /// Returns the engine's name for logs and result records
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Release everything the engine holds. Must be safe to call more than
    /// once; calls after the first do nothing.
    fn terminate(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}
