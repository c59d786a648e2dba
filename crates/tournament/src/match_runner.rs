//! Match runner for playing one game between two engines

use std::time::Duration;

use chess_core::{
    classify, move_to_uci, Color, Engine, EngineError, Move, MoveError, Outcome, Position,
    SearchLimits,
};
use rand::Rng;
use tracing::{debug, info, warn};
use uci_engine::EngineSpec;

use crate::error::{MatchError, RecordError};
use crate::players::{draw_pairing, Player};
use crate::results::{RecordedGame, ResultRecorder};

/// Configuration for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Time each engine is asked to spend per move
    pub move_time: Duration,
    /// Extra time before `stop`, and again before the engine is killed
    pub grace: Duration,
    /// Check engine moves against the rules before applying them
    pub validate_engine_moves: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            move_time: Duration::from_secs(1),
            grace: Duration::from_secs(1),
            validate_engine_moves: true,
        }
    }
}

impl MatchConfig {
    fn search_limits(&self) -> SearchLimits {
        SearchLimits::new(self.move_time, self.grace)
    }
}

/// Drives a single game between two engines and owns both of them.
///
/// The position is only ever changed through legal moves, so it is always
/// the start position or reachable from it. Dropping the runner shuts both
/// engines down.
pub struct MatchRunner {
    position: Position,
    white: Player,
    black: Player,
    config: MatchConfig,
    shut_down: bool,
}

impl MatchRunner {
    pub fn new(white: Player, black: Player, config: MatchConfig) -> Self {
        Self {
            position: Position::startpos(),
            white,
            black,
            config,
            shut_down: false,
        }
    }

    /// Draw white and black from `roster` using `rng` and launch an engine
    /// for each.
    ///
    /// The two draws are independent; when the same entry is drawn twice,
    /// `launch` runs twice and each side gets its own engine.
    pub fn from_roster<R, F>(
        roster: &[EngineSpec],
        rng: &mut R,
        config: MatchConfig,
        mut launch: F,
    ) -> Result<Self, MatchError>
    where
        R: Rng + ?Sized,
        F: FnMut(&EngineSpec) -> Result<Box<dyn Engine>, EngineError>,
    {
        let (white_spec, black_spec) = draw_pairing(roster, rng).ok_or(MatchError::EmptyRoster)?;
        debug!(white = %white_spec.name, black = %black_spec.name, "engines assigned");

        let pairing = (white_spec.name.as_str(), black_spec.name.as_str());
        let mut white = launch_player(white_spec, pairing, &mut launch)?;
        let black = match launch_player(black_spec, pairing, &mut launch) {
            Ok(black) => black,
            Err(e) => {
                white.release();
                return Err(e);
            }
        };
        Ok(Self::new(white, black, config))
    }

    /// Start playing from `position` instead of the standard start.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Reset to the standard start and tell both engines a new game begins.
    pub fn initialize_game(&mut self) -> Result<(), MatchError> {
        self.position = Position::startpos();
        for player in [&mut self.white, &mut self.black] {
            if let Err(e) = player.engine_mut().new_game() {
                warn!(engine = %player.name(), error = %e, "engine failed to start a new game");
                return Err(player.failure(e));
            }
        }
        info!(white = %self.white.name(), black = %self.black.name(), "new game");
        Ok(())
    }

    /// Apply a move given in UCI notation, e.g. `e2e4` or `e7e8q`.
    ///
    /// On error the position is unchanged and the runner stays usable.
    pub fn make_move(&mut self, txt: &str) -> Result<(), MoveError> {
        match self.position.play_uci(txt) {
            Ok(_) => {
                debug!(mv = txt, ply = self.position.ply_count(), "move executed");
                Ok(())
            }
            Err(e) => {
                debug!(mv = txt, error = %e, "move rejected");
                Err(e)
            }
        }
    }

    /// Ask the engine on move for one move and apply it.
    pub fn play_engine_move(&mut self) -> Result<Move, MatchError> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            debug!(%outcome, "no move requested, game is over");
            return Err(MatchError::GameAlreadyOver(outcome));
        }

        let limits = self.config.search_limits();
        let player = match self.position.side_to_move() {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };

        let mv = match player.engine_mut().choose_move(&self.position, &limits) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(engine = %player.name(), error = %e, "engine failed to move");
                return Err(player.failure(e));
            }
        };

        if self.config.validate_engine_moves && !self.position.is_legal(mv) {
            let mv = move_to_uci(self.position.board(), mv);
            warn!(engine = %player.name(), %mv, "engine played an illegal move");
            return Err(MatchError::IllegalEngineMove {
                engine: player.name().to_string(),
                mv,
            });
        }

        let txt = move_to_uci(self.position.board(), mv);
        self.position.play_unchecked(mv);
        debug!(
            engine = %player.name(),
            mv = %txt,
            ply = self.position.ply_count(),
            "engine moved"
        );
        Ok(mv)
    }

    /// Let the engines play until the game ends or `max_plies` more plies
    /// have been played.
    ///
    /// A game that ends on the last allowed ply reports its real outcome.
    /// With `max_plies == 0` nothing is played or classified and the result
    /// is always [`Outcome::TurnLimitReached`].
    pub fn play_full_game(&mut self, max_plies: u32) -> Result<Outcome, MatchError> {
        if max_plies == 0 {
            debug!("no plies allowed");
            return Ok(Outcome::TurnLimitReached);
        }
        for _ in 0..max_plies {
            if self.outcome().is_terminal() {
                break;
            }
            self.play_engine_move()?;
        }

        let outcome = match self.outcome() {
            Outcome::Ongoing => Outcome::TurnLimitReached,
            outcome => outcome,
        };
        info!(
            white = %self.white.name(),
            black = %self.black.name(),
            plies = self.position.ply_count(),
            %outcome,
            "game finished"
        );
        Ok(outcome)
    }

    /// Classify the current position.
    pub fn outcome(&self) -> Outcome {
        classify(&self.position)
    }

    /// Write the opening, `outcome` and both engine names to `recorder`.
    pub fn record(
        &self,
        recorder: &mut dyn ResultRecorder,
        outcome: &Outcome,
    ) -> Result<(), RecordError> {
        let game = RecordedGame::new(
            self.position.uci_moves(),
            outcome.label(),
            self.white.name(),
            self.black.name(),
        );
        recorder.record(&game)
    }

    /// Terminate both engines. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.white.release();
        self.black.release();
        debug!("chess engines have been shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn uci_moves(&self) -> &[String] {
        self.position.uci_moves()
    }

    pub fn white_name(&self) -> &str {
        self.white.name()
    }

    pub fn black_name(&self) -> &str {
        self.black.name()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

impl Drop for MatchRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn launch_player<F>(
    spec: &EngineSpec,
    (white, black): (&str, &str),
    launch: &mut F,
) -> Result<Player, MatchError>
where
    F: FnMut(&EngineSpec) -> Result<Box<dyn Engine>, EngineError>,
{
    match launch(spec) {
        Ok(engine) => Ok(Player::new(spec.name.clone(), engine)),
        Err(source) => {
            warn!(engine = %spec.name, error = %source, "engine failed to launch");
            Err(MatchError::Launch {
                engine: spec.name.clone(),
                white: white.to_string(),
                black: black.to_string(),
                source,
            })
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
