//! Binding engine identities to the two sides of a match.

use chess_core::{Engine, EngineError};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// One side of a match: the identity recorded in results and the engine
/// that plays for it.
pub struct Player {
    name: String,
    engine: Box<dyn Engine>,
}

impl Player {
    pub fn new(name: impl Into<String>, engine: Box<dyn Engine>) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    /// Player named after its engine.
    pub fn from_engine(engine: impl Engine + 'static) -> Self {
        let name = engine.name().to_string();
        Self::new(name, Box::new(engine))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn engine_mut(&mut self) -> &mut dyn Engine {
        self.engine.as_mut()
    }

    /// Terminate the engine, logging rather than returning failures.
    pub(crate) fn release(&mut self) {
        if let Err(e) = self.engine.terminate() {
            warn!(engine = %self.name, error = %e, "engine did not shut down cleanly");
        }
    }

    pub(crate) fn failure(&self, source: EngineError) -> crate::MatchError {
        crate::MatchError::EngineFailure {
            engine: self.name.clone(),
            source,
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Draw white and black from the roster. The draws are independent, so the
/// same entry can end up on both sides.
pub fn draw_pairing<'a, T, R>(roster: &'a [T], rng: &mut R) -> Option<(&'a T, &'a T)>
where
    R: Rng + ?Sized,
{
    let white = roster.choose(rng)?;
    let black = roster.choose(rng)?;
    Some((white, black))
}
