//! Game outcome classification.

use std::fmt;
use std::str::FromStr;

use crate::position::Position;
use crate::types::Color;

/// Why a game was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

/// State of a game as seen by the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The given side delivered mate
    Win(Color),
    Draw(DrawReason),
    Ongoing,
    /// The ply limit ran out before the game ended
    TurnLimitReached,
}

impl Outcome {
    /// Whether the rules ended the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Win(_) | Outcome::Draw(_))
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Win(color) => Some(*color),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win(Color::White) => "White wins!",
            Outcome::Win(Color::Black) => "Black wins!",
            Outcome::Draw(DrawReason::Stalemate) => "Draw (stalemate)",
            Outcome::Draw(DrawReason::InsufficientMaterial) => "Draw (insufficient material)",
            Outcome::Draw(DrawReason::SeventyFiveMoves) => "Draw (75-move rule)",
            Outcome::Draw(DrawReason::FivefoldRepetition) => "Draw (fivefold repetition)",
            Outcome::Ongoing => "Game still ongoing",
            Outcome::TurnLimitReached => "Game ended after reaching the maximum number of turns.",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const ALL: [Outcome; 8] = [
    Outcome::Win(Color::White),
    Outcome::Win(Color::Black),
    Outcome::Draw(DrawReason::Stalemate),
    Outcome::Draw(DrawReason::InsufficientMaterial),
    Outcome::Draw(DrawReason::SeventyFiveMoves),
    Outcome::Draw(DrawReason::FivefoldRepetition),
    Outcome::Ongoing,
    Outcome::TurnLimitReached,
];

/// Parses the labels produced by `Display`.
impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL.into_iter()
            .find(|outcome| outcome.label() == s)
            .ok_or_else(|| format!("unknown outcome label {s:?}"))
    }
}

/// Classify a position. The rules predicates can overlap, so they are
/// checked in a fixed order: checkmate, stalemate, insufficient material,
/// 75-move rule, fivefold repetition.
pub fn classify(pos: &Position) -> Outcome {
    if pos.is_checkmate() {
        // The side to move is the one that got mated
        Outcome::Win(!pos.side_to_move())
    } else if pos.is_stalemate() {
        Outcome::Draw(DrawReason::Stalemate)
    } else if pos.is_insufficient_material() {
        Outcome::Draw(DrawReason::InsufficientMaterial)
    } else if pos.is_seventyfive_moves() {
        Outcome::Draw(DrawReason::SeventyFiveMoves)
    } else if pos.is_fivefold_repetition() {
        Outcome::Draw(DrawReason::FivefoldRepetition)
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
