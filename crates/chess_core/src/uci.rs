//! UCI long algebraic notation.
//!
//! The rules library encodes castling as "king takes own rook" (`e1h1`),
//! while UCI engines and humans write the king's destination (`e1g1`).
//! Conversion in both directions happens here and nowhere else.

use crate::error::MoveError;
use crate::types::*;

pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let mover = board.color_on(mv.from);
    if board.piece_on(mv.from) == Some(Piece::King) && mover.is_some() && board.color_on(mv.to) == mover {
        let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
            File::G
        } else {
            File::C
        };
        let castle = Move {
            from: mv.from,
            to: Square::new(file, mv.from.rank()),
            promotion: None,
        };
        return castle.to_string();
    }
    mv.to_string()
}

/// Parse a move in UCI notation for the given board.
///
/// Only the notation is checked here; legality is the caller's business.
pub fn parse_uci_move(board: &Board, txt: &str) -> Result<Move, MoveError> {
    let txt = txt.trim();
    let mut mv: Move = txt
        .parse()
        .map_err(|_| MoveError::InvalidNotation(txt.to_string()))?;

    if board.piece_on(mv.from) == Some(Piece::King)
        && mv.from.file() == File::E
        && mv.from.rank() == mv.to.rank()
    {
        match mv.to.file() {
            File::G => mv.to = Square::new(File::H, mv.from.rank()),
            File::C => mv.to = Square::new(File::A, mv.from.rank()),
            _ => {}
        }
    }
    Ok(mv)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
