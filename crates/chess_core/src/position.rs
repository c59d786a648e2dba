//! Game position: the rules library's board plus the bookkeeping its draw
//! rules need (an uncapped halfmove clock and the repetition history).

use crate::error::{MoveError, PositionError};
use crate::types::*;
use crate::uci::{move_to_uci, parse_uci_move};

/// Halfmove clock value at which the 75-move rule ends the game.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position that end the game by repetition.
pub const FIVEFOLD: usize = 5;

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// FEN the game started from, `None` for the standard start
    start_fen: Option<String>,
    /// Plies played, in UCI notation
    moves: Vec<String>,
    /// Plies since the last capture or pawn move
    halfmove_clock: u32,
    /// Hashes since the last irreversible move, current position last
    history: Vec<u64>,
}

impl Position {
    pub fn startpos() -> Self {
        let board = Board::default();
        let history = vec![board.hash()];
        Self {
            board,
            start_fen: None,
            moves: Vec::new(),
            halfmove_clock: 0,
            history,
        }
    }

    /// Build a position from FEN. Unlike the rules library this accepts
    /// halfmove clocks beyond 100.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let invalid = |reason: String| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(invalid(format!("expected 4 to 6 fields, got {}", fields.len())));
        }
        let halfmove_clock = match fields.get(4) {
            Some(h) => h
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad halfmove clock {h:?}")))?,
            None => 0,
        };
        let fullmove = fields.get(5).copied().unwrap_or("1");
        // The library keeps its own clock capped at 100; ours is authoritative.
        let normalized = format!("{} 0 {fullmove}", fields[..4].join(" "));
        let board = Board::from_fen(&normalized, false).map_err(|e| invalid(format!("{e:?}")))?;

        let history = vec![board.hash()];
        Ok(Self {
            board,
            start_fen: Some(fen.to_string()),
            moves: Vec::new(),
            halfmove_clock,
            history,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }

    /// Plies played so far, in UCI notation.
    pub fn uci_moves(&self) -> &[String] {
        &self.moves
    }

    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// FEN of the current position, carrying the uncapped halfmove clock.
    pub fn fen(&self) -> String {
        let mut fields: Vec<String> = self
            .board
            .to_string()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        if fields.len() == 6 {
            fields[4] = self.halfmove_clock.to_string();
        }
        fields.join(" ")
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|piece_moves| !piece_moves.is_empty())
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.is_legal(mv)
    }

    /// Parse `txt` as UCI and play it if legal.
    pub fn play_uci(&mut self, txt: &str) -> Result<Move, MoveError> {
        let mv = parse_uci_move(&self.board, txt)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Play a move after checking it against the legal move set.
    pub fn play(&mut self, mv: Move) -> Result<(), MoveError> {
        if !self.board.is_legal(mv) {
            return Err(MoveError::IllegalMove(move_to_uci(&self.board, mv)));
        }
        self.play_unchecked(mv);
        Ok(())
    }

    /// Play a move without checking legality. The move must come from a
    /// trusted source; an illegal one leaves the position inconsistent.
    pub fn play_unchecked(&mut self, mv: Move) {
        let mover = self.board.side_to_move();
        let is_pawn_move = self.board.piece_on(mv.from) == Some(Piece::Pawn);
        let is_capture = self.board.color_on(mv.to) == Some(!mover);

        self.moves.push(move_to_uci(&self.board, mv));
        self.board.play_unchecked(mv);

        if is_pawn_move || is_capture {
            self.halfmove_clock = 0;
            self.history.clear();
        } else {
            self.halfmove_clock += 1;
        }
        self.history.push(self.board.hash());
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_moves()
    }

    /// Neither side can ever deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(Color::White) && self.has_insufficient_material(Color::Black)
    }

    /// `color` cannot deliver mate even with the opponent's help.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let b = &self.board;
        let ours = b.colors(color);
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !(ours & heavy).is_empty() {
            return false;
        }

        if !(ours & b.pieces(Piece::Knight)).is_empty() {
            // A lone knight can only mate if the opponent has pieces to block
            // its own king with.
            let theirs = b.colors(!color);
            let blockers = theirs & !b.pieces(Piece::King) & !b.pieces(Piece::Queen);
            return ours.len() <= 2 && blockers.is_empty();
        }

        let bishops = b.pieces(Piece::Bishop);
        if !(ours & bishops).is_empty() {
            let same_colored = (bishops & DARK_SQUARES).is_empty() || (bishops & LIGHT_SQUARES).is_empty();
            return same_colored && b.pieces(Piece::Pawn).is_empty() && b.pieces(Piece::Knight).is_empty();
        }

        true
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES && self.has_legal_moves()
    }

    /// Occurrences of the current position since the last irreversible move.
    pub fn repetition_count(&self) -> usize {
        let current = self.board.hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= FIVEFOLD
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
