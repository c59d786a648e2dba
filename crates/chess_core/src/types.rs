//! Board primitives, re-exported from the rules library so downstream crates
//! never need to depend on it directly.

pub use cozy_chess::{BitBoard, Board, Color, File, Move, Piece, Rank, Square};

/// Standard starting position.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Dark squares (a1 is dark).
pub const DARK_SQUARES: BitBoard = BitBoard(0xAA55_AA55_AA55_AA55);

/// Light squares.
pub const LIGHT_SQUARES: BitBoard = BitBoard(!0xAA55_AA55_AA55_AA55);
