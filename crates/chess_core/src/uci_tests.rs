use super::*;

const CASTLE_READY: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

#[test]
fn test_parse_plain_move() {
    let board = Board::default();
    let mv = parse_uci_move(&board, "e2e4").unwrap();
    assert_eq!(mv.from, Square::E2);
    assert_eq!(mv.to, Square::E4);
    assert_eq!(mv.promotion, None);
}

#[test]
fn test_parse_promotion() {
    let board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1", false).unwrap();
    let mv = parse_uci_move(&board, "e7e8q").unwrap();
    assert_eq!(mv.promotion, Some(Piece::Queen));
    assert_eq!(move_to_uci(&board, mv), "e7e8q");
}

#[test]
fn test_parse_garbage_is_invalid_notation() {
    let board = Board::default();
    for txt in ["", "e2", "z9z9", "hello", "e2e4x"] {
        assert!(
            matches!(parse_uci_move(&board, txt), Err(MoveError::InvalidNotation(_))),
            "{txt:?} should not parse"
        );
    }
}

#[test]
fn test_castling_converts_both_ways() {
    let board = Board::from_fen(CASTLE_READY, false).unwrap();

    let short = parse_uci_move(&board, "e1g1").unwrap();
    assert_eq!(short.to, Square::H1);
    assert!(board.is_legal(short));
    assert_eq!(move_to_uci(&board, short), "e1g1");

    let long = parse_uci_move(&board, "e1c1").unwrap();
    assert_eq!(long.to, Square::A1);
    assert!(board.is_legal(long));
    assert_eq!(move_to_uci(&board, long), "e1c1");
}

#[test]
fn test_king_step_is_not_castling() {
    let board = Board::from_fen(CASTLE_READY, false).unwrap();
    let mv = parse_uci_move(&board, "e1f1").unwrap();
    assert_eq!(mv.to, Square::F1);
    assert_eq!(move_to_uci(&board, mv), "e1f1");
}
