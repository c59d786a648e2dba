use super::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn play_all(pos: &mut Position, moves: &[&str]) {
    for mv in moves {
        pos.play_uci(mv).unwrap_or_else(|e| panic!("{mv} rejected: {e}"));
    }
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    // Starting position has 20 legal moves
    assert_eq!(pos.legal_moves().len(), 20);
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.ply_count(), 0);
    assert_eq!(pos.fen(), STARTPOS_FEN);
    assert_eq!(pos.start_fen(), None);
}

#[test]
fn test_opening_sequence_advances_plies() {
    let mut pos = Position::startpos();
    play_all(&mut pos, &["e2e4", "e7e5", "g1f3"]);

    assert_eq!(pos.ply_count(), 3);
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.uci_moves(), ["e2e4", "e7e5", "g1f3"]);
}

#[test]
fn test_illegal_move_leaves_position_untouched() {
    let mut pos = Position::startpos();
    let before = pos.fen();

    let err = pos.play_uci("e2e5").unwrap_err();

    assert_eq!(err, MoveError::IllegalMove("e2e5".to_string()));
    assert_eq!(pos.fen(), before);
    assert_eq!(pos.ply_count(), 0);
}

#[test]
fn test_from_fen_rejects_garbage() {
    assert!(Position::from_fen("not a fen").is_err());
    assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - x 1").is_err());
}

#[test]
fn test_from_fen_keeps_large_halfmove_clock() {
    let pos = Position::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 140 90").unwrap();
    assert_eq!(pos.halfmove_clock(), 140);
    assert!(pos.fen().ends_with("140 90"), "fen was {}", pos.fen());
}

#[test]
fn test_checkmate_detection() {
    let mut pos = Position::startpos();
    play_all(&mut pos, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(pos.in_check());
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
}

#[test]
fn test_stalemate_detection() {
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
}

#[test]
fn test_insufficient_material() {
    let cases = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", true),
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", true),
        ("8/8/8/4k3/8/4KN2/8/8 w - - 0 1", true),
        // Same coloured bishops on both sides
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", true),
        // Opposite coloured bishops can still mate
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", false),
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", false),
        ("8/8/8/4k3/8/4K3/8/R7 w - - 0 1", false),
        // Knight against a bishop can mate
        ("8/8/4b3/4k3/8/4KN2/8/8 w - - 0 1", false),
    ];
    for (fen, expected) in cases {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.is_insufficient_material(), expected, "{fen}");
    }
}

#[test]
fn test_seventyfive_move_rule() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 149 100").unwrap();
    assert!(!pos.is_seventyfive_moves());

    pos.play_uci("a1a2").unwrap();
    assert_eq!(pos.halfmove_clock(), 150);
    assert!(pos.is_seventyfive_moves());
}

#[test]
fn test_pawn_move_resets_clock() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60").unwrap();
    pos.play_uci("e2e3").unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
}

#[test]
fn test_fivefold_repetition() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    for _ in 0..3 {
        play_all(&mut pos, &shuffle);
    }
    assert_eq!(pos.repetition_count(), 4);
    assert!(!pos.is_fivefold_repetition());

    play_all(&mut pos, &shuffle);
    assert_eq!(pos.repetition_count(), 5);
    assert!(pos.is_fivefold_repetition());
}

#[test]
fn test_random_playouts_stay_consistent() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let mut pos = Position::startpos();
        for _ in 0..120 {
            let moves = pos.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            pos.play(mv).unwrap();
            // The resulting position must round-trip through FEN
            let reparsed = Position::from_fen(&pos.fen()).unwrap();
            assert_eq!(reparsed.side_to_move(), pos.side_to_move());
            assert_eq!(reparsed.legal_moves().len(), pos.legal_moves().len());
        }
    }
}
