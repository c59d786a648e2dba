use super::*;
use std::time::Duration;

#[test]
fn test_parse_handshake_lines() {
    assert_eq!(parse_line("uciok"), EngineLine::UciOk);
    assert_eq!(parse_line("readyok\r"), EngineLine::ReadyOk);
    assert_eq!(
        parse_line("id name Stockfish 16.1"),
        EngineLine::IdName("Stockfish 16.1")
    );
    assert!(matches!(parse_line("id author the Stockfish developers"), EngineLine::Other(_)));
}

#[test]
fn test_parse_bestmove() {
    assert_eq!(parse_line("bestmove e2e4"), EngineLine::BestMove(Some("e2e4")));
    assert_eq!(
        parse_line("bestmove e7e8q ponder a2a3"),
        EngineLine::BestMove(Some("e7e8q"))
    );
    assert_eq!(parse_line("bestmove (none)"), EngineLine::BestMove(None));
    assert_eq!(parse_line("bestmove 0000"), EngineLine::BestMove(None));
}

#[test]
fn test_parse_info() {
    let line = "info depth 20 seldepth 25 multipv 1 score cp 35 nodes 100000 pv e2e4";
    assert_eq!(parse_line(line), EngineLine::Info(line));
}

#[test]
fn test_position_command_from_startpos() {
    let mut pos = Position::startpos();
    assert_eq!(position_command(&pos), "position startpos");

    pos.play_uci("e2e4").unwrap();
    pos.play_uci("e7e5").unwrap();
    assert_eq!(position_command(&pos), "position startpos moves e2e4 e7e5");
}

#[test]
fn test_position_command_from_fen() {
    let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    pos.play_uci("e1g1").unwrap();
    assert_eq!(position_command(&pos), format!("position fen {fen} moves e1g1"));
}

#[test]
fn test_go_and_setoption() {
    let limits = SearchLimits::move_time(Duration::from_millis(250));
    assert_eq!(go_command(&limits), "go movetime 250");
    assert_eq!(setoption_command("Hash", "64"), "setoption name Hash value 64");
}
