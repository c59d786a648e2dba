//! Drives `UciEngine` against small POSIX shell scripts that speak just
//! enough UCI. The move an obedient script plays is passed as `$1`.

#![cfg(unix)]

use std::time::{Duration, Instant};

use chess_core::{Engine, EngineError, Position, SearchLimits, Square};
use uci_engine::{AdapterTimeouts, EngineSpec, OptionValue, UciEngine};

const OBEDIENT: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "id name FakeFish 1.0"; echo "option name Hash type spin default 16 min 1 max 64"; echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) echo "info depth 1 score cp 13 pv $1"; echo "bestmove $1" ;;
    quit) exit 0 ;;
  esac
done
"#;

const SILENT_ON_GO: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
  esac
done
"#;

const ANSWERS_ON_STOP: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    stop) echo "bestmove $1" ;;
    quit) exit 0 ;;
  esac
done
"#;

const CRASH_ON_GO: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) exit 3 ;;
  esac
done
"#;

fn script(name: &str, body: &str, reply: &str) -> EngineSpec {
    EngineSpec::new(name, "sh").with_args(["-c", body, "fake", reply])
}

fn quick_timeouts() -> AdapterTimeouts {
    AdapterTimeouts {
        handshake: Duration::from_secs(5),
        shutdown: Duration::from_secs(1),
    }
}

#[test]
fn handshake_and_bestmove() {
    let spec = script("Fake", OBEDIENT, "e2e4").with_option("Hash", OptionValue::Int(32));
    let mut engine = UciEngine::spawn(&spec, quick_timeouts()).unwrap();
    assert_eq!(engine.name(), "Fake");
    assert_eq!(engine.id_name(), Some("FakeFish 1.0"));

    engine.new_game().unwrap();
    let pos = Position::startpos();
    let mv = engine
        .choose_move(&pos, &SearchLimits::move_time(Duration::from_millis(50)))
        .unwrap();

    assert_eq!(mv.from, Square::E2);
    assert_eq!(mv.to, Square::E4);
    engine.terminate().unwrap();
}

#[test]
fn castling_reply_is_converted() {
    let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let mut engine = UciEngine::spawn(&script("Fake", OBEDIENT, "e1g1"), quick_timeouts()).unwrap();

    let mv = engine.choose_move(&pos, &SearchLimits::default()).unwrap();

    assert!(pos.is_legal(mv));
    assert_eq!(mv.to, Square::H1);
}

#[test]
fn no_move_reply() {
    let mut engine = UciEngine::spawn(&script("Fake", OBEDIENT, "(none)"), quick_timeouts()).unwrap();
    let result = engine.choose_move(&Position::startpos(), &SearchLimits::default());
    assert!(matches!(result, Err(EngineError::NoMove)));
}

#[test]
fn garbage_reply_is_protocol_error() {
    let mut engine = UciEngine::spawn(&script("Fake", OBEDIENT, "banana"), quick_timeouts()).unwrap();
    let result = engine.choose_move(&Position::startpos(), &SearchLimits::default());
    assert!(matches!(result, Err(EngineError::Protocol(_))));
}

#[test]
fn silent_engine_is_killed_after_grace() {
    let mut engine = UciEngine::spawn(&script("Mute", SILENT_ON_GO, ""), quick_timeouts()).unwrap();
    let limits = SearchLimits::new(Duration::from_millis(30), Duration::from_millis(30));

    let started = Instant::now();
    let result = engine.choose_move(&Position::startpos(), &limits);

    assert!(matches!(result, Err(EngineError::Timeout(_))), "got {result:?}");
    assert!(started.elapsed() >= limits.soft_limit());
    assert!(started.elapsed() < Duration::from_secs(5));

    // Killed engines refuse further work but still shut down cleanly
    let again = engine.choose_move(&Position::startpos(), &limits);
    assert!(matches!(again, Err(EngineError::Terminated)));
    engine.terminate().unwrap();
}

#[test]
fn engine_answering_after_stop_keeps_its_move() {
    let mut engine = UciEngine::spawn(&script("Slow", ANSWERS_ON_STOP, "e2e4"), quick_timeouts()).unwrap();
    let limits = SearchLimits::new(Duration::from_millis(30), Duration::from_millis(500));

    let started = Instant::now();
    let mv = engine.choose_move(&Position::startpos(), &limits).unwrap();

    assert_eq!(mv.from, Square::E2);
    assert_eq!(mv.to, Square::E4);
    assert!(started.elapsed() >= limits.soft_limit());

    // Still alive, so the next search is answered the same way
    let again = engine.choose_move(&Position::startpos(), &limits).unwrap();
    assert_eq!(again.to, Square::E4);
    engine.terminate().unwrap();
}

#[test]
fn crash_is_reported() {
    let mut engine = UciEngine::spawn(&script("Crashy", CRASH_ON_GO, ""), quick_timeouts()).unwrap();
    let result = engine.choose_move(&Position::startpos(), &SearchLimits::default());
    assert!(matches!(result, Err(EngineError::Crashed)), "got {result:?}");
}

#[test]
fn terminate_is_idempotent() {
    let mut engine = UciEngine::spawn(&script("Fake", OBEDIENT, "e2e4"), quick_timeouts()).unwrap();
    engine.terminate().unwrap();
    engine.terminate().unwrap();

    let result = engine.choose_move(&Position::startpos(), &SearchLimits::default());
    assert!(matches!(result, Err(EngineError::Terminated)));
}

#[test]
fn missing_binary_fails_to_spawn() {
    let spec = EngineSpec::new("Ghost", "/nonexistent/engine/binary");
    let result = UciEngine::spawn(&spec, quick_timeouts());
    assert!(matches!(result, Err(EngineError::Spawn { .. })));
}

#[test]
fn engine_exiting_during_handshake_fails_to_spawn() {
    let spec = EngineSpec::new("Quitter", "sh").with_args(["-c", "exit 0"]);
    let result = UciEngine::spawn(&spec, quick_timeouts());
    assert!(matches!(result, Err(EngineError::Crashed) | Err(EngineError::Io(_))));
}

#[test]
fn spec_reads_from_toml() {
    let spec: EngineSpec = toml::from_str(
        r#"
        name = "Stockfish"
        path = "/usr/local/bin/stockfish"
        options = { Threads = 2, Ponder = false, EvalFile = "nn.nnue" }
        "#,
    )
    .unwrap();

    assert!(spec.args.is_empty());
    assert_eq!(spec.options["Threads"], OptionValue::Int(2));
    assert_eq!(spec.options["Ponder"].to_string(), "false");
    assert_eq!(spec.options["EvalFile"].to_string(), "nn.nnue");
}
