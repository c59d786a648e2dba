use super::*;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::with_seed(3);
    let pos = Position::startpos();

    let mv = engine.choose_move(&pos, &SearchLimits::default()).unwrap();

    assert!(pos.legal_moves().contains(&mv));
    assert_eq!(engine.nodes(), 1);
}

#[test]
fn random_engine_is_reproducible_with_seed() {
    let pos = Position::startpos();
    let limits = SearchLimits::default();
    let mut a = RandomEngine::with_seed(42);
    let mut b = RandomEngine::with_seed(42);

    for _ in 0..10 {
        assert_eq!(
            a.choose_move(&pos, &limits).unwrap(),
            b.choose_move(&pos, &limits).unwrap()
        );
    }
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::with_seed(1);
    let pos =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();

    let result = engine.choose_move(&pos, &SearchLimits::default());

    assert!(matches!(result, Err(EngineError::NoMove)));
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::with_seed(1);
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();

    let result = engine.choose_move(&pos, &SearchLimits::default());

    assert!(matches!(result, Err(EngineError::NoMove)));
}

#[test]
fn named_engine_reports_new_name() {
    let engine = RandomEngine::with_seed(0).named("Chaos");
    assert_eq!(engine.name(), "Chaos");
}
