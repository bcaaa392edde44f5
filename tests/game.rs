use caissa::chess::attacks::in_check;
use caissa::chess::board::Board;
use caissa::chess::core::{PieceKind, Player, Square};
use caissa::chess::game::{GameState, MoveRecord, RuleViolation};
use caissa::chess::session::{Phase, Session};
use pretty_assertions::assert_eq;

fn history(game: &GameState) -> Vec<String> {
    game.history().iter().map(ToString::to_string).collect()
}

fn play(session: &mut Session, from: Square, to: Square) -> MoveRecord {
    assert!(session.select(from).is_ok(), "{from} should be selectable");
    session.move_to(to).expect("move should be legal")
}

#[test]
fn standard_setup() {
    let game = GameState::new();
    assert_eq!(
        format!("{:?}", game.board()),
        "r n b q k b n r\n\
         p p p p p p p p\n\
         . . . . . . . .\n\
         . . . . . . . .\n\
         . . . . . . . .\n\
         . . . . . . . .\n\
         P P P P P P P P\n\
         R N B Q K B N R"
    );
    assert_eq!(game.turn(), Player::White);
    assert!(game.history().is_empty());
}

#[test]
fn opening_scenario() {
    let mut game = GameState::new();
    assert_eq!(
        game.legal_moves(Square::E2).unwrap().destinations(),
        &[Square::E3, Square::E4]
    );

    assert!(game.attempt_move(Square::E2, Square::E4).is_ok());
    assert_eq!(game.turn(), Player::Black);
    assert_eq!(history(&game), vec!["white: e2 to e4"]);

    assert_eq!(
        game.legal_moves(Square::E7).unwrap().destinations(),
        &[Square::E6, Square::E5]
    );
    // White pieces are not selectable on Black's turn.
    assert_eq!(game.legal_moves(Square::E4), None);
}

#[test]
fn rejected_move_changes_nothing_but_message() {
    let mut game = GameState::new();
    let before = game.clone();
    assert!(matches!(
        game.attempt_move(Square::E2, Square::E5),
        Err(RuleViolation::IllegalMove { .. })
    ));
    assert_eq!(game.board(), before.board());
    assert_eq!(game.turn(), before.turn());
    assert_eq!(game.history(), before.history());
    assert_ne!(game.message(), before.message());
}

#[test]
fn turns_alternate() {
    let mut session = Session::new();
    let moves = [
        (Square::E2, Square::E4),
        (Square::E7, Square::E5),
        (Square::G1, Square::F3),
        (Square::B8, Square::C6),
        (Square::F1, Square::C4),
        (Square::G8, Square::F6),
    ];
    for (count, (from, to)) in moves.into_iter().enumerate() {
        let mover = session.state().turn();
        let record = play(&mut session, from, to);
        assert_eq!(record.player, mover);
        // The side that just moved can not move again.
        assert_eq!(session.state().legal_moves(to), None);
        assert_eq!(session.state().turn(), mover.opponent());
        assert_eq!(session.state().history().len(), count + 1);
    }
    assert_eq!(
        history(session.state()),
        vec![
            "white: e2 to e4",
            "black: e7 to e5",
            "white: g1 to f3",
            "black: b8 to c6",
            "white: f1 to c4",
            "black: g8 to f6",
        ]
    );
    assert_eq!(
        session.state().board().to_string(),
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R"
    );
}

#[test]
fn castling_through_session() {
    let mut session = Session::new();
    for (from, to) in [
        (Square::E2, Square::E4),
        (Square::E7, Square::E5),
        (Square::G1, Square::F3),
        (Square::B8, Square::C6),
        (Square::F1, Square::C4),
        (Square::G8, Square::F6),
    ] {
        let _ = play(&mut session, from, to);
    }
    let selection = session.select(Square::E1).unwrap();
    assert!(selection.destinations().contains(&Square::G1));

    let record = session.move_to(Square::G1).unwrap();
    assert!(record.castle);
    assert_eq!(record.to_string(), "white: Castled e1 to g1");
    assert_eq!(session.state().message(), "Black to move. Last move: Castling.");

    let board = session.state().board();
    let king = board.get(Square::G1).unwrap();
    let rook = board.get(Square::F1).unwrap();
    assert_eq!((king.kind, king.has_moved), (PieceKind::King, true));
    assert_eq!((rook.kind, rook.has_moved), (PieceKind::Rook, true));
    assert_eq!(board.get(Square::E1), None);
    assert_eq!(board.get(Square::H1), None);
    assert!(!in_check(board, Player::White));
}

#[test]
fn king_does_not_castle_into_check() {
    // The rook on g8 covers g1 but not f1.
    let board = Board::from_placement("r3k1r1/8/8/8/8/8/8/R3K2R").unwrap();
    let mut session = Session::from_state(GameState::from_board(board, Player::White));
    let selection = session.select(Square::E1).unwrap();
    assert!(!selection.destinations().contains(&Square::G1));
    assert!(matches!(
        session.move_to(Square::G1),
        Err(RuleViolation::IllegalMove { .. })
    ));
    assert_eq!(session.state().board(), &board);

    let record = session.move_to(Square::C1).unwrap();
    assert!(record.castle);
    let board = session.state().board();
    assert_eq!(board.to_string(), "r3k1r1/8/8/8/8/8/8/2KR3R");
    assert!(!in_check(board, Player::White));
}

#[test]
fn rejected_reselection_drops_selection() {
    let mut session = Session::new();
    assert!(session.select(Square::G1).is_ok());
    assert_eq!(
        session.select(Square::G8),
        Err(RuleViolation::InvalidSelection)
    );
    assert_eq!(session.phase(), &Phase::AwaitingSelection);
    assert_eq!(
        session.state().message(),
        "Invalid selection or not your piece. Try again."
    );
    assert_eq!(session.move_to(Square::F3), Err(RuleViolation::NoActiveSelection));
}

#[test]
fn king_can_not_castle_twice() {
    let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
    let mut session = Session::from_state(GameState::from_board(board, Player::White));
    let _ = play(&mut session, Square::E1, Square::F1);
    let _ = play(&mut session, Square::E8, Square::D8);
    let _ = play(&mut session, Square::F1, Square::E1);
    let _ = play(&mut session, Square::D8, Square::E8);
    // The king is back home but has moved.
    let moves = session.state().legal_moves(Square::E1).unwrap();
    assert!(!moves.contains(Square::G1));
    assert!(!moves.contains(Square::C1));
    assert!(matches!(
        session.state().clone().attempt_move(Square::E1, Square::G1),
        Err(RuleViolation::IllegalMove { .. })
    ));
}

#[test]
fn selection_cycle() {
    let mut session = Session::new();
    assert_eq!(
        session.select(Square::E4).unwrap_err(),
        RuleViolation::InvalidSelection
    );
    assert_eq!(session.phase(), &Phase::AwaitingSelection);

    let selection = session.select(Square::B1).unwrap();
    assert_eq!(
        selection.moves().with_null_move(),
        vec![Square::B1, Square::C3, Square::A3]
    );
    assert_eq!(session.cancel().unwrap(), "White to move. Selection cancelled.");
    assert_eq!(session.phase(), &Phase::AwaitingSelection);
    assert_eq!(session.move_to(Square::C3), Err(RuleViolation::NoActiveSelection));

    // Moving onto the origin is not a move.
    assert!(session.select(Square::B1).is_ok());
    assert_eq!(
        session.state().message(),
        "Selected b1. Now choose a destination (one of the highlighted squares)."
    );
    assert!(matches!(
        session.move_to(Square::B1),
        Err(RuleViolation::IllegalMove { .. })
    ));
    assert!(session.state().history().is_empty());
}

#[test]
fn stalemate_is_not_detected() {
    // Black has no legal moves, yet the turn passes to Black.
    let board = Board::from_placement("k7/8/1Q6/8/8/8/8/4K3").unwrap();
    let mut game = GameState::from_board(board, Player::White);
    assert!(game.attempt_move(Square::E1, Square::E2).is_ok());
    assert_eq!(game.turn(), Player::Black);
    assert!(game.legal_moves(Square::A8).unwrap().is_empty());
    assert_eq!(
        game.select_piece(Square::A8),
        Err(RuleViolation::InvalidSelection)
    );
}

#[test]
fn reset_from_any_state() {
    let mut session = Session::new();
    let _ = play(&mut session, Square::D2, Square::D4);
    assert!(session.select(Square::D7).is_ok());
    session.reset();
    assert_eq!(session.state(), &GameState::new());
    assert_eq!(session.phase(), &Phase::AwaitingSelection);
}

#[test]
#[allow(trivial_casts)]
fn persisted_state_round_trip() {
    let mut session = Session::new();
    let _ = play(&mut session, Square::E2, Square::E4);
    let _ = play(&mut session, Square::E7, Square::E5);

    let json = serde_json::to_string(session.state()).unwrap();
    assert!(json.contains(r#""history":["white: e2 to e4","black: e7 to e5"]"#));
    assert!(json.contains(r#""turn":"white""#));

    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, session.state());
    // Moved flags survive the round trip: no double push from e4.
    assert_eq!(
        restored.legal_moves(Square::E4).unwrap().destinations(),
        &[] as &[Square]
    );

    // Continue playing from the restored state.
    let mut session = Session::from_state(restored);
    let record = play(&mut session, Square::G1, Square::F3);
    assert_eq!(record.to_string(), "white: g1 to f3");
}
