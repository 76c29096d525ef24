use pieothello::board::{Cell, MoveOutcome};
use pieothello::save::{Record, SavedGame, Settings};
use pieothello::session::{next_mover, Outcome, Phase, Session};
use pieothello::Board;
use std::time::Duration;

fn pass_position() -> Vec<u8> {
    // Black (0,0), White (1,0): White cannot move, Black's (2,0) ends the game.
    let mut cells = vec![0u8; 64];
    cells[0] = Cell::Black.as_byte();
    cells[8] = Cell::White.as_byte();
    cells
}

#[test]
fn two_player_game_opens_with_white() {
    let mut s = Session::new(Settings::new(2, 1));
    assert_eq!(s.phase(), Phase::Idle);
    s.start_new_game();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.current_player(), Cell::White);
    assert!(!s.is_bot_turn());

    assert_eq!(s.put_piece(0, 0), MoveOutcome::Invalid);
    assert_eq!(s.current_player(), Cell::White);
    assert_eq!(s.put_piece(3, 2), MoveOutcome::Applied(1));
    assert_eq!(s.current_player(), Cell::Black);
    assert_eq!(s.moves().len(), 1);
    assert_eq!(s.board().score(Cell::White), 4);
}

#[test]
fn pass_keeps_turn_and_game_ends_when_nobody_can_move() {
    let mut s = Session::new(Settings::new(2, 1));
    let saved = SavedGame {
        settings: Settings::new(2, 1),
        current_player: Cell::White,
        cursor_x: 2,
        cursor_y: 0,
        cells: pass_position(),
    };
    s.resume(&saved);
    // White has no move, so the turn falls to Black.
    assert_eq!(s.current_player(), Cell::Black);
    assert_eq!(s.place_at_cursor(), MoveOutcome::Applied(1));
    assert_eq!(s.phase(), Phase::GameOver(Outcome::BlackWins));
    assert_eq!(s.outcome(), Some(Outcome::BlackWins));
    assert_eq!(s.board().score(Cell::Black), 3);
    assert_eq!(s.put_piece(3, 0), MoveOutcome::Invalid);
}

#[test]
fn resume_with_short_cells_starts_fresh() {
    let mut s = Session::new(Settings::default());
    s.resume(&SavedGame {
        settings: Settings::new(2, 2),
        current_player: Cell::White,
        cursor_x: 9,
        cursor_y: 3,
        cells: vec![1, 2, 1],
    });
    assert_eq!(*s.board().snapshot(), *Board::new().snapshot());
    assert_eq!(s.cursor(), (1, 3));
    assert_eq!(s.settings(), Settings::new(2, 2));
}

#[test]
fn one_player_human_is_white_and_bot_replies() {
    let mut s = Session::new(Settings::new(1, 1))
        .with_bot_seed(5)
        .with_min_move_time(Duration::ZERO);
    s.start_new_game();
    assert_eq!(s.current_player(), Cell::White);
    assert!(!s.is_bot_turn());
    assert!(s.put_piece(3, 2).is_applied());

    assert!(s.is_bot_turn());
    assert_eq!(s.put_piece(2, 2), MoveOutcome::Invalid, "human cannot move for the bot");
    let reply = s.wait_bot(Duration::from_secs(5)).expect("bot replied");
    assert!(reply.is_applied());
    assert_eq!(s.current_player(), Cell::White);
    assert_eq!(s.moves()[1].color, Cell::Black);
}

#[test]
fn bot_vs_bot_plays_to_the_end() {
    let mut s = Session::new(Settings::new(0, 1))
        .with_bot_seed(11)
        .with_min_move_time(Duration::ZERO);
    s.start_new_game();
    let mut plies = 0;
    while s.phase() == Phase::Playing {
        assert!(s.is_bot_turn());
        let played = s.wait_bot(Duration::from_secs(5)).expect("bot answered");
        assert!(played.is_applied());
        plies += 1;
        assert!(plies <= 60);
    }
    let outcome = s.outcome().unwrap();
    let board = s.board();
    let (b, w) = (board.score(Cell::Black), board.score(Cell::White));
    drop(board);
    assert_eq!(outcome, Outcome::from_scores(b, w));
    assert_eq!(s.moves().len(), plies);
}

#[test]
fn stop_returns_record_for_resume() {
    let mut s = Session::new(Settings::new(2, 3));
    s.start_new_game();
    s.put_piece(3, 2);
    s.move_cursor(-1, 9);
    assert_eq!(s.cursor(), (7, 1));

    let rec = s.stop(true);
    assert_eq!(s.phase(), Phase::Idle);
    let bytes = rec.encode();
    let Record::FullSave(game) = Record::decode(&bytes).unwrap() else { panic!("expected a full save") };
    assert_eq!(game.current_player, Cell::Black);
    assert_eq!((game.cursor_x, game.cursor_y), (7, 1));

    let mut again = Session::new(Settings::default());
    again.resume(&game);
    assert_eq!(again.current_player(), Cell::Black);
    assert_eq!(again.board().score(Cell::White), 4);
    assert_eq!(again.settings(), Settings::new(2, 3));

    assert_eq!(again.stop(false), Record::SettingsOnly(Settings::new(2, 3)));
}

#[test]
fn next_mover_handles_pass_and_end() {
    let mut b = Board::new();
    assert_eq!(next_mover(&mut b, Cell::Black), Some(Cell::White));
    b.load(&pass_position());
    assert_eq!(next_mover(&mut b, Cell::Black), Some(Cell::Black));
    b.apply_move(2, 0, Cell::Black);
    assert_eq!(next_mover(&mut b, Cell::Black), None);
}
