use pieothello::board::{Board, Cell};
use pieothello::perft::perft;

#[test]
fn perft_opening_small_depths() {
    let mut b = Board::new();
    assert_eq!(perft(&mut b, Cell::Black, 1), 4);
    assert_eq!(perft(&mut b, Cell::Black, 2), 12);
    assert_eq!(perft(&mut b, Cell::Black, 3), 56);
    assert_eq!(perft(&mut b, Cell::Black, 4), 244);
    assert_eq!(perft(&mut b, Cell::Black, 5), 1396);
    // apply/undo leaves the start position in place
    assert_eq!(b.ply(), 1);
    assert_eq!(*b.snapshot(), *Board::new().snapshot());
}

#[test]
fn perft_is_color_symmetric_at_opening() {
    let mut b = Board::new();
    assert_eq!(perft(&mut b, Cell::White, 3), perft(&mut b, Cell::Black, 3));
}

#[test]
fn perft_counts_dead_position_once() {
    // Black (0,0), White (1,0): Black's only move ends the game.
    let mut cells = [0u8; 64];
    cells[0] = 1;
    cells[8] = 2;
    let mut b = Board::new();
    b.load(&cells);
    assert_eq!(perft(&mut b, Cell::Black, 1), 1);
    assert_eq!(perft(&mut b, Cell::Black, 4), 1);
    // White cannot move, so it passes to Black.
    assert_eq!(perft(&mut b, Cell::White, 2), 1);
}
