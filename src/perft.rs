use crate::board::{Board, Cell, HEIGHT, WIDTH};

// Apply/undo perft over the history board. A forced pass consumes one ply;
// a position where neither side can move counts as a single leaf.
pub fn perft(board: &mut Board, color: Cell, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    let mut moved = false;
    for y in 0..HEIGHT as i32 {
        for x in 0..WIDTH as i32 {
            if board.apply_move(x, y, color).is_applied() {
                moved = true;
                nodes += perft(board, color.opponent(), depth - 1);
                board.undo_move();
            }
        }
    }
    if moved { return nodes; }
    if !board.can_move(color.opponent()) { return 1; }
    perft(board, color.opponent(), depth - 1)
}
