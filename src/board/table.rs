use super::{Cell, Move, MoveOutcome, CELLS, HEIGHT, HISTORY_DEPTH, WIDTH};
use log::debug;
use std::fmt;

/// First slot of real play; `undo_move` never retreats past it.
const START_SLOT: usize = 1;

/// Two 32-bit words, one per half of the board, msb first: clear bit = Black.
const TITLE_LAYOUT: [u32; 2] = [0x00C6_2545, 0x25C6_0000];

const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// One ply of history: the grid plus the running black/white counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    cells: [Cell; CELLS],
    score: [u8; 2],
}

impl Snapshot {
    const BLANK: Snapshot = Snapshot { cells: [Cell::Empty; CELLS], score: [0, 0] };

    #[inline]
    fn idx(x: usize, y: usize) -> usize { x * HEIGHT + y }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Cell { self.cells[Self::idx(x, y)] }

    #[inline]
    fn set(&mut self, x: usize, y: usize, c: Cell) { self.cells[Self::idx(x, y)] = c; }

    fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y) {
            Some(self.at(x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn black(&self) -> u32 { self.score[0] as u32 }
    pub fn white(&self) -> u32 { self.score[1] as u32 }

    /// Cells in save order (x outer, y inner).
    pub fn cells(&self) -> &[Cell; CELLS] { &self.cells }

    fn opening() -> Self {
        let mut s = Self::BLANK;
        s.set(3, 3, Cell::Black);
        s.set(3, 4, Cell::White);
        s.set(4, 3, Cell::White);
        s.set(4, 4, Cell::Black);
        s.score = [2, 2];
        s
    }

    fn title() -> Self {
        let mut s = Self::BLANK;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let bit = 31 - (x + (y % 4) * 8);
                let c = if (TITLE_LAYOUT[y / 4] >> bit) & 1 == 0 { Cell::Black } else { Cell::White };
                s.set(x, y, c);
            }
        }
        s.recount();
        s
    }

    fn recount(&mut self) {
        self.score = [0, 0];
        for c in self.cells {
            if let Some(i) = c.score_index() { self.score[i] += 1; }
        }
    }

    /// Walks from (x, y) in direction (dx, dy). When a run of opponent stones is
    /// closed by `color`, the run is flipped and its length returned.
    fn flip_run(&mut self, x: usize, y: usize, dx: i32, dy: i32, color: Cell) -> u32 {
        let (x0, y0) = (x as i32, y as i32);
        let mut run = 0i32;
        loop {
            let step = run + 1;
            match self.get(x0 + dx * step, y0 + dy * step) {
                None | Some(Cell::Empty) => return 0,
                Some(c) if c == color => {
                    for i in 1..=run {
                        self.set((x0 + dx * i) as usize, (y0 + dy * i) as usize, color);
                    }
                    return run as u32;
                }
                Some(_) => run += 1,
            }
        }
    }
}

/// The 8x8 Othello table with a bounded snapshot history.
///
/// Every applied move pushes a full copy of the current grid and mutates the
/// copy; undo only moves the pointer back, so the prior grid and score come
/// back untouched. The pointer lives in `[1, depth - 1]` where `depth` is the
/// number of history slots (`HISTORY_DEPTH` unless built with
/// `with_history_depth`).
#[derive(Clone, Debug)]
pub struct Board {
    history: Vec<Snapshot>,
    current: usize,
    title: bool,
}

impl Default for Board {
    fn default() -> Self { Self::new() }
}

impl Board {
    pub fn new() -> Self { Self::with_history_depth(HISTORY_DEPTH) }

    /// Board with `depth` history slots (at least 2: title and start).
    pub fn with_history_depth(depth: usize) -> Self {
        let mut history = vec![Snapshot::BLANK; depth.max(START_SLOT + 1)];
        history[0] = Snapshot::title();
        history[START_SLOT] = Snapshot::opening();
        Self { history, current: START_SLOT, title: false }
    }

    pub fn start_new_game(&mut self) {
        self.current = START_SLOT;
        self.history[START_SLOT] = Snapshot::opening();
        self.title = false;
    }

    /// A fresh board whose start slot is this board's current position.
    /// Moves and undos on the branch never reach back into `self`.
    pub fn branch(&self) -> Board {
        let mut history = vec![Snapshot::BLANK; self.history.len()];
        history[0] = self.history[0];
        history[START_SLOT] = *self.snapshot();
        Board { history, current: START_SLOT, title: false }
    }

    pub fn set_title(&mut self, title: bool) { self.title = title; }
    pub fn is_title(&self) -> bool { self.title }

    pub fn snapshot(&self) -> &Snapshot { &self.history[self.current] }

    /// History pointer: 1 at game start, +1 per applied move.
    pub fn ply(&self) -> usize { self.current }

    /// Moves that can still be pushed before the history ceiling.
    pub fn remaining_capacity(&self) -> usize { self.history_depth() - 1 - self.current }

    pub fn history_depth(&self) -> usize { self.history.len() }

    /// Out-of-range coordinates read as `Empty`.
    pub fn piece(&self, x: i32, y: i32) -> Cell {
        let slot = if self.title { 0 } else { self.current };
        self.history[slot].get(x, y).unwrap_or(Cell::Empty)
    }

    /// Stone count for a color; `Empty` yields the number of empty cells.
    pub fn score(&self, color: Cell) -> u32 {
        let s = self.snapshot();
        match color {
            Cell::Black => s.black(),
            Cell::White => s.white(),
            Cell::Empty => CELLS as u32 - s.black() - s.white(),
        }
    }

    pub fn empty_count(&self) -> u32 { self.score(Cell::Empty) }

    pub fn alternate(color: Cell) -> Cell { color.opponent() }

    pub fn apply_move(&mut self, x: i32, y: i32, color: Cell) -> MoveOutcome {
        let (Some(mover), Some(Cell::Empty)) = (color.score_index(), self.snapshot().get(x, y)) else {
            return MoveOutcome::Invalid;
        };
        if self.current + 1 == self.history.len() {
            return MoveOutcome::Invalid;
        }

        self.history[self.current + 1] = self.history[self.current];
        self.current += 1;

        let (ux, uy) = (x as usize, y as usize);
        let snap = &mut self.history[self.current];
        snap.set(ux, uy, color);
        let flips: u32 = DIRECTIONS
            .iter()
            .map(|&(dx, dy)| snap.flip_run(ux, uy, dx, dy, color))
            .sum();

        if flips == 0 {
            self.current -= 1;
            return MoveOutcome::Invalid;
        }

        snap.score[mover] += flips as u8 + 1;
        snap.score[1 - mover] -= flips as u8;
        MoveOutcome::Applied(flips)
    }

    pub fn undo_move(&mut self) -> bool {
        if self.current <= START_SLOT { return false; }
        self.current -= 1;
        true
    }

    pub fn can_move(&mut self, color: Cell) -> bool {
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                if self.apply_move(x, y, color).is_applied() {
                    self.undo_move();
                    return true;
                }
            }
        }
        false
    }

    /// Legal cells for `color` in row-major order.
    pub fn legal_moves(&mut self, color: Cell) -> Vec<Move> {
        let mut moves = Vec::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if self.apply_move(x as i32, y as i32, color).is_applied() {
                    self.undo_move();
                    moves.push(Move::new(x as u8, y as u8));
                }
            }
        }
        moves
    }

    /// Replaces the game with 64 raw cell bytes (x outer, y inner) and
    /// recounts the score. A short buffer starts a new game instead.
    /// Returns whether the buffer was used.
    pub fn load(&mut self, buf: &[u8]) -> bool {
        if buf.len() < CELLS {
            debug!("board buffer too short ({} bytes), starting a new game", buf.len());
            self.start_new_game();
            return false;
        }
        let slot = &mut self.history[START_SLOT];
        for (cell, &b) in slot.cells.iter_mut().zip(buf) {
            *cell = Cell::from_byte(b).unwrap_or(Cell::Empty);
        }
        slot.recount();
        self.current = START_SLOT;
        self.title = false;
        true
    }

    pub fn save(&self) -> [u8; CELLS] {
        let mut out = [0u8; CELLS];
        for (b, c) in out.iter_mut().zip(self.snapshot().cells.iter()) {
            *b = c.as_byte();
        }
        out
    }

    pub fn save_into(&self, out: &mut Vec<u8>) { out.extend_from_slice(&self.save()); }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " ")?;
        for x in 0..WIDTH { write!(f, " {}", x)?; }
        writeln!(f)?;
        for y in 0..HEIGHT {
            write!(f, "{}", y)?;
            for x in 0..WIDTH {
                write!(f, " {}", self.piece(x as i32, y as i32).symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "X {}  O {}", self.score(Cell::Black), self.score(Cell::White))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_pattern_fills_every_cell() {
        let mut b = Board::new();
        b.set_title(true);
        let mut colored = 0;
        for y in 0..8 {
            for x in 0..8 {
                if b.piece(x, y).is_color() { colored += 1; }
            }
        }
        assert_eq!(colored, 64);
        b.set_title(false);
        assert_eq!(b.piece(3, 3), Cell::Black);
    }

    #[test]
    fn flip_run_needs_closing_stone() {
        let mut s = Snapshot::opening();
        // (2,4) eastward: White at (3,4) closed by Black at (4,4).
        assert_eq!(s.flip_run(2, 4, 1, 0, Cell::Black), 1);
        assert_eq!(s.at(3, 4), Cell::Black);
        // (5,5) westward hits Empty at (4,5) immediately.
        assert_eq!(s.flip_run(5, 5, -1, 0, Cell::Black), 0);
    }
}
