use crate::board::{is_corner, Board, Cell, Move, MoveOutcome, HEIGHT, WIDTH};
use crate::search::cancel::CancelToken;
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Added to the net score of a move that lands on a corner.
pub const CORNER_BONUS: i32 = 10;

/// Difficulty setting; level `L` searches `L` plies (level 1 is greedy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Level(u8);

impl Level {
    pub fn new(level: u8) -> Self { Self(level.clamp(MIN_LEVEL, MAX_LEVEL)) }
    pub fn value(self) -> u8 { self.0 }
    pub fn depth(self) -> u32 { self.0 as u32 }
}

impl Default for Level {
    fn default() -> Self { Self(MIN_LEVEL) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestMove {
    pub x: u8,
    pub y: u8,
    /// Flips minus the opponent's best reply, plus positional bonus.
    pub score: i32,
}

impl BestMove {
    pub fn as_move(&self) -> Move { Move::new(self.x, self.y) }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search cancelled")]
    Cancelled,
    #[error("search depth {depth} exceeds the {available} history slots left on the board")]
    DepthExceedsCapacity { depth: u32, available: usize },
}

/// Plain full-width minimax over flip counts.
///
/// Candidates are tried in row-major order on a private branch of the caller's
/// board. Ties on the maximum are resolved by streaming reservoir sampling
/// over `rng`, so a seeded generator gives reproducible choices.
pub struct Searcher<R = SmallRng> {
    rng: R,
    cancel: CancelToken,
    pub(crate) nodes: u64,
}

impl Default for Searcher<SmallRng> {
    fn default() -> Self { Self::with_rng(SmallRng::from_entropy()) }
}

impl Searcher<SmallRng> {
    pub fn seeded(seed: u64) -> Self { Self::with_rng(SmallRng::seed_from_u64(seed)) }
}

impl<R: Rng> Searcher<R> {
    pub fn with_rng(rng: R) -> Self { Self { rng, cancel: CancelToken::new(), nodes: 0 } }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken { self.cancel.clone() }

    /// Candidate moves applied during the last search, across all plies.
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Best move for `color` looking `depth` plies ahead (0 behaves like 1).
    /// `Ok(None)` means `color` has no legal move; a cancelled search is
    /// `Err(SearchError::Cancelled)`, never `Ok(None)`.
    pub fn find_best_move(&mut self, board: &Board, color: Cell, depth: u32) -> Result<Option<BestMove>, SearchError> {
        if self.cancel.is_cancelled() { return Err(SearchError::Cancelled); }
        let depth = depth.max(1);
        let mut scratch = board.branch();
        let available = scratch.remaining_capacity();
        if depth as usize > available {
            return Err(SearchError::DepthExceedsCapacity { depth, available });
        }

        self.nodes = 0;
        let t0 = Instant::now();
        let best = self.best_reply(&mut scratch, color, depth)?;
        debug!(
            "search {} depth={} best={:?} nodes={} elapsed={:.3}s",
            color, depth, best, self.nodes, t0.elapsed().as_secs_f64()
        );
        Ok(best)
    }

    fn best_reply(&mut self, board: &mut Board, color: Cell, depth: u32) -> Result<Option<BestMove>, SearchError> {
        let mut best: Option<BestMove> = None;
        let mut ties: u32 = 0;

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if self.cancel.is_cancelled() { return Err(SearchError::Cancelled); }
                let flips = match board.apply_move(x as i32, y as i32, color) {
                    MoveOutcome::Applied(n) => n,
                    MoveOutcome::Invalid => continue,
                };
                self.nodes += 1;

                let mut net = flips as i32;
                if depth > 1 {
                    match self.best_reply(board, color.opponent(), depth - 1) {
                        Ok(Some(reply)) => net -= reply.score,
                        Ok(None) => {}
                        Err(e) => {
                            board.undo_move();
                            return Err(e);
                        }
                    }
                }
                if is_corner(x, y) { net += CORNER_BONUS; }
                board.undo_move();

                if depth > 1 { trace!("{} {},{} depth={} net={}", color, x, y, depth, net); }
                let candidate = BestMove { x: x as u8, y: y as u8, score: net };
                match best {
                    Some(b) if net < b.score => {}
                    Some(b) if net == b.score => {
                        ties += 1;
                        if self.rng.gen_range(0..ties) == 0 { best = Some(candidate); }
                    }
                    _ => {
                        best = Some(candidate);
                        ties = 0;
                    }
                }
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_clamps_to_supported_range() {
        assert_eq!(Level::new(0).value(), MIN_LEVEL);
        assert_eq!(Level::new(9).value(), MAX_LEVEL);
        assert_eq!(Level::new(3).depth(), 3);
    }

    #[test]
    fn empty_color_has_no_move() {
        let b = Board::new();
        let mut s = Searcher::seeded(1);
        assert_eq!(s.find_best_move(&b, Cell::Empty, 2), Ok(None));
        assert_eq!(s.nodes(), 0);
    }
}
