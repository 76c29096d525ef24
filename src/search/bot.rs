use crate::board::{Cell, Move, SharedBoard};
use crate::search::cancel::CancelToken;
use crate::search::minimax::{Level, Searcher};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::PoisonError;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A bot move is never delivered sooner than this after its search starts.
pub const MIN_MOVE_TIME: Duration = Duration::from_millis(500);

/// Computer player running each search on its own thread.
pub struct Bot {
    board: SharedBoard,
    color: Cell,
    level: Level,
    min_move_time: Duration,
    rng: SmallRng,
    token: CancelToken,
}

impl Bot {
    pub fn new(board: SharedBoard, color: Cell, level: Level) -> Self {
        Self {
            board,
            color,
            level,
            min_move_time: MIN_MOVE_TIME,
            rng: SmallRng::from_entropy(),
            token: CancelToken::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn with_min_move_time(mut self, d: Duration) -> Self {
        self.min_move_time = d;
        self
    }

    pub fn color(&self) -> Cell { self.color }
    pub fn level(&self) -> Level { self.level }

    /// Launches a search on the current position. `on_move` runs on the bot
    /// thread once the pacing window has passed, unless the bot was cancelled
    /// or has no legal move.
    pub fn start<F>(&mut self, on_move: F) -> JoinHandle<()>
    where
        F: FnOnce(Move) + Send + 'static,
    {
        self.token = CancelToken::new();
        let token = self.token.clone();
        let mut searcher = Searcher::with_rng(SmallRng::seed_from_u64(self.rng.gen())).with_cancel_token(token.clone());
        let board = SharedBoard::clone(&self.board);
        let (color, depth, min_move_time) = (self.color, self.level.depth(), self.min_move_time);

        thread::spawn(move || {
            let started = Instant::now();
            let position = board.lock().unwrap_or_else(PoisonError::into_inner).branch();
            let best = match searcher.find_best_move(&position, color, depth) {
                Ok(Some(best)) => best,
                Ok(None) => {
                    debug!("bot {} has no move", color);
                    return;
                }
                Err(e) => {
                    debug!("bot {} search stopped: {}", color, e);
                    return;
                }
            };

            let elapsed = started.elapsed();
            if elapsed < min_move_time { thread::sleep(min_move_time - elapsed); }
            if token.is_cancelled() {
                debug!("bot {} cancelled before committing {}", color, best.as_move());
                return;
            }
            info!("bot {} plays {} (score {})", color, best.as_move(), best.score);
            on_move(best.as_move());
        })
    }

    /// Stops the in-flight search from being committed.
    pub fn cancel(&self) { self.token.cancel(); }
}
