pub mod bot;
pub mod cancel;
pub mod minimax;

pub use bot::{Bot, MIN_MOVE_TIME};
pub use cancel::CancelToken;
pub use minimax::{BestMove, Level, SearchError, Searcher, CORNER_BONUS, MAX_LEVEL, MIN_LEVEL};
