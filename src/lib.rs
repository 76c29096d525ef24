// Othello engine: history board + full-width minimax bot
pub mod board;
pub mod perft;
pub mod save;
pub mod search;
pub mod selfplay;
pub mod session;

pub use board::{Board, Cell, Move, MoveOutcome};
