use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

pub mod table;

pub use table::{Board, Snapshot};

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 8;
pub const CELLS: usize = WIDTH * HEIGHT;

/// One slot per ply that can ever be placed; slot 0 holds the title pattern.
pub const HISTORY_DEPTH: usize = CELLS;

/// Board handle shared between the turn controller and bot threads.
/// Only one side writes at a time; the lock just keeps reads coherent.
pub type SharedBoard = Arc<Mutex<Board>>;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Cell {
    pub fn from_byte(b: u8) -> Option<Cell> {
        match b {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 { self as u8 }

    /// Black and White swap; Empty stays Empty.
    pub fn opponent(self) -> Cell {
        match self {
            Cell::Black => Cell::White,
            Cell::White => Cell::Black,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn is_color(self) -> bool { self != Cell::Empty }

    pub(crate) fn score_index(self) -> Option<usize> {
        match self {
            Cell::Black => Some(0),
            Cell::White => Some(1),
            Cell::Empty => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'X',
            Cell::White => 'O',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Cell::Empty => "empty",
            Cell::Black => "black",
            Cell::White => "white",
        };
        f.write_str(name)
    }
}

/// Result of `Board::apply_move`. `Invalid` is an ordinary outcome, never a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(u32),
    Invalid,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool { matches!(self, MoveOutcome::Applied(_)) }

    pub fn flips(&self) -> Option<u32> {
        match *self {
            MoveOutcome::Applied(n) => Some(n),
            MoveOutcome::Invalid => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: u8,
    pub y: u8,
}

impl Move {
    pub fn new(x: u8, y: u8) -> Self { Self { x, y } }

    pub fn is_corner(&self) -> bool { is_corner(self.x as usize, self.y as usize) }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

pub fn is_corner(x: usize, y: usize) -> bool {
    (x == 0 || x == WIDTH - 1) && (y == 0 || y == HEIGHT - 1)
}
