//! Persisted state buffer.
//!
//! Two record shapes share one storage slot, told apart by the first byte:
//! a 3-byte settings record and a 70-byte full save carrying the turn,
//! cursor and the 64 raw cells (x outer, y inner).

use crate::board::{Board, Cell, CELLS};
use crate::search::Level;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// -123 as a signed byte.
pub const SETTINGS_ONLY: u8 = 0x85;
/// -122 as a signed byte.
pub const FULL_SAVE: u8 = 0x86;

pub const SETTINGS_LEN: usize = 3;
pub const HEADER_LEN: usize = 6;
pub const FULL_SAVE_LEN: usize = HEADER_LEN + CELLS;

pub const DEFAULT_PLAYERS: u8 = 1;
pub const DEFAULT_LEVEL: u8 = 1;
pub const MAX_PLAYERS: u8 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("empty save buffer")]
    Empty,
    #[error("unknown record identifier {0:#04x}")]
    UnknownIdentifier(u8),
    #[error("record truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("invalid current player byte {0}")]
    InvalidPlayer(u8),
}

/// Game mode (number of human players, 0..=2) and bot level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub players: u8,
    pub level: u8,
}

impl Default for Settings {
    fn default() -> Self { Self { players: DEFAULT_PLAYERS, level: DEFAULT_LEVEL } }
}

impl Settings {
    pub fn new(players: u8, level: u8) -> Self { Self { players: players.min(MAX_PLAYERS), level } }

    pub fn level(&self) -> Level { Level::new(self.level) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedGame {
    pub settings: Settings,
    pub current_player: Cell,
    pub cursor_x: u8,
    pub cursor_y: u8,
    /// Raw cell bytes; fewer than 64 makes the board fall back to a new game.
    pub cells: Vec<u8>,
}

impl SavedGame {
    pub fn capture(settings: Settings, board: &Board, current_player: Cell, cursor: (u8, u8)) -> Self {
        Self {
            settings,
            current_player,
            cursor_x: cursor.0,
            cursor_y: cursor.1,
            cells: board.save().to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    SettingsOnly(Settings),
    FullSave(SavedGame),
}

impl Default for Record {
    fn default() -> Self { Record::SettingsOnly(Settings::default()) }
}

impl Record {
    pub fn settings(&self) -> Settings {
        match self {
            Record::SettingsOnly(s) => *s,
            Record::FullSave(g) => g.settings,
        }
    }

    pub fn saved_game(&self) -> Option<&SavedGame> {
        match self {
            Record::FullSave(g) => Some(g),
            Record::SettingsOnly(_) => None,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Record::SettingsOnly(s) => vec![SETTINGS_ONLY, s.players, s.level],
            Record::FullSave(g) => {
                let mut out = Vec::with_capacity(HEADER_LEN + g.cells.len());
                out.extend_from_slice(&[
                    FULL_SAVE,
                    g.settings.players,
                    g.settings.level,
                    g.current_player.as_byte(),
                    g.cursor_x,
                    g.cursor_y,
                ]);
                out.extend_from_slice(&g.cells);
                out
            }
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Record, SaveError> {
        let Some(&id) = bytes.first() else { return Err(SaveError::Empty) };
        let need = |expected: usize| {
            if bytes.len() < expected {
                Err(SaveError::Truncated { expected, actual: bytes.len() })
            } else {
                Ok(())
            }
        };
        match id {
            SETTINGS_ONLY => {
                need(SETTINGS_LEN)?;
                Ok(Record::SettingsOnly(Settings { players: bytes[1], level: bytes[2] }))
            }
            FULL_SAVE => {
                need(HEADER_LEN)?;
                let current_player = match Cell::from_byte(bytes[3]) {
                    Some(c) if c.is_color() => c,
                    _ => return Err(SaveError::InvalidPlayer(bytes[3])),
                };
                let end = bytes.len().min(FULL_SAVE_LEN);
                Ok(Record::FullSave(SavedGame {
                    settings: Settings { players: bytes[1], level: bytes[2] },
                    current_player,
                    cursor_x: bytes[4],
                    cursor_y: bytes[5],
                    cells: bytes[HEADER_LEN..end].to_vec(),
                }))
            }
            other => Err(SaveError::UnknownIdentifier(other)),
        }
    }

    /// Corrupt records degrade to default settings.
    pub fn decode_or_default(bytes: &[u8]) -> Record {
        Record::decode(bytes).unwrap_or_else(|e| {
            warn!("discarding saved state: {}", e);
            Record::default()
        })
    }
}

pub fn load_file(path: &Path) -> Record {
    match std::fs::read(path) {
        Ok(bytes) => Record::decode_or_default(&bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no saved state at {}", path.display());
            Record::default()
        }
        Err(e) => {
            warn!("failed to read {}: {}", path.display(), e);
            Record::default()
        }
    }
}

pub fn store_file(path: &Path, record: &Record) -> io::Result<()> {
    std::fs::write(path, record.encode())
}
