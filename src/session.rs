use crate::board::{Board, Cell, Move, MoveOutcome, SharedBoard, HEIGHT, WIDTH};
use crate::save::{Record, SavedGame, Settings};
use crate::search::Bot;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    pub fn from_scores(black: u32, white: u32) -> Self {
        match white.cmp(&black) {
            std::cmp::Ordering::Greater => Outcome::WhiteWins,
            std::cmp::Ordering::Less => Outcome::BlackWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    GameOver(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub color: Cell,
    pub x: u8,
    pub y: u8,
    pub flips: u32,
}

/// Who moves after `just_moved`: the opponent if it can, else `just_moved`
/// again (the opponent passes), else nobody and the game is over.
pub fn next_mover(board: &mut Board, just_moved: Cell) -> Option<Cell> {
    let next = just_moved.opponent();
    if board.can_move(next) { return Some(next); }
    if board.can_move(just_moved) { return Some(just_moved); }
    None
}

fn bot_slot(color: Cell) -> Option<usize> {
    match color {
        Cell::Black => Some(0),
        Cell::White => Some(1),
        Cell::Empty => None,
    }
}

/// Turn controller. Humans and bots take turns on one shared board; the
/// session is its only writer, and bot moves reach it over a channel.
///
/// Player count decides who is a bot: with 0 players both colors are bots,
/// with 1 the human plays White, with 2 nobody is. White moves first.
pub struct Session {
    board: SharedBoard,
    settings: Settings,
    current: Cell,
    cursor: (u8, u8),
    phase: Phase,
    log: Vec<PlayedMove>,
    bots: [Option<Bot>; 2],
    bot_seed: Option<u64>,
    min_move_time: Option<Duration>,
    bot_tx: Sender<(Cell, Move)>,
    bot_rx: Receiver<(Cell, Move)>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let (bot_tx, bot_rx) = mpsc::channel();
        Self {
            board: Arc::new(Mutex::new(Board::new())),
            settings,
            current: Cell::White,
            cursor: (0, 0),
            phase: Phase::Idle,
            log: Vec::new(),
            bots: [None, None],
            bot_seed: None,
            min_move_time: None,
            bot_tx,
            bot_rx,
        }
    }

    /// Seeds both bots so bot-vs-bot games replay identically.
    pub fn with_bot_seed(mut self, seed: u64) -> Self {
        self.bot_seed = Some(seed);
        self
    }

    pub fn with_min_move_time(mut self, d: Duration) -> Self {
        self.min_move_time = Some(d);
        self
    }

    pub fn shared_board(&self) -> SharedBoard { Arc::clone(&self.board) }

    pub fn board(&self) -> MutexGuard<'_, Board> { self.board.lock().unwrap_or_else(PoisonError::into_inner) }

    pub fn settings(&self) -> Settings { self.settings }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn current_player(&self) -> Cell { self.current }
    pub fn cursor(&self) -> (u8, u8) { self.cursor }
    pub fn moves(&self) -> &[PlayedMove] { &self.log }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_bot_turn(&self) -> bool {
        self.phase == Phase::Playing && bot_slot(self.current).is_some_and(|i| self.bots[i].is_some())
    }

    pub fn start_new_game(&mut self) {
        self.stop_bots();
        self.cursor = (0, 0);
        self.log.clear();
        self.init_bots();
        self.board().start_new_game();
        info!("new game: players={} level={}", self.settings.players, self.settings.level().value());
        // switch_player hands the first move to White.
        self.current = Cell::Black;
        self.phase = Phase::Playing;
        self.switch_player();
    }

    pub fn resume(&mut self, saved: &SavedGame) {
        self.stop_bots();
        self.settings = saved.settings;
        self.cursor = (saved.cursor_x % WIDTH as u8, saved.cursor_y % HEIGHT as u8);
        self.log.clear();
        self.init_bots();
        self.board().load(&saved.cells);
        info!("resumed game: {} to move", saved.current_player);
        self.current = saved.current_player.opponent();
        self.phase = Phase::Playing;
        self.switch_player();
    }

    /// Cancels bots and leaves the game. Returns the record to persist:
    /// a full save when `save` is set and a game was in progress.
    pub fn stop(&mut self, save: bool) -> Record {
        let record = if save && self.phase == Phase::Playing {
            self.save_record()
        } else {
            Record::SettingsOnly(self.settings)
        };
        self.stop_bots();
        self.phase = Phase::Idle;
        record
    }

    pub fn save_record(&self) -> Record {
        let board = self.board();
        Record::FullSave(SavedGame::capture(self.settings, &board, self.current, self.cursor))
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let wrap = |v: u8, d: i32, n: usize| (v as i32 + d).rem_euclid(n as i32) as u8;
        self.cursor = (wrap(self.cursor.0, dx, WIDTH), wrap(self.cursor.1, dy, HEIGHT));
    }

    pub fn place_at_cursor(&mut self) -> MoveOutcome {
        let (x, y) = self.cursor;
        self.put_piece(x as i32, y as i32)
    }

    /// Human move for the current player. Refused while a bot owns the turn.
    pub fn put_piece(&mut self, x: i32, y: i32) -> MoveOutcome {
        if self.is_bot_turn() { return MoveOutcome::Invalid; }
        self.commit(x, y)
    }

    /// Applies a finished bot move, if one has arrived.
    pub fn poll_bot(&mut self) -> Option<MoveOutcome> {
        let (color, mv) = self.bot_rx.try_recv().ok()?;
        Some(self.commit_bot(color, mv))
    }

    /// Blocks up to `timeout` for the current bot's move.
    pub fn wait_bot(&mut self, timeout: Duration) -> Option<MoveOutcome> {
        match self.bot_rx.recv_timeout(timeout) {
            Ok((color, mv)) => Some(self.commit_bot(color, mv)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn commit_bot(&mut self, color: Cell, mv: Move) -> MoveOutcome {
        // Moves from a search started before a restart or pass are stale.
        if !self.is_bot_turn() || color != self.current { return MoveOutcome::Invalid; }
        self.commit(mv.x as i32, mv.y as i32)
    }

    fn commit(&mut self, x: i32, y: i32) -> MoveOutcome {
        if self.phase != Phase::Playing { return MoveOutcome::Invalid; }
        let color = self.current;
        let outcome = self.board().apply_move(x, y, color);
        if let MoveOutcome::Applied(flips) = outcome {
            self.log.push(PlayedMove { color, x: x as u8, y: y as u8, flips });
            self.switch_player();
        }
        outcome
    }

    fn switch_player(&mut self) {
        if self.phase != Phase::Playing { return; }
        let next = next_mover(&mut self.board(), self.current);
        let Some(next) = next else {
            let board = self.board();
            let outcome = Outcome::from_scores(board.score(Cell::Black), board.score(Cell::White));
            drop(board);
            info!("game over: {:?}", outcome);
            self.phase = Phase::GameOver(outcome);
            return;
        };
        if next == self.current {
            info!("{} passes", self.current.opponent());
        }
        self.current = next;

        if let Some(bot) = bot_slot(next).and_then(|i| self.bots[i].as_mut()) {
            let tx = self.bot_tx.clone();
            let color = bot.color();
            bot.start(move |mv| {
                let _ = tx.send((color, mv));
            });
        }
    }

    fn init_bots(&mut self) {
        let level = self.settings.level();
        let players = self.settings.players;
        let make = |color: Cell| {
            let mut bot = Bot::new(Arc::clone(&self.board), color, level);
            if let Some(seed) = self.bot_seed { bot = bot.with_seed(seed ^ color.as_byte() as u64); }
            if let Some(d) = self.min_move_time { bot = bot.with_min_move_time(d); }
            bot
        };
        let white = (players < 1).then(|| make(Cell::White));
        let black = (players < 2).then(|| make(Cell::Black));
        self.bots = [black, white];
    }

    fn stop_bots(&mut self) {
        for bot in self.bots.iter().flatten() { bot.cancel(); }
        self.bots = [None, None];
        while self.bot_rx.try_recv().is_ok() {}
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for bot in self.bots.iter().flatten() { bot.cancel(); }
    }
}
