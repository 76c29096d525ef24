use crate::board::{Board, Cell, MoveOutcome};
use crate::search::{Level, Searcher};
use crate::session::{next_mover, Outcome, PlayedMove};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub black_level: Level,
    pub white_level: Level,
    pub seed: u64,
    /// Stop a game after this many plies even if it is not over.
    pub max_plies: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub moves: Vec<PlayedMove>,
    pub black: u32,
    pub white: u32,
    /// None when the ply limit cut the game short.
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut s = Summary { games: games.len(), ..Default::default() };
        for g in games {
            match g.outcome {
                Some(Outcome::BlackWins) => s.black_wins += 1,
                Some(Outcome::WhiteWins) => s.white_wins += 1,
                Some(Outcome::Draw) => s.draws += 1,
                None => s.unfinished += 1,
            }
        }
        s
    }
}

/// Plays every game independently in parallel; game `i` uses seed `seed + i`,
/// so the output does not depend on the thread count.
pub fn generate_games(params: &SelfPlayParams) -> Vec<GameRecord> {
    (0..params.games)
        .into_par_iter()
        .map(|gi| play_game(params, params.seed.wrapping_add(gi as u64)))
        .collect()
}

pub fn play_game(params: &SelfPlayParams, seed: u64) -> GameRecord {
    let mut black = Searcher::seeded(seed);
    let mut white = Searcher::seeded(seed.rotate_left(17) ^ 0x5eed);
    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut to_move = next_mover(&mut board, Cell::Black);

    while let Some(color) = to_move {
        if moves.len() >= params.max_plies { break; }
        let (searcher, level) = match color {
            Cell::Black => (&mut black, params.black_level),
            _ => (&mut white, params.white_level),
        };
        let best = match searcher.find_best_move(&board, color, level.depth()) {
            Ok(Some(b)) => b,
            Ok(None) => break,
            Err(e) => {
                debug!("self-play game {} stopped: {}", seed, e);
                break;
            }
        };
        let MoveOutcome::Applied(flips) = board.apply_move(best.x as i32, best.y as i32, color) else { break };
        moves.push(PlayedMove { color, x: best.x, y: best.y, flips });
        to_move = next_mover(&mut board, color);
    }

    let (b, w) = (board.score(Cell::Black), board.score(Cell::White));
    let outcome = to_move.is_none().then(|| Outcome::from_scores(b, w));
    GameRecord { seed, moves, black: b, white: w, outcome }
}

/// One JSON object per line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> anyhow::Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<GameRecord>> {
    let r = BufReader::new(File::open(path)?);
    let mut games = Vec::new();
    for line in r.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        games.push(serde_json::from_str(&line)?);
    }
    Ok(games)
}
