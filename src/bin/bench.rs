use clap::Parser;
use pieothello::search::{Level, Searcher};
use pieothello::{Board, Cell};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "othello-bench", version, about = "Time the minimax search from the opening")]
struct Args {
    /// Bot level (1..=5)
    #[arg(long, default_value_t = 5)]
    level: u8,

    /// Opening moves to play before searching, as x,y pairs
    #[arg(long, num_args = 0..)]
    moves: Vec<String>,

    /// Number of timed searches
    #[arg(long, default_value_t = 5)]
    runs: usize,

    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut board = Board::new();
    let mut color = Cell::White;
    for m in &args.moves {
        let (x, y) = m.split_once(',').ok_or_else(|| anyhow::anyhow!("bad move '{}', expected x,y", m))?;
        let (x, y): (i32, i32) = (x.parse()?, y.parse()?);
        if !board.apply_move(x, y, color).is_applied() {
            anyhow::bail!("illegal move {} for {}", m, color);
        }
        color = color.opponent();
    }

    let level = Level::new(args.level);
    let mut s = Searcher::seeded(args.seed);
    let t0 = Instant::now();
    let mut last = None;
    for _ in 0..args.runs.max(1) {
        last = s.find_best_move(&board, color, level.depth())?;
    }
    let dt = t0.elapsed().as_secs_f64() / args.runs.max(1) as f64;
    let nps = if dt > 0.0 { s.nodes() as f64 / dt } else { 0.0 };
    match last {
        Some(b) => println!("bestmove={} score={} nodes={} avg={:.4}s nps={:.1}", b.as_move(), b.score, s.nodes(), dt, nps),
        None => println!("bestmove=(none) nodes={} avg={:.4}s", s.nodes(), dt),
    }
    Ok(())
}
