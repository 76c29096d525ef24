use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pieothello::search::Level;
use pieothello::selfplay::{play_game, write_jsonl, GameRecord, SelfPlayParams, Summary};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "othello-selfplay", about = "Play bot-vs-bot games and write JSON line records")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 1)]
    black_level: u8,
    #[arg(long, default_value_t = 3)]
    white_level: u8,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 60)]
    max_plies: usize,
    /// Worker threads (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        black_level: Level::new(a.black_level),
        white_level: Level::new(a.white_level),
        seed: a.seed,
        max_plies: a.max_plies,
    };
    eprintln!(
        "Playing {} games (black level={}, white level={}, seed={})",
        a.games, params.black_level.value(), params.white_level.value(), a.seed
    );

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let play = || -> Vec<GameRecord> {
        (0..params.games)
            .into_par_iter()
            .map(|gi| {
                let g = play_game(&params, params.seed.wrapping_add(gi as u64));
                pb.inc(1);
                g
            })
            .collect()
    };
    let games = if a.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(a.threads).build()?.install(play)
    } else {
        play()
    };
    pb.finish_and_clear();

    write_jsonl(&games, &a.out)?;
    let summary = Summary::from_games(&games);
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
