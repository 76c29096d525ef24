use anyhow::Result;
use clap::Parser;
use pieothello::save::{load_file, store_file, Record, Settings};
use pieothello::session::{Outcome, Phase, Session};
use pieothello::Cell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Othello against the minimax bot", long_about = None)]
struct Args {
    /// Human players: 0 = bot vs bot, 1 = you (White) vs bot, 2 = hot seat
    #[arg(long)]
    players: Option<u8>,

    /// Bot level (1..=5)
    #[arg(long)]
    level: Option<u8>,

    /// Seed the bots for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Saved state file
    #[arg(long, default_value = "othello.sav")]
    save: PathBuf,

    /// Ignore a saved game and start fresh
    #[arg(long)]
    new_game: bool,

    /// Minimum bot thinking time in milliseconds
    #[arg(long, default_value_t = 500)]
    min_move_ms: u64,
}

fn result_text(outcome: Outcome, players: u8) -> &'static str {
    match (outcome, players) {
        (Outcome::Draw, _) => "ITS A DRAW",
        (Outcome::WhiteWins, 1) => "YOU WIN",
        (Outcome::BlackWins, 1) => "I WIN",
        (Outcome::WhiteWins, _) => "WHITE WINS",
        (Outcome::BlackWins, _) => "BLACK WINS",
    }
}

fn turn_text(session: &Session) -> String {
    if session.settings().players == 1 {
        if session.is_bot_turn() { "WAIT".into() } else { "YOUR MOVE".into() }
    } else {
        format!("{} MOVE", session.current_player().to_string().to_uppercase())
    }
}

fn parse_coords(input: &str) -> Option<(i32, i32)> {
    let mut it = input.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty());
    let x = it.next()?.parse().ok()?;
    let y = it.next()?.parse().ok()?;
    if it.next().is_some() { return None; }
    Some((x, y))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let record = load_file(&args.save);
    let stored = record.settings();
    let settings = Settings::new(args.players.unwrap_or(stored.players), args.level.unwrap_or(stored.level));

    let mut session = Session::new(settings).with_min_move_time(Duration::from_millis(args.min_move_ms));
    if let Some(seed) = args.seed { session = session.with_bot_seed(seed); }

    match record.saved_game() {
        Some(saved) if !args.new_game => {
            println!("Resuming saved game from {}", args.save.display());
            session.resume(saved);
        }
        _ => session.start_new_game(),
    }
    // A resumed save is consumed; only settings stay on disk.
    store_file(&args.save, &Record::SettingsOnly(session.settings()))?;

    println!("Enter moves as 'x y' (0-7). Commands: moves, save, quit");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("\n{}", *session.board());
        match session.phase() {
            Phase::GameOver(outcome) => {
                println!("{}", result_text(outcome, session.settings().players));
                break;
            }
            Phase::Idle => break,
            Phase::Playing => {}
        }
        println!("{}", turn_text(&session));

        if session.is_bot_turn() {
            if session.wait_bot(Duration::from_secs(120)).is_none() {
                anyhow::bail!("bot did not answer");
            }
            continue;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" => {
                session.stop(false);
                break;
            }
            "save" => {
                let rec = session.stop(true);
                store_file(&args.save, &rec)?;
                println!("Game saved to {}", args.save.display());
                break;
            }
            "moves" => {
                let color = session.current_player();
                let legal = session.board().legal_moves(color);
                let list: Vec<String> = legal.iter().map(|m| m.to_string()).collect();
                println!("{} can play: {}", color, list.join(" "));
            }
            other => match parse_coords(other) {
                Some((x, y)) => {
                    if !session.put_piece(x, y).is_applied() {
                        println!("Illegal move!");
                    }
                }
                None => println!("Invalid input! Use 'x y', e.g. '2 4'"),
            },
        }
    }

    let black = session.board().score(Cell::Black);
    let white = session.board().score(Cell::White);
    println!("Final score: black {} white {}", black, white);
    Ok(())
}
