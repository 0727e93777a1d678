use anyhow::Result;
use clap::Parser;

use rewind_chess::playback::{play_random, PlaybackConfig};
use rewind_chess::{Color, Game, PieceKind};

/// Plays a seeded random game and prints it.
#[derive(Parser, Debug)]
#[command(name = "playback")]
#[command(about = "Random self-play on the chess rules engine")]
struct Cli {
    /// RNG seed; the same seed replays the same game
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many plies
    #[arg(long, default_value_t = 300)]
    max_plies: usize,

    /// Print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print the final board
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// Step back this many plies through history before printing the board
    #[arg(long, default_value_t = 0)]
    rewind: usize,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = PlaybackConfig::new()
        .with_seed(cli.seed)
        .with_max_plies(cli.max_plies);

    let mut game = Game::new();
    let report = play_random(&mut game, &config)?;

    for _ in 0..cli.rewind {
        if game.previous().is_none() {
            break;
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for ply in &report.plies {
            let capture = ply
                .captured
                .map(|k| format!(" takes {k}"))
                .unwrap_or_default();
            let promo = if ply.promoted { " =Q" } else { "" };
            let check = if ply.check { " +" } else { "" };
            println!(
                "{:>4}. {} {} {}-{}{capture}{promo}{check}",
                ply.ply,
                ply.color.name(true),
                ply.piece,
                ply.from,
                ply.to
            );
        }
        println!("Result: {}", report.outcome.label());
    }

    if cli.show_board {
        let board = game.board();
        println!();
        println!("{board}");
        println!(
            "Snapshot {}/{}",
            game.cursor().map_or(0, |c| c + 1),
            game.history().len()
        );
        let material = board.material();
        for color in Color::ALL {
            let summary: Vec<String> = PieceKind::ALL
                .iter()
                .filter_map(|&k| material.get(&(color, k)).map(|n| format!("{n}x {k}")))
                .collect();
            println!("{}: {}", color.name(true), summary.join(", "));
        }
    }

    Ok(())
}
