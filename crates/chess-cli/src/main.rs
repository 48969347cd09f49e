//! Chess CLI - plays moves, lists legal moves, and runs perft from the
//! command line.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=chess_engine=debug`).

mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chess_core::{MoveIntent, PieceKind, Square};
use chess_engine::{move_to_san, perft, perft_divide, EngineConfig, Game, Position};
use clap::{Parser, Subcommand};
use report::PlayReport;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Chess rules engine on the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a sequence of moves and print the resulting game
    Play {
        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// TOML file with advisory thresholds
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
        /// Moves in coordinate notation (e2e4, e7e8q) or SAN (Nf3, O-O)
        moves: Vec<String>,
    },
    /// List legal moves of the side to move
    Moves {
        /// Position to inspect (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Only list destinations of the piece on this square
        #[arg(long)]
        from: Option<Square>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Root position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
        /// Search depth in plies
        depth: u32,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            fen,
            config,
            json,
            moves,
        } => play(fen.as_deref(), config, json, &moves),
        Commands::Moves { fen, from } => list_moves(fen.as_deref(), from),
        Commands::Perft { fen, divide, depth } => run_perft(fen.as_deref(), depth, divide),
    }
}

fn load_position(fen: Option<&str>) -> anyhow::Result<Position> {
    match fen {
        Some(fen) => Ok(Position::from_fen(fen)?),
        None => Ok(Position::startpos()),
    }
}

fn play(
    fen: Option<&str>,
    config: Option<PathBuf>,
    json: bool,
    moves: &[String],
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut game = Game::from_position(load_position(fen)?).with_config(config);

    for token in moves {
        let result = match MoveIntent::from_uci(token) {
            Some(intent) => game.play(intent),
            None => game.play_san(token),
        };
        let outcome = result.with_context(|| format!("move {:?} rejected", token))?;
        tracing::info!(san = %outcome.san, status = %outcome.status, "played");
    }

    let report = PlayReport::from_game(&game);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn list_moves(fen: Option<&str>, from: Option<Square>) -> anyhow::Result<()> {
    let game = Game::from_position(load_position(fen)?);

    match from {
        Some(square) => {
            let destinations: Vec<String> = game
                .legal_destinations(square)
                .into_iter()
                .map(|sq| sq.to_string())
                .collect();
            println!("{}", destinations.join(" "));
        }
        None => {
            let position = game.position();
            let legal = game.legal_moves();
            let mut sans: Vec<String> = Vec::with_capacity(legal.len());
            for m in &legal {
                if m.is_promotion() {
                    for &kind in PieceKind::PROMOTIONS.iter() {
                        sans.push(move_to_san(position, &m.with_promotion(kind), &legal));
                    }
                } else {
                    sans.push(move_to_san(position, m, &legal));
                }
            }
            sans.sort();
            println!("{}", sans.join(" "));
            println!("{}", report::status_line(game.status(), legal.len()));
        }
    }
    Ok(())
}

fn run_perft(fen: Option<&str>, depth: u32, divide: bool) -> anyhow::Result<()> {
    let position = load_position(fen)?;
    let start = Instant::now();

    let nodes = if divide {
        let results = perft_divide(&position, depth);
        for (mv, count) in &results {
            println!("{}: {}", mv, count);
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&position, depth)
    };

    tracing::debug!(depth, nodes, elapsed_ms = start.elapsed().as_millis() as u64, "perft done");
    println!("Nodes: {}", nodes);
    Ok(())
}
