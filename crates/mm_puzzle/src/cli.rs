//! Command-line interface for mm_puzzle.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// M&M Puzzle - a trivia mini-game for young heroes
#[derive(Parser, Debug)]
#[command(name = "mm_puzzle")]
#[command(about = "Trivia mini-game with generated puzzles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config (defaults to ./mm_puzzle.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// JSON puzzle batch to play offline instead of generating puzzles
        #[arg(long)]
        puzzles: Option<PathBuf>,

        /// Log file (the terminal is taken by the game)
        #[arg(long, default_value = "mm_puzzle.log")]
        log_file: PathBuf,
    },

    /// Generate one puzzle batch and print it as JSON
    Generate {
        /// JSON puzzle batch to read instead of generating puzzles
        #[arg(long)]
        puzzles: Option<PathBuf>,
    },
}
