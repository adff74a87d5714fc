//! M&M Puzzle - terminal game and puzzle generation tool.

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use mm_puzzle::{
    FilePuzzleProvider, GameConfig, GameController, LlmClient, LlmPuzzleProvider, PuzzleProvider,
    StaticPuzzleProvider,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { puzzles, log_file } => run_play(cli.config, puzzles, log_file).await,
        Command::Generate { puzzles } => run_generate(cli.config, puzzles).await,
    }
}

/// Run the terminal game
#[instrument(skip_all)]
async fn run_play(
    config_path: Option<PathBuf>,
    puzzles: Option<PathBuf>,
    log_file: PathBuf,
) -> Result<()> {
    // Log to a file so tracing output does not corrupt the terminal UI.
    let log = std::fs::File::create(&log_file)?;
    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log))
                .with_ansi(false),
        )
        .init();

    info!(log_file = %log_file.display(), "Starting M&M Puzzle");

    let config = load_config(config_path.as_deref(), puzzles)?;
    let provider = build_provider(&config);
    let controller = GameController::new(provider, config.timing());

    mm_puzzle::tui::run_tui(controller).await?;

    println!("شكراً للعب M&M Puzzle!");
    Ok(())
}

/// Generate one batch and print it
#[instrument(skip_all)]
async fn run_generate(config_path: Option<PathBuf>, puzzles: Option<PathBuf>) -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(config_path.as_deref(), puzzles)?;
    let provider = build_provider(&config);

    info!("Generating puzzle batch");
    let batch = provider.generate_puzzles().await?;
    info!(count = batch.len(), "Batch generated");

    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,mm_puzzle=debug".into())
}

#[instrument]
fn load_config(
    config_path: Option<&std::path::Path>,
    puzzles: Option<PathBuf>,
) -> Result<GameConfig> {
    let config = GameConfig::load(config_path)?;
    // A --puzzles flag overrides the config file.
    Ok(match puzzles {
        Some(path) => config.with_puzzles_file(Some(path)),
        None => config,
    })
}

/// Picks the provider: puzzle file, then LLM, then the built-in sample.
#[instrument(skip(config))]
fn build_provider(config: &GameConfig) -> Arc<dyn PuzzleProvider> {
    if let Some(path) = config.puzzles_file() {
        info!(path = %path.display(), "Using puzzle file");
        return Arc::new(FilePuzzleProvider::new(path.clone()));
    }

    match config.create_llm_config() {
        Ok(llm_config) => {
            info!(provider = %config.provider(), model = %config.model(), "Using LLM puzzles");
            Arc::new(LlmPuzzleProvider::new(
                LlmClient::new(llm_config),
                *config.puzzle_count(),
            ))
        }
        Err(e) => {
            warn!(error = %e, "No LLM credentials, falling back to sample puzzles");
            Arc::new(StaticPuzzleProvider::sample())
        }
    }
}
