//! Puzzle providers - the external collaborator supplying level content.
//!
//! The session never looks inside a provider. It asks for one batch per level
//! attempt and gets either an ordered list of puzzles or a single
//! [`GenerationError`].

use std::path::PathBuf;

use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::{Puzzle, PuzzleKind};

/// Source of puzzle batches.
#[async_trait]
pub trait PuzzleProvider: Send + Sync {
    /// Produces the ordered puzzles for one level attempt.
    async fn generate_puzzles(&self) -> Result<Vec<Puzzle>, GenerationError>;
}

/// Puzzle generation failed. Subtypes are deliberately not distinguished.
#[derive(Debug, Clone, Display, Error)]
#[display("Generation error: {} at {}:{}", message, file, line)]
pub struct GenerationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GenerationError {
    /// Creates a new generation error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<LlmError> for GenerationError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        Self::new(err.message)
    }
}

impl From<serde_json::Error> for GenerationError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed puzzle batch: {}", err))
    }
}

impl From<std::io::Error> for GenerationError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Accepted top-level shapes of a batch.
#[derive(Deserialize)]
#[serde(untagged)]
enum Batch {
    List(Vec<Puzzle>),
    Wrapped { puzzles: Vec<Puzzle> },
}

/// Parses a JSON puzzle batch.
///
/// Accepts a bare array or an object with a `puzzles` array, optionally
/// wrapped in a Markdown code fence (LLMs like to add one). Empty batches
/// are rejected.
#[instrument(skip(raw), fields(raw_length = raw.len()))]
pub fn parse_batch(raw: &str) -> Result<Vec<Puzzle>, GenerationError> {
    let body = strip_code_fence(raw);
    let puzzles = match serde_json::from_str::<Batch>(body)? {
        Batch::List(puzzles) | Batch::Wrapped { puzzles } => puzzles,
    };

    if puzzles.is_empty() {
        return Err(GenerationError::new("Puzzle batch is empty"));
    }

    for puzzle in puzzles.iter().filter(|p| !p.answer_listed()) {
        warn!(puzzle_id = %puzzle.id(), "Puzzle answer missing from its options");
    }

    debug!(count = puzzles.len(), "Parsed puzzle batch");
    Ok(puzzles)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

const SYSTEM_PROMPT: &str = "You write short, cheerful puzzles for children aged 6 to 12. \
All player-facing text must be in Arabic. Reply with JSON only.";

/// Provider that asks an LLM for a fresh batch every time.
#[derive(Debug, Clone)]
pub struct LlmPuzzleProvider {
    client: LlmClient,
    puzzle_count: usize,
}

impl LlmPuzzleProvider {
    /// Creates a provider requesting `puzzle_count` puzzles per batch.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient, puzzle_count: usize) -> Self {
        info!("Creating LLM puzzle provider");
        Self {
            client,
            puzzle_count,
        }
    }

    /// Builds the user message describing the batch to generate.
    #[instrument(skip(self))]
    pub fn request_message(&self) -> String {
        let kinds = [
            PuzzleKind::Text,
            PuzzleKind::VisualPattern,
            PuzzleKind::LogicEmoji,
            PuzzleKind::MathFun,
        ]
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ");

        format!(
            "Generate {count} varied puzzles as a JSON array. Each element has: \
             \"id\" (string), \"type\" (one of: {kinds}), \"question\" (string), \
             \"visualData\" (optional array of emoji strings, used for visual_pattern \
             and logic_emoji), \"options\" (array of 4 strings), \"answer\" (string, \
             exactly equal to one of the options), \"hint\" (string), \"points\" \
             (integer between 10 and 50).",
            count = self.puzzle_count,
        )
    }
}

#[async_trait]
impl PuzzleProvider for LlmPuzzleProvider {
    #[instrument(skip(self), fields(count = self.puzzle_count))]
    async fn generate_puzzles(&self) -> Result<Vec<Puzzle>, GenerationError> {
        info!("Requesting puzzles from LLM");
        let raw = self
            .client
            .generate(SYSTEM_PROMPT, &self.request_message())
            .await
            .inspect_err(|e| error!(error = %e, "LLM request failed"))?;
        parse_batch(&raw)
    }
}

/// Provider that reads a JSON batch from disk on every request.
#[derive(Debug, Clone)]
pub struct FilePuzzleProvider {
    path: PathBuf,
}

impl FilePuzzleProvider {
    /// Creates a provider reading `path`.
    #[instrument(skip(path))]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(path = %path.display(), "Creating file puzzle provider");
        Self { path }
    }
}

#[async_trait]
impl PuzzleProvider for FilePuzzleProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn generate_puzzles(&self) -> Result<Vec<Puzzle>, GenerationError> {
        debug!("Reading puzzle file");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        parse_batch(&raw)
    }
}

/// Provider serving the same fixed batch on every request.
#[derive(Debug, Clone)]
pub struct StaticPuzzleProvider {
    puzzles: Vec<Puzzle>,
}

impl StaticPuzzleProvider {
    /// Creates a provider serving `puzzles`.
    pub fn new(puzzles: Vec<Puzzle>) -> Self {
        Self { puzzles }
    }

    /// A small built-in batch for offline play.
    #[instrument]
    pub fn sample() -> Self {
        let strings =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        let glyphs = |items: &[&str]| Some(strings(items));
        Self::new(vec![
            Puzzle::new(
                "sample-1".to_string(),
                PuzzleKind::MathFun,
                "كم يساوي ٣ + ٤؟".to_string(),
                None,
                strings(&["٦", "٧", "٨", "٩"]),
                "٧".to_string(),
                "عدّ على أصابعك!".to_string(),
                10,
            ),
            Puzzle::new(
                "sample-2".to_string(),
                PuzzleKind::VisualPattern,
                "ما الشكل التالي في النمط؟".to_string(),
                glyphs(&["🔴", "🔵", "🔴", "🔵"]),
                strings(&["🔴", "🔵", "🟢", "🟡"]),
                "🔴".to_string(),
                "الألوان تتبادل.".to_string(),
                20,
            ),
            Puzzle::new(
                "sample-3".to_string(),
                PuzzleKind::LogicEmoji,
                "أي حيوان يعيش في الماء؟".to_string(),
                glyphs(&["🐟", "🐈", "🐄"]),
                strings(&["🐟", "🐈", "🐄"]),
                "🐟".to_string(),
                "يسبح ولا يمشي.".to_string(),
                30,
            ),
        ])
    }
}

#[async_trait]
impl PuzzleProvider for StaticPuzzleProvider {
    #[instrument(skip(self), fields(count = self.puzzles.len()))]
    async fn generate_puzzles(&self) -> Result<Vec<Puzzle>, GenerationError> {
        if self.puzzles.is_empty() {
            return Err(GenerationError::new("Static provider has no puzzles"));
        }
        Ok(self.puzzles.clone())
    }
}
