//! Tests for TOML game configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use mm_puzzle::{GameConfig, LlmProvider, Timing};
use tempfile::TempDir;

#[test]
fn test_empty_toml_uses_defaults() {
    let config = GameConfig::from_toml("").expect("Parse failed");
    assert_eq!(config, GameConfig::default());
    assert_eq!(*config.provider(), LlmProvider::Gemini);
    assert_eq!(config.model(), "gemini-2.5-flash");
    assert_eq!(*config.puzzle_count(), 5);
    assert!(config.puzzles_file().is_none());
    assert_eq!(config.timing(), Timing::default());
}

#[test]
fn test_partial_toml_overrides_fields() {
    let config = GameConfig::from_toml(
        r#"
provider = "anthropic"
model = "claude-3-5-haiku-20241022"
puzzle_count = 8
failure_delay_ms = 400
"#,
    )
    .expect("Parse failed");

    assert_eq!(*config.provider(), LlmProvider::Anthropic);
    assert_eq!(config.model(), "claude-3-5-haiku-20241022");
    assert_eq!(*config.puzzle_count(), 8);
    assert_eq!(*config.max_tokens(), 2048);
    assert_eq!(config.timing().failure_delay, Duration::from_millis(400));
    assert_eq!(config.timing().success_delay, Duration::from_millis(1200));
}

#[test]
fn test_zero_puzzle_count_rejected() {
    let err = GameConfig::from_toml("puzzle_count = 0").expect_err("Should fail");
    assert!(err.message.contains("puzzle_count"));
}

#[test]
fn test_unknown_provider_rejected() {
    assert!(GameConfig::from_toml(r#"provider = "mystery""#).is_err());
}

#[test]
fn test_from_file_reads_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("game.toml");
    fs::write(
        &path,
        r#"
provider = "openai"
model = "gpt-4o-mini"
puzzles_file = "levels/batch.json"
"#,
    )
    .expect("Failed to write TOML");

    let config = GameConfig::load(Some(path.as_path())).expect("Load failed");
    assert_eq!(*config.provider(), LlmProvider::OpenAI);
    assert_eq!(
        config.puzzles_file().as_deref(),
        Some(PathBuf::from("levels/batch.json").as_path())
    );
}

#[test]
fn test_explicit_missing_path_is_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("absent.toml");
    assert!(GameConfig::load(Some(path.as_path())).is_err());
}

#[test]
fn test_puzzles_file_override() {
    let config = GameConfig::default().with_puzzles_file(Some(PathBuf::from("offline.json")));
    assert_eq!(
        config.puzzles_file().as_deref(),
        Some(PathBuf::from("offline.json").as_path())
    );
}
