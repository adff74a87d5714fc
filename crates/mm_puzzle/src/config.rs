//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::llm_client::{LlmConfig, LlmProvider};
use crate::session::Timing;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "mm_puzzle.toml";

/// Configuration for a game run.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// LLM provider generating puzzles (gemini, anthropic or openai).
    #[serde(default = "default_provider")]
    provider: LlmProvider,

    /// LLM model name.
    #[serde(default = "default_model")]
    model: String,

    /// Maximum tokens for the generation response.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Number of puzzles requested per level.
    #[serde(default = "default_puzzle_count")]
    puzzle_count: usize,

    /// Optional JSON puzzle batch used instead of the LLM.
    #[serde(default)]
    puzzles_file: Option<PathBuf>,

    /// Feedback delay after a correct answer, in milliseconds.
    #[serde(default = "default_success_delay_ms")]
    success_delay_ms: u64,

    /// Feedback delay after a wrong answer, in milliseconds.
    #[serde(default = "default_failure_delay_ms")]
    failure_delay_ms: u64,
}

fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_puzzle_count() -> usize {
    5
}

fn default_success_delay_ms() -> u64 {
    1200
}

fn default_failure_delay_ms() -> u64 {
    1000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            puzzle_count: default_puzzle_count(),
            puzzles_file: None,
            success_delay_ms: default_success_delay_ms(),
            failure_delay_ms: default_failure_delay_ms(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.puzzle_count == 0 {
            return Err(ConfigError::new(
                "puzzle_count must be at least 1".to_string(),
            ));
        }

        info!(provider = %config.provider, model = %config.model, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise [`DEFAULT_CONFIG_FILE`] if it exists,
    /// otherwise defaults.
    ///
    /// An explicit path that does not exist is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    info!(
                        "Config file not found at {}, using defaults",
                        default_path.display()
                    );
                    Ok(Self::default())
                }
            }
        }
    }

    /// Returns this config with the puzzle file replaced.
    pub fn with_puzzles_file(self, puzzles_file: Option<PathBuf>) -> Self {
        Self {
            puzzles_file,
            ..self
        }
    }

    /// Feedback delays for the session.
    pub fn timing(&self) -> Timing {
        Timing {
            success_delay: Duration::from_millis(self.success_delay_ms),
            failure_delay: Duration::from_millis(self.failure_delay_ms),
        }
    }

    /// Creates LLM configuration from this config.
    ///
    /// Requires the provider's API key environment variable
    /// (`GEMINI_API_KEY`, `ANTHROPIC_API_KEY` or `OPENAI_API_KEY`).
    #[instrument(skip(self), fields(provider = ?self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let var = self.provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.provider,
            api_key,
            self.model.clone(),
            self.max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
