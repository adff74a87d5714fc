//! M&M Puzzle library - a small trivia mini-game session engine.
//!
//! The player walks through a fixed set of screens (home, level select,
//! play, results), answering multiple-choice puzzles produced by an external
//! generator while the game tracks score and lives.
//!
//! # Architecture
//!
//! - **Session**: an immutable [`Session`] value and a pure reducer,
//!   [`Session::apply`], mapping `(Session, Event) -> Session`
//! - **Effects**: [`Effect::between`] derives the side effects (puzzle load,
//!   deferred timers) a driver must run after a transition
//! - **Controller**: [`GameController`] drives the reducer on tokio, running
//!   provider calls and timers as background tasks
//! - **Providers**: [`PuzzleProvider`] implementations backed by an LLM, a
//!   JSON file, or a fixed in-memory batch
//! - **TUI**: a terminal frontend rendering every screen
//!
//! # Example
//!
//! ```
//! use mm_puzzle::{Event, Screen, Session};
//!
//! let session = Session::default().apply(Event::PlayNow);
//! assert_eq!(session.screen(), Screen::LevelSelect);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod device;
mod level;
mod player;
mod provider;
mod puzzle;
mod screen;
mod session;

pub mod llm_client;
pub mod text;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Controller
pub use controller::GameController;

// Crate-level exports - Domain types
pub use device::{Device, DeviceStatus};
pub use level::Level;
pub use player::{HERO_ID, Player};
pub use puzzle::{Puzzle, PuzzleKind};
pub use screen::Screen;

// Crate-level exports - Puzzle providers
pub use provider::{
    FilePuzzleProvider, GenerationError, LlmPuzzleProvider, PuzzleProvider, StaticPuzzleProvider,
    parse_batch,
};

// Crate-level exports - Session state machine
pub use session::{
    Effect, Event, Feedback, FeedbackKind, Notice, Pending, PendingAction, Prompt, STARTING_LIVES,
    Session, Timing,
};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};
