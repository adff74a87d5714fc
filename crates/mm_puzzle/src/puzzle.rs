//! Puzzle records as delivered by a puzzle provider.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, instrument};

/// Closed set of puzzle flavours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PuzzleKind {
    /// Plain text riddle.
    Text,
    /// A glyph sequence with a missing next element.
    VisualPattern,
    /// Emoji-based logic question.
    LogicEmoji,
    /// Light arithmetic.
    MathFun,
}

/// A single multiple-choice puzzle.
///
/// Immutable once received. The JSON shape matches the generator output:
/// `{"id", "type", "question", "visualData"?, "options", "answer", "hint", "points"}`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    /// Provider-assigned identifier.
    id: String,

    /// Puzzle flavour.
    #[serde(rename = "type")]
    kind: PuzzleKind,

    /// Question shown to the player.
    question: String,

    /// Optional glyphs rendered under the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visual_data: Option<Vec<String>>,

    /// Answer options, in display order.
    options: Vec<String>,

    /// The correct option.
    answer: String,

    /// Hint text revealed on request.
    hint: String,

    /// Points awarded for a correct answer.
    points: u32,
}

impl Puzzle {
    /// Returns true when `option` is exactly the stored answer.
    #[instrument(skip(self), fields(puzzle_id = %self.id))]
    pub fn is_correct(&self, option: &str) -> bool {
        let correct = option == self.answer;
        debug!(correct, "Checked answer");
        correct
    }

    /// Returns true when the stored answer is one of the options.
    ///
    /// A puzzle that fails this check can still be played; it just can
    /// never be answered correctly.
    #[instrument(skip(self), fields(puzzle_id = %self.id))]
    pub fn answer_listed(&self) -> bool {
        self.options.iter().any(|o| *o == self.answer)
    }

    /// Pattern puzzles render a trailing blank after their glyphs.
    pub fn shows_blank(&self) -> bool {
        self.kind == PuzzleKind::VisualPattern
    }
}
