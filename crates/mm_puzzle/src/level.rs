//! Level tiles on the level-select screen.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::instrument;

/// One of the six challenge islands.
///
/// The choice is remembered for display only; every tile triggers the
/// same provider call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Level {
    /// Numbers island.
    NumbersIsland,
    /// Shapes kingdom.
    ShapesKingdom,
    /// Riddles forest.
    RiddlesForest,
    /// Logic cave.
    LogicCave,
    /// Symbols castle.
    SymbolsCastle,
    /// Genius challenge.
    GeniusChallenge,
}

impl Level {
    /// Returns the tile caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::NumbersIsland => "جزيرة الأرقام",
            Self::ShapesKingdom => "مملكة الأشكال",
            Self::RiddlesForest => "غابة الألغاز",
            Self::LogicCave => "كهف المنطق",
            Self::SymbolsCastle => "قلعة الرموز",
            Self::GeniusChallenge => "تحدي الذكاء",
        }
    }

    /// Returns the tile icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::NumbersIsland => "🔢",
            Self::ShapesKingdom => "🎨",
            Self::RiddlesForest => "🌳",
            Self::LogicCave => "💡",
            Self::SymbolsCastle => "🏰",
            Self::GeniusChallenge => "🏆",
        }
    }

    /// All tiles in grid order.
    #[instrument]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}
