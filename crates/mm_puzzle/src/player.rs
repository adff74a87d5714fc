//! The local player.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Identifier of the seed player every session starts with.
pub const HERO_ID: &str = "1";

/// A player in the session. In practice there is only the local hero.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Player {
    /// Player's unique ID.
    id: String,
    /// Display name.
    name: String,
    /// Avatar glyph.
    avatar: String,
    /// Accumulated score. Only ever grows.
    score: u32,
    /// Whether this player hosts the session.
    is_host: bool,
}

impl Player {
    /// Creates the fixed seed player.
    #[instrument]
    pub fn hero() -> Self {
        Self::new(
            HERO_ID.to_string(),
            "البطل".to_string(),
            "🦁".to_string(),
            0,
            true,
        )
    }

    /// Returns this player with `points` added to the score.
    #[instrument(skip(self), fields(player_id = %self.id, score = self.score))]
    pub fn awarded(self, points: u32) -> Self {
        let score = self.score.saturating_add(points);
        debug!(new_score = score, "Awarding points");
        Self { score, ..self }
    }
}
