//! Top-level screens.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The view the player currently sees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    /// Title screen.
    #[default]
    Home,
    /// Level tile grid.
    LevelSelect,
    /// Cosmetic nearby-device list.
    BluetoothDiscovery,
    /// Declared for multiplayer; never entered.
    Lobby,
    /// A level attempt in progress.
    Playing,
    /// Level completed.
    Results,
}

impl Screen {
    /// Whether the back action is offered on this screen.
    pub fn has_back(self) -> bool {
        self != Self::Home
    }
}
