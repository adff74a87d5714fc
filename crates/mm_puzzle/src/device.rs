//! Nearby devices shown on the discovery screen.
//!
//! Purely cosmetic: no device ever changes status and nothing connects.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Connection status of a discovered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceStatus {
    /// Visible and idle.
    Available,
    /// Handshake in progress.
    Connecting,
    /// Paired.
    Connected,
}

impl DeviceStatus {
    /// Badge text for the status.
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "متاح",
            Self::Connecting => "جاري الاتصال",
            Self::Connected => "متصل",
        }
    }
}

/// A device listed on the discovery screen.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Device {
    /// Device identifier.
    id: String,
    /// Display name.
    name: String,
    /// Current status.
    status: DeviceStatus,
}

impl Device {
    /// The fixed list every session starts with.
    pub fn discovered() -> Vec<Self> {
        vec![
            Self::new(
                "dev-2".to_string(),
                "جهاز أحمد".to_string(),
                DeviceStatus::Available,
            ),
            Self::new(
                "dev-3".to_string(),
                "جهاز سارة".to_string(),
                DeviceStatus::Available,
            ),
        ]
    }
}
