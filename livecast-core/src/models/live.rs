//! Live session type and room-level media settings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of live session, chosen at creation and immutable afterwards.
///
/// The backend reports the room's type on join; a mismatch with the declared
/// type is a protocol error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveType {
    /// One broadcaster, no guest seats
    Single,
    /// Multiple guest seats
    Multi,
    /// Player-vs-player battle with a rival room
    Pk,
    /// Virtual-appearance broadcast
    Virtual,
}

impl LiveType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
            Self::Pk => "pk",
            Self::Virtual => "virtual",
        }
    }

    /// Whether rooms of this type carry a guest seat list
    #[must_use]
    pub const fn has_seats(&self) -> bool {
        matches!(self, Self::Multi | Self::Virtual)
    }
}

impl FromStr for LiveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            "pk" => Ok(Self::Pk),
            "virtual" => Ok(Self::Virtual),
            _ => Err(format!("Unknown live type: {s}")),
        }
    }
}

impl std::fmt::Display for LiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outbound stream parameters handed to the media transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamProfile {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub bitrate_kbps: u32,
}

/// Named quality preset for the outbound stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaQuality {
    Low,
    #[default]
    Standard,
    High,
}

impl MediaQuality {
    /// Concrete stream parameters for this preset
    #[must_use]
    pub const fn profile(&self) -> StreamProfile {
        match self {
            Self::Low => StreamProfile {
                width: 640,
                height: 360,
                frame_rate: 15,
                bitrate_kbps: 500,
            },
            Self::Standard => StreamProfile {
                width: 1280,
                height: 720,
                frame_rate: 30,
                bitrate_kbps: 1500,
            },
            Self::High => StreamProfile {
                width: 1920,
                height: 1080,
                frame_rate: 30,
                bitrate_kbps: 3500,
            },
        }
    }
}

/// Local configuration for a session, supplied by the caller at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSettings {
    /// Room title shown to other participants
    pub title: String,
    /// Outbound stream quality preset
    pub quality: MediaQuality,
}

impl RoomSettings {
    pub fn new(title: impl Into<String>, quality: MediaQuality) -> Self {
        Self {
            title: title.into(),
            quality,
        }
    }

    /// Settings with the default quality preset
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(title, MediaQuality::default())
    }
}
