//! Core types for call sequencing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Nothing is playing
    Idle,

    /// A real call is playing
    Playing,

    /// Silence filler is playing to keep the session awake
    PlayingSilence,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::PlayingSilence => "playing_silence",
        };
        f.write_str(s)
    }
}

/// Distinct token for each silence filler request
///
/// The surface treats a new token as a new item to play even though the
/// content is identical, so a filler that just ended can be re-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SilenceToken(pub u64);

impl fmt::Display for SilenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "silence#{}", self.0)
    }
}

/// Configuration for the autoplay engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Advance automatically when a call ends (default: true)
    pub autoplay_enabled: bool,

    /// Play silence when the queue runs dry so the host keeps the session
    /// alive (default: true)
    pub background_keep_alive: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autoplay_enabled: true,
            background_keep_alive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert!(config.autoplay_enabled);
        assert!(config.background_keep_alive);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "background_keep_alive": false }"#).unwrap();
        assert!(config.autoplay_enabled);
        assert!(!config.background_keep_alive);
    }

    #[test]
    fn status_display() {
        assert_eq!(PlaybackStatus::PlayingSilence.to_string(), "playing_silence");
        assert_eq!(SilenceToken(3).to_string(), "silence#3");
    }
}
