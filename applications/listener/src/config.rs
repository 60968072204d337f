//! Listener configuration
use crate::error::{ListenerError, Result};
use scanner_playback::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound for the pause between replayed events
const MAX_STEP_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListenerConfig {
    #[serde(default)]
    pub playback: EngineConfig,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Event script to replay (JSON lines)
    #[serde(default)]
    pub script: Option<PathBuf>,

    /// Pause between replayed events
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Channel capacity between the feeder and the session task
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl ListenerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` falls back to `listener.toml` in the working directory; a missing
    /// default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("listener.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g.
        // SCANNER_PLAYBACK__BACKGROUND_KEEP_ALIVE=false
        settings = settings.add_source(
            config::Environment::with_prefix("SCANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.session.step_delay_ms > MAX_STEP_DELAY_MS {
            return Err(ListenerError::Config(format!(
                "session.step_delay_ms must be at most {} (got {})",
                MAX_STEP_DELAY_MS, self.session.step_delay_ms
            )));
        }

        if self.session.channel_capacity == 0 {
            return Err(ListenerError::Config(
                "session.channel_capacity must be positive".to_string(),
            ));
        }

        if let Some(script) = &self.session.script {
            if !script.exists() {
                return Err(ListenerError::Config(format!(
                    "Event script not found at {:?}",
                    script
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_session() -> SessionSettings {
    SessionSettings {
        script: None,
        step_delay_ms: default_step_delay_ms(),
        channel_capacity: default_channel_capacity(),
    }
}

fn default_step_delay_ms() -> u64 {
    0
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for SessionSettings {
    fn default() -> Self {
        default_session()
    }
}
