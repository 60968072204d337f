//! Listener error types
use scanner_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ListenerError>;

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Session error: {0}")]
    Session(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ListenerError {
    fn from(err: config::ConfigError) -> Self {
        ListenerError::Config(err.to_string())
    }
}
