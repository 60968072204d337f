//! Event scripts
//!
//! A script is a JSON-lines file of `SessionEvent`s. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! # initial page, newest first
//! {"event": "older_page_loaded", "calls": [ ... ]}
//! {"event": "navigate", "call_id": "65f0c1"}
//! {"event": "playback_ended"}
//! ```

use crate::error::{ListenerError, Result};
use scanner_playback::SessionEvent;
use std::path::Path;

/// Parse script text
pub fn parse(text: &str) -> Result<Vec<SessionEvent>> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|e| ListenerError::Script {
            line: index + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Read and parse a script file
pub async fn load(path: &Path) -> Result<Vec<SessionEvent>> {
    let text = tokio::fs::read_to_string(path).await?;
    let events = parse(&text)?;
    tracing::info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
