//! Call record type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CallId, TalkgroupId};
use crate::error::{Result, ScannerError};

/// A single recorded transmission
///
/// Immutable once received. Calls are ordered by capture time, newest first,
/// wherever they are listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Unique call identifier
    pub id: CallId,

    /// Capture timestamp
    pub time: DateTime<Utc>,

    /// Talkgroup the call was recorded on
    pub talkgroup: TalkgroupId,

    /// Audio locator handed to the playback surface
    pub url: String,
}

impl Call {
    /// Create a new call record
    pub fn new(
        id: CallId,
        time: DateTime<Utc>,
        talkgroup: TalkgroupId,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            time,
            talkgroup,
            url: url.into(),
        }
    }

    /// Check that the record is usable for playback
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().is_empty() {
            return Err(ScannerError::invalid_input("call id is empty"));
        }
        if self.url.trim().is_empty() {
            return Err(ScannerError::invalid_call(self.id.clone(), "empty audio url"));
        }
        Ok(())
    }

    /// Whether this call was captured after `other`
    ///
    /// Ties are broken by id so that two distinct calls never compare equal.
    pub fn is_newer_than(&self, other: &Call) -> bool {
        (self.time, &self.id) > (other.time, &other.id)
    }
}
