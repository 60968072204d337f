//! ID types for Scanner Player entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Call identifier
///
/// Opaque string assigned by the upstream recorder. Stable for the lifetime of
/// the call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(String);

impl CallId {
    /// Create a new call ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CallId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Talkgroup identifier (decimal talkgroup number on the trunked system)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalkgroupId(u32);

impl TalkgroupId {
    /// Create a new talkgroup ID
    pub fn new(num: u32) -> Self {
        Self(num)
    }

    /// Get the talkgroup number
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TalkgroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
