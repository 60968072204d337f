//! Selection sources
//!
//! A deep-link target and a live push both ask the engine to select a call.
//! The engine treats them the same; the origin is carried only for logging.

use scanner_core::CallId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an external selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    /// Target id supplied at session start or on navigation
    DeepLink,

    /// Id of a call that just arrived on the push channel
    Push,
}

impl fmt::Display for SelectionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeepLink => f.write_str("deep-link"),
            Self::Push => f.write_str("push"),
        }
    }
}

/// Request to select a call from outside the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub call_id: CallId,
    pub origin: SelectionOrigin,
}

impl SelectionRequest {
    pub fn deep_link(call_id: impl Into<CallId>) -> Self {
        Self {
            call_id: call_id.into(),
            origin: SelectionOrigin::DeepLink,
        }
    }

    pub fn push(call_id: impl Into<CallId>) -> Self {
        Self {
            call_id: call_id.into(),
            origin: SelectionOrigin::Push,
        }
    }
}

/// Why an external selection was not honored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The id is not in the collection (yet)
    UnknownCall,

    /// A real call is already playing
    Busy,

    /// Autoplay is off
    AutoplayDisabled,

    /// This id was already honored once
    AlreadyConsumed,
}
