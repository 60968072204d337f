//! Player events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! engine as it applies transitions and drained by the host:
//! - Status changes (idle / playing / playing silence)
//! - Call changes (a new call handed to the surface)
//! - Silence filler requests
//! - Autoplay toggles
//! - External selections that were not honored

use crate::selection::{IgnoreReason, SelectionOrigin};
use crate::types::{PlaybackStatus, SilenceToken};
use scanner_core::CallId;
use serde::{Deserialize, Serialize};

/// Events emitted by the autoplay engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Coarse status changed
    StatusChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A call was handed to the playback surface
    CallStarted {
        /// ID of the call now playing
        call_id: CallId,
        /// ID of the call selected before (if any)
        previous_call_id: Option<CallId>,
    },

    /// Silence filler was requested
    SilenceStarted {
        /// Token of the filler request
        token: SilenceToken,
    },

    /// Autoplay was switched on or off
    AutoplayChanged {
        /// New autoplay flag
        enabled: bool,
    },

    /// An external selection was dropped
    SelectionIgnored {
        /// Requested call
        call_id: CallId,
        /// Who asked
        origin: SelectionOrigin,
        /// Why it was dropped
        reason: IgnoreReason,
    },
}
