//! Platform-agnostic playback surface trait
//!
//! Abstracts whatever actually renders audio (a browser media element, a
//! native player, a test recorder). The surface only executes decisions; it
//! reports back through `SessionEvent::PlaybackEnded` and
//! `SessionEvent::PlayStateChanged`.

use crate::types::SilenceToken;
use scanner_core::Call;

/// Executes "play this" requests from the engine
pub trait PlaybackSurface {
    /// Start playing a call, replacing whatever was playing
    fn play(&mut self, call: &Call);

    /// Start a short silent clip
    ///
    /// A new token must be treated as a new item even if the previous filler
    /// just finished.
    fn play_silence_filler(&mut self, token: SilenceToken);
}

/// What a [`RecordingSurface`] was asked to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceRequest {
    Call(Call),
    Silence(SilenceToken),
}

/// Surface that records every request
///
/// Used by tests and by dry runs that only care about the sequence.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    requests: Vec<SurfaceRequest>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything requested so far, oldest first
    pub fn requests(&self) -> &[SurfaceRequest] {
        &self.requests
    }

    /// Ids of the calls requested, in order
    pub fn played_ids(&self) -> Vec<&str> {
        self.requests
            .iter()
            .filter_map(|r| match r {
                SurfaceRequest::Call(call) => Some(call.id.as_str()),
                SurfaceRequest::Silence(_) => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&SurfaceRequest> {
        self.requests.last()
    }
}

impl PlaybackSurface for RecordingSurface {
    fn play(&mut self, call: &Call) {
        self.requests.push(SurfaceRequest::Call(call.clone()));
    }

    fn play_silence_filler(&mut self, token: SilenceToken) {
        self.requests.push(SurfaceRequest::Silence(token));
    }
}
