//! Playback surface that reports decisions through tracing
use scanner_core::{Call, CallId};
use scanner_playback::{PlaybackSurface, SilenceToken};

/// Logs every play request and remembers what is "on air"
#[derive(Debug, Default)]
pub struct LoggingSurface {
    now_playing: Option<CallId>,
    calls_played: usize,
    fillers_played: usize,
}

impl LoggingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_playing(&self) -> Option<&CallId> {
        self.now_playing.as_ref()
    }

    pub fn calls_played(&self) -> usize {
        self.calls_played
    }

    pub fn fillers_played(&self) -> usize {
        self.fillers_played
    }
}

impl PlaybackSurface for LoggingSurface {
    fn play(&mut self, call: &Call) {
        tracing::info!(
            call_id = %call.id,
            talkgroup = %call.talkgroup,
            time = %call.time.format("%H:%M:%S"),
            "Playing {}",
            call.url
        );
        self.now_playing = Some(call.id.clone());
        self.calls_played += 1;
    }

    fn play_silence_filler(&mut self, token: SilenceToken) {
        tracing::info!("Playing {}", token);
        self.now_playing = None;
        self.fillers_played += 1;
    }
}
