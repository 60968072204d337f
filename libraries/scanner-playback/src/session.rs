//! Listening session
//!
//! Wires the collection, the pagination trigger, the autoplay engine and a
//! playback surface behind a single `dispatch` entry point. All mutation goes
//! through `dispatch`, so the host only has to serialize calls to it (one
//! event loop task, one UI thread).

use crate::{
    collection::{CallCollection, CallSource},
    engine::{AutoplayEngine, Command},
    error::Result,
    events::PlayerEvent,
    pagination::{BoundarySignals, PageRequest, PaginationTrigger},
    selection::SelectionRequest,
    surface::PlaybackSurface,
    types::EngineConfig,
};
use scanner_core::{Call, CallId};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A page of older calls arrived
    OlderPageLoaded { calls: Vec<Call> },

    /// A page of newer calls arrived
    NewerPageLoaded { calls: Vec<Call> },

    /// The push channel delivered a new call
    CallPushed { call: Call },

    /// The push channel announced an id whose record is not merged yet
    PushNotified { call_id: CallId },

    /// Navigation to a call link
    Navigate { call_id: CallId },

    /// User clicked a call in the list
    PlayCall { call_id: CallId },

    /// The surface finished the active item
    PlaybackEnded,

    /// The surface's actual play/pause state
    PlayStateChanged { playing: bool },

    SetAutoplay { enabled: bool },

    ToggleAutoplay,

    SetBackgroundKeepAlive { enabled: bool },

    /// Sentinel visibility changed
    Boundary {
        near_oldest: bool,
        near_newest: bool,
    },
}

/// A running listening session
pub struct Session<S: PlaybackSurface> {
    calls: CallCollection,
    engine: AutoplayEngine,
    trigger: PaginationTrigger,
    surface: S,
    /// Deep-link target whose record has not been loaded yet
    pending_target: Option<CallId>,
}

impl<S: PlaybackSurface> Session<S> {
    pub fn new(config: EngineConfig, surface: S) -> Self {
        Self {
            calls: CallCollection::new(),
            engine: AutoplayEngine::new(config),
            trigger: PaginationTrigger::new(),
            surface,
            pending_target: None,
        }
    }

    /// Handle one event
    ///
    /// Returns the page fetches the host should issue. Fails only when a
    /// loaded or pushed batch is rejected; the session is unchanged then.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Vec<PageRequest>> {
        match event {
            SessionEvent::OlderPageLoaded { calls } => {
                let added = self.calls.append_older(calls)?;
                tracing::debug!("Merged {} older calls ({} total)", added, self.calls.len());
                self.retry_pending_target();
            }
            SessionEvent::NewerPageLoaded { calls } => {
                let added = self.calls.prepend_newer(calls)?;
                tracing::debug!("Merged {} newer calls ({} total)", added, self.calls.len());
                self.retry_pending_target();
            }
            SessionEvent::CallPushed { call } => {
                let id = call.id.clone();
                self.calls.push(call)?;
                self.retry_pending_target();
                self.offer(SelectionRequest::push(id));
            }
            SessionEvent::PushNotified { call_id } => {
                self.offer(SelectionRequest::push(call_id));
            }
            SessionEvent::Navigate { call_id } => {
                self.pending_target = None;
                if !self.calls.contains(&call_id) {
                    tracing::debug!("Link target {} not loaded yet, holding", call_id);
                    self.pending_target = Some(call_id.clone());
                }
                self.offer(SelectionRequest::deep_link(call_id));
            }
            SessionEvent::PlayCall { call_id } => {
                let commands = self.engine.select_manual(call_id, &self.calls);
                self.apply(commands);
            }
            SessionEvent::PlaybackEnded => {
                let commands = self.engine.on_playback_ended(&self.calls);
                self.apply(commands);
            }
            SessionEvent::PlayStateChanged { playing } => {
                self.engine.on_playback_state_changed(playing);
            }
            SessionEvent::SetAutoplay { enabled } => self.engine.set_autoplay(enabled),
            SessionEvent::ToggleAutoplay => self.engine.toggle_autoplay(),
            SessionEvent::SetBackgroundKeepAlive { enabled } => {
                self.engine.set_background_keep_alive(enabled);
            }
            SessionEvent::Boundary {
                near_oldest,
                near_newest,
            } => {
                let signals = BoundarySignals {
                    near_oldest,
                    near_newest,
                };
                return Ok(self.trigger.update(signals, &self.calls));
            }
        }
        Ok(Vec::new())
    }

    pub fn calls(&self) -> &CallCollection {
        &self.calls
    }

    pub fn engine(&self) -> &AutoplayEngine {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The selected call record, if any
    pub fn selected_call(&self) -> Option<&Call> {
        self.engine
            .selected_call_id()
            .and_then(|id| self.calls.record_for(id))
    }

    pub fn pending_target(&self) -> Option<&CallId> {
        self.pending_target.as_ref()
    }

    /// Take all queued player events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.engine.drain_events()
    }

    fn offer(&mut self, request: SelectionRequest) {
        let commands = self.engine.select_external(request, &self.calls);
        self.apply(commands);
    }

    fn retry_pending_target(&mut self) {
        let Some(target) = self.pending_target.take() else {
            return;
        };
        if self.calls.contains(&target) {
            tracing::debug!("Link target {} arrived, offering it again", target);
            self.offer(SelectionRequest::deep_link(target));
        } else {
            self.pending_target = Some(target);
        }
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Play(call) => self.surface.play(&call),
                Command::PlaySilence(token) => self.surface.play_silence_filler(token),
                Command::MarkPlayed(id) => {
                    if !self.calls.mark_played(&id) {
                        tracing::warn!("Played call {} is not in the collection", id);
                    }
                }
            }
        }
    }
}
