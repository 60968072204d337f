//! Autoplay decision engine - core orchestration
//!
//! Decides which call plays next, whether playback continues unattended, and
//! when to fall back to silence filler. The decision logic is a pure
//! [`transition`] over an explicit [`PlaybackState`]; [`AutoplayEngine`] owns
//! the state value and queues [`PlayerEvent`]s for the UI.

use crate::{
    collection::CallSource,
    events::PlayerEvent,
    selection::{IgnoreReason, SelectionRequest},
    types::{EngineConfig, PlaybackStatus, SilenceToken},
};
use scanner_core::{Call, CallId};

/// Playback state owned by the engine
///
/// Invariant: `is_playing` implies a call is selected or silence is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    selected_call_id: Option<CallId>,
    is_playing: bool,
    autoplay_enabled: bool,
    silence_count: u64,
    silence_active: bool,
    consumed_external: Option<CallId>,
}

impl PlaybackState {
    /// Initial idle state
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            selected_call_id: None,
            is_playing: false,
            autoplay_enabled: config.autoplay_enabled,
            silence_count: 0,
            silence_active: false,
            consumed_external: None,
        }
    }

    pub fn selected_call_id(&self) -> Option<&CallId> {
        self.selected_call_id.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay_enabled
    }

    pub fn silence_count(&self) -> u64 {
        self.silence_count
    }

    /// Coarse state derived from the flags
    pub fn status(&self) -> PlaybackStatus {
        if !self.is_playing {
            PlaybackStatus::Idle
        } else if self.silence_active {
            PlaybackStatus::PlayingSilence
        } else {
            PlaybackStatus::Playing
        }
    }

    /// Whether a real call (not filler) is playing
    fn is_playing_content(&self) -> bool {
        self.is_playing && !self.silence_active
    }
}

/// Input to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Deep link or live push asks for a call
    SelectExternal(SelectionRequest),

    /// User picked a call from the list
    SelectManual(CallId),

    /// The surface finished the active item
    PlaybackEnded,

    /// The surface reports its actual play/pause state
    PlaybackStateChanged(bool),

    /// User toggled autoplay
    SetAutoplay(bool),
}

/// Instruction for the host, applied in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start playing this call
    Play(Call),

    /// Start a silence filler
    PlaySilence(SilenceToken),

    /// Record the call as played in the collection
    MarkPlayed(CallId),
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PlaybackState,
    pub commands: Vec<Command>,
    /// Set when an external selection was dropped
    pub ignored: Option<IgnoreReason>,
}

impl Transition {
    fn unchanged(state: &PlaybackState) -> Self {
        Self {
            state: state.clone(),
            commands: Vec::new(),
            ignored: None,
        }
    }

    fn ignore(state: &PlaybackState, reason: IgnoreReason) -> Self {
        Self {
            ignored: Some(reason),
            ..Self::unchanged(state)
        }
    }
}

/// Compute the next state and the commands to execute
///
/// Reads `calls` at decision time and never keeps positions between calls, so
/// growth of the collection at either end between events is always seen.
pub fn transition(
    state: &PlaybackState,
    event: &EngineEvent,
    calls: &impl CallSource,
    config: &EngineConfig,
) -> Transition {
    match event {
        EngineEvent::SelectExternal(request) => select_external(state, request, calls),
        EngineEvent::SelectManual(call_id) => match calls.record_for(call_id) {
            Some(call) => start_call(state, call),
            None => {
                tracing::debug!("Ignoring manual selection of unknown call {}", call_id);
                Transition::unchanged(state)
            }
        },
        EngineEvent::PlaybackEnded => playback_ended(state, calls, config),
        EngineEvent::PlaybackStateChanged(playing) => playback_state_changed(state, *playing),
        EngineEvent::SetAutoplay(enabled) => set_autoplay(state, *enabled),
    }
}

fn select_external(
    state: &PlaybackState,
    request: &SelectionRequest,
    calls: &impl CallSource,
) -> Transition {
    let call_id = &request.call_id;

    if state.consumed_external.as_ref() == Some(call_id) {
        return Transition::ignore(state, IgnoreReason::AlreadyConsumed);
    }
    if !state.autoplay_enabled {
        return Transition::ignore(state, IgnoreReason::AutoplayDisabled);
    }
    // Filler does not count as playing something
    if state.is_playing_content() {
        tracing::debug!(
            "Not selecting {} call {}: {:?} is playing",
            request.origin,
            call_id,
            state.selected_call_id
        );
        return Transition::ignore(state, IgnoreReason::Busy);
    }
    let Some(call) = calls.record_for(call_id) else {
        // The record may not be merged yet
        tracing::debug!("Ignoring {} selection of unknown call {}", request.origin, call_id);
        return Transition::ignore(state, IgnoreReason::UnknownCall);
    };

    tracing::debug!("Playing selected {} call {} ({})", request.origin, call.id, call.time);
    let mut t = start_call(state, call);
    t.state.consumed_external = Some(call_id.clone());
    t
}

fn playback_ended(
    state: &PlaybackState,
    calls: &impl CallSource,
    config: &EngineConfig,
) -> Transition {
    let Some(current) = state.selected_call_id.as_ref() else {
        tracing::warn!("Playback ended with no call selected, ignoring");
        return Transition::unchanged(state);
    };

    if !state.autoplay_enabled {
        tracing::debug!("Not advancing past {}: autoplay is off", current);
        return stop(state);
    }

    if calls.position_of(current).is_none() {
        tracing::warn!("Selected call {} is missing from the collection", current);
    }

    if let Some(older) = calls.older_than(current) {
        tracing::debug!("Autoplaying {} after {}", older.id, current);
        return start_call(state, older);
    }

    if config.background_keep_alive {
        let mut next = state.clone();
        next.silence_count += 1;
        next.silence_active = true;
        next.is_playing = true;
        let token = SilenceToken(next.silence_count);
        tracing::debug!("Queue exhausted after {}, playing {}", current, token);
        return Transition {
            state: next,
            commands: vec![Command::PlaySilence(token)],
            ignored: None,
        };
    }

    tracing::debug!("Queue exhausted after {}, stopping", current);
    stop(state)
}

fn playback_state_changed(state: &PlaybackState, playing: bool) -> Transition {
    if state.is_playing == playing {
        return Transition::unchanged(state);
    }
    if playing && state.selected_call_id.is_none() && !state.silence_active {
        tracing::warn!("Surface reports playing with nothing selected, ignoring");
        return Transition::unchanged(state);
    }
    let mut next = state.clone();
    next.is_playing = playing;
    Transition::unchanged(&next)
}

fn set_autoplay(state: &PlaybackState, enabled: bool) -> Transition {
    let mut next = state.clone();
    next.autoplay_enabled = enabled;
    Transition::unchanged(&next)
}

fn start_call(state: &PlaybackState, call: &Call) -> Transition {
    let mut next = state.clone();
    next.selected_call_id = Some(call.id.clone());
    next.is_playing = true;
    next.silence_active = false;
    Transition {
        state: next,
        commands: vec![Command::Play(call.clone()), Command::MarkPlayed(call.id.clone())],
        ignored: None,
    }
}

fn stop(state: &PlaybackState) -> Transition {
    let mut next = state.clone();
    next.is_playing = false;
    next.silence_active = false;
    Transition::unchanged(&next)
}

/// Stateful wrapper around [`transition`]
///
/// Owns the playback state and configuration, and records a [`PlayerEvent`]
/// for every observable change.
pub struct AutoplayEngine {
    state: PlaybackState,
    config: EngineConfig,
    pending_events: Vec<PlayerEvent>,
}

impl AutoplayEngine {
    /// Create an idle engine
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: PlaybackState::new(&config),
            config,
            pending_events: Vec::new(),
        }
    }

    // ===== Inputs =====

    /// Apply one event and return the commands the host must execute
    pub fn handle(&mut self, event: EngineEvent, calls: &impl CallSource) -> Vec<Command> {
        let t = transition(&self.state, &event, calls, &self.config);
        self.apply(&event, t)
    }

    /// Deep link or live push asks for a call
    pub fn select_external(
        &mut self,
        request: SelectionRequest,
        calls: &impl CallSource,
    ) -> Vec<Command> {
        self.handle(EngineEvent::SelectExternal(request), calls)
    }

    /// User clicked a call in the list
    pub fn select_manual(&mut self, call_id: CallId, calls: &impl CallSource) -> Vec<Command> {
        self.handle(EngineEvent::SelectManual(call_id), calls)
    }

    /// The surface finished the active item
    pub fn on_playback_ended(&mut self, calls: &impl CallSource) -> Vec<Command> {
        self.handle(EngineEvent::PlaybackEnded, calls)
    }

    /// Mirror the surface's play/pause state
    pub fn on_playback_state_changed(&mut self, playing: bool) {
        let t = playback_state_changed(&self.state, playing);
        self.apply(&EngineEvent::PlaybackStateChanged(playing), t);
    }

    /// Switch autoplay on or off; current playback is unaffected
    pub fn set_autoplay(&mut self, enabled: bool) {
        let t = set_autoplay(&self.state, enabled);
        self.apply(&EngineEvent::SetAutoplay(enabled), t);
    }

    /// Flip autoplay
    pub fn toggle_autoplay(&mut self) {
        self.set_autoplay(!self.state.autoplay_enabled);
    }

    /// Change the keep-alive preference
    pub fn set_background_keep_alive(&mut self, enabled: bool) {
        self.config.background_keep_alive = enabled;
    }

    // ===== State Queries =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status()
    }

    pub fn selected_call_id(&self) -> Option<&CallId> {
        self.state.selected_call_id()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.state.autoplay_enabled()
    }

    pub fn silence_count(&self) -> u64 {
        self.state.silence_count()
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn apply(&mut self, event: &EngineEvent, t: Transition) -> Vec<Command> {
        self.record(event, &t);
        self.state = t.state;
        t.commands
    }

    fn record(&mut self, event: &EngineEvent, t: &Transition) {
        let before = &self.state;
        let after = &t.state;

        if let (Some(reason), EngineEvent::SelectExternal(request)) = (t.ignored, event) {
            self.pending_events.push(PlayerEvent::SelectionIgnored {
                call_id: request.call_id.clone(),
                origin: request.origin,
                reason,
            });
        }

        for command in &t.commands {
            match command {
                Command::Play(call) => self.pending_events.push(PlayerEvent::CallStarted {
                    call_id: call.id.clone(),
                    previous_call_id: before.selected_call_id.clone(),
                }),
                Command::PlaySilence(token) => self
                    .pending_events
                    .push(PlayerEvent::SilenceStarted { token: *token }),
                Command::MarkPlayed(_) => {}
            }
        }

        if before.autoplay_enabled != after.autoplay_enabled {
            self.pending_events.push(PlayerEvent::AutoplayChanged {
                enabled: after.autoplay_enabled,
            });
        }

        if before.status() != after.status() {
            self.pending_events.push(PlayerEvent::StatusChanged {
                status: after.status(),
            });
        }
    }
}

impl Default for AutoplayEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CallCollection;
    use chrono::{TimeZone, Utc};
    use scanner_core::TalkgroupId;

    fn call(id: &str, secs: i64) -> Call {
        Call::new(
            CallId::new(id),
            Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            TalkgroupId::new(4021),
            format!("https://media.example.org/{}.m4a", id),
        )
    }

    fn three_calls() -> CallCollection {
        let mut c = CallCollection::new();
        c.append_older(vec![call("c3", 30), call("c2", 20), call("c1", 10)])
            .unwrap();
        c
    }

    fn played_ids(commands: &[Command]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Play(call) => Some(call.id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn create_engine() {
        let engine = AutoplayEngine::default();
        assert_eq!(engine.status(), PlaybackStatus::Idle);
        assert!(engine.autoplay_enabled());
        assert!(engine.selected_call_id().is_none());
        assert_eq!(engine.silence_count(), 0);
    }

    #[test]
    fn transition_is_pure() {
        let calls = three_calls();
        let config = EngineConfig::default();
        let state = PlaybackState::new(&config);

        let event = EngineEvent::SelectExternal(SelectionRequest::deep_link("c2"));
        let a = transition(&state, &event, &calls, &config);
        let b = transition(&state, &event, &calls, &config);

        assert_eq!(a, b);
        assert_eq!(state.status(), PlaybackStatus::Idle);
        assert_eq!(a.state.status(), PlaybackStatus::Playing);
        assert_eq!(
            a.commands,
            vec![
                Command::Play(call("c2", 20)),
                Command::MarkPlayed(CallId::new("c2"))
            ]
        );
    }

    #[test]
    fn engine_setters_match_transition() {
        let calls = three_calls();
        let config = EngineConfig::default();
        let mut engine = AutoplayEngine::new(config.clone());
        engine.select_external(SelectionRequest::deep_link("c3"), &calls);

        let expected = transition(
            engine.state(),
            &EngineEvent::SetAutoplay(false),
            &calls,
            &config,
        );
        engine.set_autoplay(false);
        assert_eq!(engine.state(), &expected.state);
        assert!(!engine.autoplay_enabled());

        let expected = transition(
            engine.state(),
            &EngineEvent::PlaybackStateChanged(false),
            &calls,
            &config,
        );
        engine.on_playback_state_changed(false);
        assert_eq!(engine.state(), &expected.state);
        assert_eq!(engine.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn ended_without_selection_is_noop() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::default();

        let commands = engine.on_playback_ended(&calls);
        assert!(commands.is_empty());
        assert_eq!(engine.status(), PlaybackStatus::Idle);
        assert!(!engine.has_pending_events());
    }

    #[test]
    fn consumed_external_is_not_retriggered() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::new(EngineConfig {
            autoplay_enabled: true,
            background_keep_alive: false,
        });

        engine.select_external(SelectionRequest::deep_link("c1"), &calls);
        engine.on_playback_ended(&calls);
        assert_eq!(engine.status(), PlaybackStatus::Idle);

        let commands = engine.select_external(SelectionRequest::deep_link("c1"), &calls);
        assert!(commands.is_empty());
        assert_eq!(engine.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn unknown_then_known_selection() {
        let mut calls = three_calls();
        let mut engine = AutoplayEngine::default();

        let commands = engine.select_external(SelectionRequest::push("c4"), &calls);
        assert!(commands.is_empty());
        assert_eq!(
            engine.drain_events(),
            vec![PlayerEvent::SelectionIgnored {
                call_id: CallId::new("c4"),
                origin: crate::selection::SelectionOrigin::Push,
                reason: IgnoreReason::UnknownCall,
            }]
        );

        calls.push(call("c4", 40)).unwrap();
        let commands = engine.select_external(SelectionRequest::push("c4"), &calls);
        assert_eq!(played_ids(&commands), vec!["c4"]);
    }

    #[test]
    fn autoplay_off_rejects_external_selection() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::default();
        engine.toggle_autoplay();
        assert!(!engine.autoplay_enabled());

        let commands = engine.select_external(SelectionRequest::deep_link("c3"), &calls);
        assert!(commands.is_empty());
        assert!(engine.selected_call_id().is_none());
    }

    #[test]
    fn manual_selection_interrupts() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::default();
        engine.select_external(SelectionRequest::deep_link("c3"), &calls);
        engine.set_autoplay(false);

        let commands = engine.select_manual(CallId::new("c1"), &calls);
        assert_eq!(played_ids(&commands), vec!["c1"]);
        assert_eq!(engine.selected_call_id(), Some(&CallId::new("c1")));
    }

    #[test]
    fn pause_and_resume_are_mirrored() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::default();
        engine.select_external(SelectionRequest::deep_link("c2"), &calls);
        engine.drain_events();

        engine.on_playback_state_changed(false);
        assert_eq!(engine.status(), PlaybackStatus::Idle);
        engine.on_playback_state_changed(false);
        assert_eq!(
            engine.drain_events(),
            vec![PlayerEvent::StatusChanged {
                status: PlaybackStatus::Idle
            }]
        );

        engine.on_playback_state_changed(true);
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.selected_call_id(), Some(&CallId::new("c2")));
    }

    #[test]
    fn playing_report_without_selection_is_ignored() {
        let mut engine = AutoplayEngine::default();
        engine.on_playback_state_changed(true);
        assert!(!engine.is_playing());
    }

    #[test]
    fn silence_paused_then_resumed_stays_silence() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::default();
        engine.select_external(SelectionRequest::deep_link("c1"), &calls);
        engine.on_playback_ended(&calls);
        assert_eq!(engine.status(), PlaybackStatus::PlayingSilence);

        engine.on_playback_state_changed(false);
        assert_eq!(engine.status(), PlaybackStatus::Idle);
        engine.on_playback_state_changed(true);
        assert_eq!(engine.status(), PlaybackStatus::PlayingSilence);
    }

    #[test]
    fn events_follow_call_changes() {
        let calls = three_calls();
        let mut engine = AutoplayEngine::default();

        engine.select_external(SelectionRequest::deep_link("c3"), &calls);
        engine.on_playback_ended(&calls);

        assert_eq!(
            engine.drain_events(),
            vec![
                PlayerEvent::CallStarted {
                    call_id: CallId::new("c3"),
                    previous_call_id: None,
                },
                PlayerEvent::StatusChanged {
                    status: PlaybackStatus::Playing
                },
                PlayerEvent::CallStarted {
                    call_id: CallId::new("c2"),
                    previous_call_id: Some(CallId::new("c3")),
                },
            ]
        );
        assert!(!engine.has_pending_events());
    }
}
