//! Integration tests for listening sessions
//!
//! Drives a `Session` the way a client does: pages arrive, pushes arrive,
//! the surface reports back, and the listener scrolls.

use chrono::{TimeZone, Utc};
use scanner_core::{Call, CallId, TalkgroupId};
use scanner_playback::{
    EngineConfig, IgnoreReason, PageRequest, PlaybackStatus, PlayerEvent, RecordingSurface,
    SelectionOrigin, Session, SessionEvent, SilenceToken, SurfaceRequest,
};

// ===== Test Helpers =====

fn call(id: &str, secs: i64) -> Call {
    Call::new(
        CallId::new(id),
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        TalkgroupId::new(4021),
        format!("https://media.example.org/{}.m4a", id),
    )
}

fn loaded_session(keep_alive: bool) -> Session<RecordingSurface> {
    let mut session = Session::new(
        EngineConfig {
            autoplay_enabled: true,
            background_keep_alive: keep_alive,
        },
        RecordingSurface::new(),
    );
    session
        .dispatch(SessionEvent::OlderPageLoaded {
            calls: vec![call("c3", 30), call("c2", 20), call("c1", 10)],
        })
        .unwrap();
    session
}

fn ended(session: &mut Session<RecordingSurface>) {
    session.dispatch(SessionEvent::PlaybackEnded).unwrap();
}

// ===== Tests =====

#[test]
fn live_push_starts_idle_session() {
    let mut session = loaded_session(true);

    session
        .dispatch(SessionEvent::CallPushed {
            call: call("c4", 40),
        })
        .unwrap();

    assert_eq!(session.surface().played_ids(), vec!["c4"]);
    assert_eq!(session.selected_call().unwrap().id.as_str(), "c4");
    assert_eq!(session.calls().len(), 4);
    assert!(session.calls().is_played(&CallId::new("c4")));
}

#[test]
fn live_pushes_queue_behind_playing_call() {
    let mut session = loaded_session(false);
    session
        .dispatch(SessionEvent::Navigate {
            call_id: CallId::new("c1"),
        })
        .unwrap();
    session.drain_events();

    session
        .dispatch(SessionEvent::CallPushed {
            call: call("c4", 40),
        })
        .unwrap();
    assert_eq!(session.surface().played_ids(), vec!["c1"]);
    assert_eq!(
        session.drain_events(),
        vec![PlayerEvent::SelectionIgnored {
            call_id: CallId::new("c4"),
            origin: SelectionOrigin::Push,
            reason: IgnoreReason::Busy,
        }]
    );

    // c1 is the oldest; nothing older, no keep-alive
    ended(&mut session);
    assert_eq!(session.engine().status(), PlaybackStatus::Idle);

    // The next live call plays right away
    session
        .dispatch(SessionEvent::CallPushed {
            call: call("c5", 50),
        })
        .unwrap();
    assert_eq!(session.surface().played_ids(), vec!["c1", "c5"]);
}

#[test]
fn silence_keeps_session_alive_until_next_push() {
    let mut session = loaded_session(true);
    session
        .dispatch(SessionEvent::Navigate {
            call_id: CallId::new("c3"),
        })
        .unwrap();

    ended(&mut session);
    ended(&mut session);
    ended(&mut session);
    ended(&mut session);

    let requests = session.surface().requests();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[3], SurfaceRequest::Silence(SilenceToken(1)));
    assert_eq!(requests[4], SurfaceRequest::Silence(SilenceToken(2)));
    assert_eq!(session.engine().status(), PlaybackStatus::PlayingSilence);

    session
        .dispatch(SessionEvent::CallPushed {
            call: call("c4", 40),
        })
        .unwrap();
    assert_eq!(
        session.surface().last(),
        Some(&SurfaceRequest::Call(call("c4", 40)))
    );
    assert_eq!(session.engine().status(), PlaybackStatus::Playing);
}

#[test]
fn notification_before_record_is_dropped_until_resignaled() {
    let mut session = loaded_session(true);

    session
        .dispatch(SessionEvent::PushNotified {
            call_id: CallId::new("c4"),
        })
        .unwrap();
    assert!(session.surface().requests().is_empty());

    session
        .dispatch(SessionEvent::NewerPageLoaded {
            calls: vec![call("c4", 40)],
        })
        .unwrap();
    // Merging alone does not re-signal a push
    assert!(session.surface().requests().is_empty());

    session
        .dispatch(SessionEvent::PushNotified {
            call_id: CallId::new("c4"),
        })
        .unwrap();
    assert_eq!(session.surface().played_ids(), vec!["c4"]);
}

#[test]
fn toggled_autoplay_requires_manual_play() {
    let mut session = loaded_session(true);
    session.dispatch(SessionEvent::ToggleAutoplay).unwrap();
    assert!(!session.engine().autoplay_enabled());

    session
        .dispatch(SessionEvent::CallPushed {
            call: call("c4", 40),
        })
        .unwrap();
    assert!(session.surface().requests().is_empty());

    session
        .dispatch(SessionEvent::PlayCall {
            call_id: CallId::new("c2"),
        })
        .unwrap();
    ended(&mut session);

    assert_eq!(session.surface().played_ids(), vec!["c2"]);
    assert_eq!(session.engine().status(), PlaybackStatus::Idle);
}

#[test]
fn keep_alive_preference_can_change_mid_session() {
    let mut session = loaded_session(true);
    session
        .dispatch(SessionEvent::SetBackgroundKeepAlive { enabled: false })
        .unwrap();
    session
        .dispatch(SessionEvent::Navigate {
            call_id: CallId::new("c1"),
        })
        .unwrap();

    ended(&mut session);
    assert_eq!(session.engine().status(), PlaybackStatus::Idle);
    assert_eq!(session.engine().silence_count(), 0);
}

#[test]
fn scrolling_requests_pages_and_feeds_autoplay() {
    let mut session = loaded_session(false);
    session
        .dispatch(SessionEvent::Navigate {
            call_id: CallId::new("c2"),
        })
        .unwrap();

    let requests = session
        .dispatch(SessionEvent::Boundary {
            near_oldest: true,
            near_newest: false,
        })
        .unwrap();
    assert_eq!(
        requests,
        vec![PageRequest::Older {
            before: call("c1", 10).time
        }]
    );

    // Fetcher answers with the next older page
    session
        .dispatch(SessionEvent::OlderPageLoaded {
            calls: vec![call("c0", 5)],
        })
        .unwrap();

    ended(&mut session);
    ended(&mut session);
    ended(&mut session);

    assert_eq!(session.surface().played_ids(), vec!["c2", "c1", "c0"]);
    assert_eq!(session.engine().status(), PlaybackStatus::Idle);
}

#[test]
fn pause_reported_by_surface_lets_live_call_in() {
    let mut session = loaded_session(true);
    session
        .dispatch(SessionEvent::Navigate {
            call_id: CallId::new("c3"),
        })
        .unwrap();

    session
        .dispatch(SessionEvent::PlayStateChanged { playing: false })
        .unwrap();
    session
        .dispatch(SessionEvent::PlayStateChanged { playing: false })
        .unwrap();
    assert_eq!(session.engine().status(), PlaybackStatus::Idle);

    session
        .dispatch(SessionEvent::CallPushed {
            call: call("c4", 40),
        })
        .unwrap();
    assert_eq!(session.surface().played_ids(), vec!["c3", "c4"]);
}
