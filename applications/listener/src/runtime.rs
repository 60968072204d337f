//! Session event loop
//!
//! A feeder task pushes scripted events into a channel; the session is owned
//! by the receiving side, so every event is handled to completion before the
//! next one is read.

use crate::config::SessionSettings;
use scanner_core::CallId;
use scanner_playback::{
    PageRequest, PlaybackStatus, PlaybackSurface, PlayerEvent, Session, SessionEvent,
};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

/// What happened during a run
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub events_handled: usize,
    pub events_rejected: usize,
    pub calls_played: usize,
    pub silence_count: u64,
    pub final_status: PlaybackStatus,
    pub selected_call_id: Option<CallId>,
    pub page_requests: Vec<PageRequest>,
}

/// Replay `events` through `session`
///
/// Stops early on Ctrl-C. A rejected batch is logged and skipped; the session
/// keeps going.
pub async fn run<S: PlaybackSurface>(
    session: &mut Session<S>,
    events: Vec<SessionEvent>,
    settings: &SessionSettings,
) -> SessionSummary {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                // Without a handler the run can only end when the script does
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    run_until(session, events, settings, interrupt).await
}

/// Replay `events` through `session` until the script ends or `shutdown`
/// completes, whichever comes first
pub async fn run_until<S, F>(
    session: &mut Session<S>,
    events: Vec<SessionEvent>,
    settings: &SessionSettings,
    shutdown: F,
) -> SessionSummary
where
    S: PlaybackSurface,
    F: Future<Output = ()>,
{
    let (tx, mut rx) = mpsc::channel(settings.channel_capacity.max(1));
    let delay = Duration::from_millis(settings.step_delay_ms);

    let feeder = tokio::spawn(async move {
        for event in events {
            if tx.send(event).await.is_err() {
                break;
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    });

    let mut handled = 0;
    let mut rejected = 0;
    let mut page_requests = Vec::new();
    let mut interrupted = false;
    tokio::pin!(shutdown);

    loop {
        let event = tokio::select! {
            event = rx.recv() => event,
            () = &mut shutdown => {
                tracing::info!("Interrupted, stopping session");
                interrupted = true;
                None
            }
        };
        let Some(event) = event else {
            break;
        };

        handled += 1;
        match session.dispatch(event) {
            Ok(requests) => {
                for request in &requests {
                    tracing::info!("Page request: {:?}", request);
                }
                page_requests.extend(requests);
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!("Rejected event: {}", e);
            }
        }

        for event in session.drain_events() {
            log_player_event(&event);
        }
    }

    // The feeder may be parked in a step delay
    if interrupted {
        feeder.abort();
    }
    drop(rx);
    match feeder.await {
        Err(e) if !e.is_cancelled() => tracing::warn!("Event feeder failed: {}", e),
        _ => {}
    }

    let engine = session.engine();
    SessionSummary {
        events_handled: handled,
        events_rejected: rejected,
        calls_played: session.calls().played_count(),
        silence_count: engine.silence_count(),
        final_status: engine.status(),
        selected_call_id: engine.selected_call_id().cloned(),
        page_requests,
    }
}

fn log_player_event(event: &PlayerEvent) {
    match event {
        PlayerEvent::SelectionIgnored {
            call_id,
            origin,
            reason,
        } => tracing::debug!("Ignored {} selection of {}: {:?}", origin, call_id, reason),
        PlayerEvent::StatusChanged { status } => tracing::info!("Status: {}", status),
        PlayerEvent::AutoplayChanged { enabled } => tracing::info!("Autoplay: {}", enabled),
        other => tracing::debug!("{:?}", other),
    }
}
