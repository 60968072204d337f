//! Scanner Player - Call Sequencing
//!
//! Decides what plays next in a live list of radio calls that grows from both
//! ends: older pages load as the listener scrolls, new calls arrive over a push
//! channel.
//!
//! This crate provides:
//! - Ordered, deduplicated call collection with adjacency lookups
//! - Autoplay decision engine (pure transitions + stateful wrapper)
//! - Silence filler fallback to keep background sessions awake
//! - Selection reconciliation for deep links and live pushes
//! - Pagination trigger from sentinel visibility
//!
//! # Architecture
//!
//! `scanner-playback` renders no audio and fetches nothing. Audio output is a
//! [`PlaybackSurface`] implementation; fetching pages and receiving pushes are
//! the host's job, reported to a [`Session`] as [`SessionEvent`]s.
//!
//! # Example: Autoplay through a page
//!
//! ```rust
//! use scanner_playback::{
//!     EngineConfig, PlaybackStatus, RecordingSurface, Session, SessionEvent,
//! };
//! use scanner_core::{Call, CallId, TalkgroupId};
//! use chrono::{TimeZone, Utc};
//!
//! let call = |id: &str, secs: i64| {
//!     Call::new(
//!         CallId::new(id),
//!         Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
//!         TalkgroupId::new(4021),
//!         format!("https://media.example.org/{}.m4a", id),
//!     )
//! };
//!
//! let config = EngineConfig {
//!     background_keep_alive: false,
//!     ..EngineConfig::default()
//! };
//! let mut session = Session::new(config, RecordingSurface::new());
//!
//! session.dispatch(SessionEvent::OlderPageLoaded {
//!     calls: vec![call("c3", 30), call("c2", 20), call("c1", 10)],
//! }).unwrap();
//! session.dispatch(SessionEvent::Navigate { call_id: CallId::new("c3") }).unwrap();
//! session.dispatch(SessionEvent::PlaybackEnded).unwrap();
//! session.dispatch(SessionEvent::PlaybackEnded).unwrap();
//! session.dispatch(SessionEvent::PlaybackEnded).unwrap();
//!
//! assert_eq!(session.surface().played_ids(), vec!["c3", "c2", "c1"]);
//! assert_eq!(session.engine().status(), PlaybackStatus::Idle);
//! ```

mod collection;
mod engine;
mod error;
mod events;
mod pagination;
mod selection;
mod session;
mod surface;
pub mod types;

// Public exports
pub use collection::{CallCollection, CallSource};
pub use engine::{transition, AutoplayEngine, Command, EngineEvent, PlaybackState, Transition};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use pagination::{BoundarySignals, PageRequest, PaginationTrigger};
pub use selection::{IgnoreReason, SelectionOrigin, SelectionRequest};
pub use session::{Session, SessionEvent};
pub use surface::{PlaybackSurface, RecordingSurface, SurfaceRequest};
pub use types::{EngineConfig, PlaybackStatus, SilenceToken};
