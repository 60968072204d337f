//! Scanner Listener Library
//!
//! Replays scripted listening sessions (page loads, live pushes, surface
//! reports) through the autoplay engine and logs every decision.
//!
//! This library exposes the components for testing purposes.

pub mod config;
pub mod error;
pub mod runtime;
pub mod script;
pub mod surface;

// Re-export commonly used types for convenience
pub use config::{ListenerConfig, SessionSettings};
pub use error::{ListenerError, Result};
pub use runtime::{run, run_until, SessionSummary};
pub use surface::LoggingSurface;
