//! Scanner Player Core
//!
//! Platform-agnostic call types and error handling for Scanner Player.
//!
//! This crate provides the foundational building blocks shared by the playback
//! engine and the listener application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Call`, `CallId`, `TalkgroupId`
//! - **Error Handling**: Unified `ScannerError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use scanner_core::types::{Call, CallId, TalkgroupId};
//! use chrono::{TimeZone, Utc};
//!
//! let call = Call::new(
//!     CallId::new("c-1"),
//!     Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
//!     TalkgroupId::new(4021),
//!     "https://media.example.org/c-1.m4a",
//! );
//!
//! assert_eq!(call.id.as_str(), "c-1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ScannerError};
pub use types::{Call, CallId, TalkgroupId};
