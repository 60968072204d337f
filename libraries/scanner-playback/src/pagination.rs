//! Pagination trigger
//!
//! Turns sentinel visibility at each end of the rendered list into page
//! requests. Signals are levels: a request is issued when a level rises, and a
//! level that stays high does not repeat the request.

use crate::collection::CallSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visibility levels of the two sentinels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundarySignals {
    /// The sentinel after the oldest loaded call is in view
    pub near_oldest: bool,

    /// The sentinel before the newest loaded call is in view
    pub near_newest: bool,
}

/// Fetch the pagination collaborator should issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum PageRequest {
    /// Load calls captured before `before`
    Older { before: DateTime<Utc> },

    /// Load calls captured after `after`
    Newer { after: DateTime<Utc> },
}

/// Edge detector over the two boundary levels
#[derive(Debug, Clone, Default)]
pub struct PaginationTrigger {
    last: BoundarySignals,
}

impl PaginationTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current levels
    pub fn signals(&self) -> BoundarySignals {
        self.last
    }

    /// Feed new levels; returns the fetches to issue
    ///
    /// Nothing is requested while the list is empty: the initial load owns
    /// that case.
    pub fn update(
        &mut self,
        signals: BoundarySignals,
        calls: &impl CallSource,
    ) -> Vec<PageRequest> {
        let rose_oldest = signals.near_oldest && !self.last.near_oldest;
        let rose_newest = signals.near_newest && !self.last.near_newest;
        self.last = signals;

        let mut requests = Vec::new();
        if rose_newest {
            if let Some(newest) = calls.newest() {
                tracing::debug!("Near newest boundary, requesting calls after {}", newest.id);
                requests.push(PageRequest::Newer { after: newest.time });
            }
        }
        if rose_oldest {
            if let Some(oldest) = calls.oldest() {
                tracing::debug!("Near oldest boundary, requesting calls before {}", oldest.id);
                requests.push(PageRequest::Older {
                    before: oldest.time,
                });
            }
        }
        requests
    }
}
