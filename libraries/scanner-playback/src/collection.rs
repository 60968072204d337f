//! Call collection
//!
//! Ordered, deduplicated set of calls, newest first. Grows from both ends:
//! older pages extend the tail, live pushes and newer pages extend the head.

use crate::error::{PlaybackError, Result};
use scanner_core::{Call, CallId};
use std::collections::{HashMap, HashSet};

/// Read-only view of an ordered call list
///
/// This is everything the decision engine needs from the collection. Callers
/// must not cache positions across events: the list can grow at either end
/// between two reads.
pub trait CallSource {
    /// All known call ids, newest first
    fn ids_newest_first(&self) -> &[CallId];

    /// Look up a call record by id
    fn record_for(&self, id: &CallId) -> Option<&Call>;

    /// Position of `id` in newest-first order
    fn position_of(&self, id: &CallId) -> Option<usize> {
        self.ids_newest_first().iter().position(|c| c == id)
    }

    /// The call immediately after `id` when walking newest to oldest
    fn older_than(&self, id: &CallId) -> Option<&Call> {
        let pos = self.position_of(id)?;
        let next = self.ids_newest_first().get(pos + 1)?;
        self.record_for(next)
    }

    /// The call immediately before `id` when walking newest to oldest
    fn newer_than(&self, id: &CallId) -> Option<&Call> {
        let pos = self.position_of(id)?;
        let prev = self.ids_newest_first().get(pos.checked_sub(1)?)?;
        self.record_for(prev)
    }

    /// Newest loaded call
    fn newest(&self) -> Option<&Call> {
        self.ids_newest_first()
            .first()
            .and_then(|id| self.record_for(id))
    }

    /// Oldest loaded call
    fn oldest(&self) -> Option<&Call> {
        self.ids_newest_first()
            .last()
            .and_then(|id| self.record_for(id))
    }
}

/// Append-only call store
///
/// Structure:
/// ```text
///   head ── newest (live pushes land here)
///     C5
///     C4
///     C3
///   tail ── oldest (older pages land here)
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCollection {
    /// Ids ordered by descending (time, id)
    ids: Vec<CallId>,

    /// Records by id
    entities: HashMap<CallId, Call>,

    /// Calls that have been handed to the playback surface
    played: HashSet<CallId>,
}

impl CallCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls loaded
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is known
    pub fn contains(&self, id: &CallId) -> bool {
        self.entities.contains_key(id)
    }

    /// Merge a page of older calls (tail side)
    ///
    /// Returns the number of calls actually added.
    pub fn append_older(&mut self, calls: Vec<Call>) -> Result<usize> {
        self.merge(calls)
    }

    /// Merge a page of newer calls (head side)
    ///
    /// Returns the number of calls actually added.
    pub fn prepend_newer(&mut self, calls: Vec<Call>) -> Result<usize> {
        self.merge(calls)
    }

    /// Merge a single live-pushed call
    ///
    /// Returns `true` if the call was new.
    pub fn push(&mut self, call: Call) -> Result<bool> {
        Ok(self.merge(vec![call])? == 1)
    }

    /// Record that a call was played
    ///
    /// Returns `false` if the call is unknown.
    pub fn mark_played(&mut self, id: &CallId) -> bool {
        if !self.entities.contains_key(id) {
            return false;
        }
        self.played.insert(id.clone());
        true
    }

    /// Whether a call has been played this session
    pub fn is_played(&self, id: &CallId) -> bool {
        self.played.contains(id)
    }

    /// Number of distinct calls played this session
    pub fn played_count(&self) -> usize {
        self.played.len()
    }

    /// Validate the whole batch, then insert each new call at its ordered
    /// position. Nothing is inserted if any record is rejected.
    fn merge(&mut self, calls: Vec<Call>) -> Result<usize> {
        let mut fresh: Vec<Call> = Vec::with_capacity(calls.len());
        for call in calls {
            call.validate()?;
            if let Some(existing) = self.entities.get(&call.id) {
                if *existing != call {
                    return Err(PlaybackError::ConflictingRecord(call.id));
                }
                continue;
            }
            if let Some(dup) = fresh.iter().find(|c| c.id == call.id) {
                if *dup != call {
                    return Err(PlaybackError::ConflictingRecord(call.id));
                }
                continue;
            }
            fresh.push(call);
        }

        let added = fresh.len();
        for call in fresh {
            self.insert_ordered(call);
        }
        Ok(added)
    }

    fn insert_ordered(&mut self, call: Call) {
        let entities = &self.entities;
        let pos = self.ids.partition_point(|id| {
            entities
                .get(id)
                .is_some_and(|existing| existing.is_newer_than(&call))
        });
        self.ids.insert(pos, call.id.clone());
        self.entities.insert(call.id.clone(), call);
    }
}

impl CallSource for CallCollection {
    fn ids_newest_first(&self) -> &[CallId] {
        &self.ids
    }

    fn record_for(&self, id: &CallId) -> Option<&Call> {
        self.entities.get(id)
    }
}
