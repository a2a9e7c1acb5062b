//! Shared queue store
//!
//! Owns the pending entries, the entry currently playing, and the per-user
//! submission counters. Every mutation runs under one lock and writes a
//! snapshot to storage before the lock is released, so observers never
//! see a half-applied change.
//!
//! Counter invariant: for every user, the counter equals the number of
//! pending entries they submitted. The current entry does not count.

use crate::error::QueueRejection;
use crate::estimate::estimate_start_times;
use crate::snapshot::QueueSnapshot;
use crate::types::{Accepted, QueueConfig, Removed};
use chrono::{DateTime, Utc};
use jukebox_core::{
    storage::QUEUE_KEY, Clock, EntryId, JukeboxError, KeyValueStore, QueueEntry, TrackRef,
    UserName,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct QueueState {
    pending: Vec<QueueEntry>,
    current: Option<QueueEntry>,
    counters: BTreeMap<UserName, u32>,
}

impl QueueState {
    fn count(&self, user: &UserName) -> u32 {
        self.counters.get(user).copied().unwrap_or(0)
    }

    fn increment(&mut self, user: &UserName) {
        *self.counters.entry(user.clone()).or_insert(0) += 1;
    }

    /// Decrement, flooring at zero and dropping empty counters
    fn decrement(&mut self, user: &UserName) {
        if let Some(count) = self.counters.get_mut(user) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counters.remove(user);
            }
        }
    }

    fn contains_id(&self, id: &EntryId) -> bool {
        self.pending.iter().any(|e| &e.id == id)
            || self.current.as_ref().is_some_and(|e| &e.id == id)
    }

    fn contains_uri(&self, uri: &str) -> bool {
        self.pending.iter().any(|e| e.uri() == uri)
    }

    fn counters_from_pending(&self) -> BTreeMap<UserName, u32> {
        let mut counters = BTreeMap::new();
        for entry in &self.pending {
            *counters.entry(entry.submitted_by.clone()).or_insert(0) += 1;
        }
        counters
    }

    fn from_snapshot(snapshot: QueueSnapshot) -> Self {
        let counters = snapshot.counters();
        let mut state = Self {
            pending: snapshot.queue,
            current: snapshot.current_track,
            counters,
        };

        if let Some(current_id) = state.current.as_ref().map(|e| e.id.clone()) {
            let before = state.pending.len();
            state.pending.retain(|e| e.id != current_id);
            if state.pending.len() != before {
                warn!(id = %current_id, "Current entry was also pending, dropping the pending copy");
            }
        }

        let expected = state.counters_from_pending();
        if state.counters != expected {
            warn!(
                stored = ?state.counters,
                actual = ?expected,
                "Submission counters did not match pending entries, rebuilding"
            );
            state.counters = expected;
        }

        state
    }

    fn to_snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue: self.pending.clone(),
            current_track: self.current.clone(),
            user_songs: self
                .counters
                .iter()
                .map(|(user, count)| (user.clone(), *count))
                .collect(),
        }
    }
}

/// The shared queue
///
/// All operations are synchronous and atomic with respect to each other.
/// Share it behind an `Arc`.
pub struct QueueStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: QueueConfig,
    state: Mutex<QueueState>,
}

impl QueueStore {
    /// Create a store, restoring whatever snapshot `storage` holds
    ///
    /// An unreadable snapshot is logged and the store starts empty.
    /// Restored estimates are kept as stored; call
    /// [`refresh_estimates`](Self::refresh_estimates) before display.
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: QueueConfig) -> Self {
        let state = Self::load(storage.as_ref());

        info!(
            pending = state.pending.len(),
            has_current = state.current.is_some(),
            "Queue store ready"
        );

        Self {
            storage,
            clock,
            config,
            state: Mutex::new(state),
        }
    }

    fn load(storage: &dyn KeyValueStore) -> QueueState {
        match storage.get(QUEUE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<QueueSnapshot>(&raw) {
                Ok(snapshot) => QueueState::from_snapshot(snapshot),
                Err(e) => {
                    error!(error = %e, "Failed to parse stored queue, starting empty");
                    QueueState::default()
                }
            },
            Ok(None) => QueueState::default(),
            Err(e) => {
                error!(error = %e, "Failed to load stored queue, starting empty");
                QueueState::default()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn recompute(&self, state: &mut QueueState, now: DateTime<Utc>) {
        let has_current = state.current.is_some();
        estimate_start_times(
            &mut state.pending,
            has_current,
            now,
            self.config.track_duration(),
        );
    }

    fn persist(&self, state: &QueueState) {
        let result = serde_json::to_string(&state.to_snapshot())
            .map_err(JukeboxError::from)
            .and_then(|json| self.storage.set(QUEUE_KEY, &json));

        if let Err(e) = result {
            warn!(error = %e, "Failed to save queue to storage");
        }
    }

    /// Recompute estimates and persist; the tail of every mutation
    fn commit(&self, state: &mut QueueState) {
        self.recompute(state, self.clock.now());
        self.persist(state);
    }

    /// Store configuration
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Submit a track on behalf of `user`
    ///
    /// # Errors
    ///
    /// Rejected when the user already has `max_per_user` pending entries,
    /// or when the track's URI is already pending. Quota is checked first.
    pub fn enqueue(&self, track: TrackRef, user: &UserName) -> Result<Accepted, QueueRejection> {
        let mut state = self.lock();

        if state.count(user) >= self.config.max_per_user {
            debug!(user = %user, limit = self.config.max_per_user, "Quota reached");
            return Err(QueueRejection::QuotaExceeded {
                limit: self.config.max_per_user,
            });
        }

        if state.contains_uri(&track.uri) {
            debug!(uri = %track.uri, "Track already pending");
            return Err(QueueRejection::DuplicateTrack { uri: track.uri });
        }

        let now = self.clock.now();
        let mut entry = QueueEntry::new(track, user.clone(), now);
        while state.contains_id(&entry.id) {
            entry.id = EntryId::generate(now);
        }

        info!(id = %entry.id, user = %user, track = %entry.track.name, "Track queued");

        state.pending.push(entry);
        state.increment(user);
        self.commit(&mut state);

        let entry = state.pending[state.pending.len() - 1].clone();
        let message = format!("\"{}\" added to queue!", entry.track.name);
        Ok(Accepted { entry, message })
    }

    /// Withdraw a pending entry owned by `requester`
    ///
    /// # Errors
    ///
    /// [`QueueRejection::NotFound`] if no pending entry has `id` (the
    /// current entry is never pending), [`QueueRejection::NotOwner`] if it
    /// belongs to someone else.
    pub fn dequeue(&self, id: &EntryId, requester: &UserName) -> Result<Removed, QueueRejection> {
        let mut state = self.lock();

        let Some(index) = state.pending.iter().position(|e| &e.id == id) else {
            return Err(QueueRejection::NotFound { id: id.clone() });
        };

        if &state.pending[index].submitted_by != requester {
            debug!(id = %id, requester = %requester, "Refusing to remove another user's entry");
            return Err(QueueRejection::NotOwner { id: id.clone() });
        }

        let entry = state.pending.remove(index);
        state.decrement(&entry.submitted_by);
        self.commit(&mut state);

        info!(id = %id, user = %requester, "Track removed from queue");

        let message = format!("\"{}\" removed from queue.", entry.track.name);
        Ok(Removed { entry, message })
    }

    /// Promote the head of the pending queue to current
    ///
    /// Any previous current entry is discarded. Returns `None`, leaving
    /// the store untouched, when nothing is pending.
    pub fn pull_next(&self) -> Option<QueueEntry> {
        let mut state = self.lock();

        if state.pending.is_empty() {
            return None;
        }

        let entry = state.pending.remove(0);
        state.decrement(&entry.submitted_by);
        state.current = Some(entry.clone());
        self.commit(&mut state);

        debug!(id = %entry.id, remaining = state.pending.len(), "Pulled next entry");
        Some(entry)
    }

    /// Put a pulled entry back at the head after it failed to start
    ///
    /// Only done while `entry` is still current and the quota and
    /// duplicate rules allow it. Returns whether it was re-queued.
    pub(crate) fn requeue_front(&self, entry: &QueueEntry) -> bool {
        let mut state = self.lock();

        if state.current.as_ref().map(|e| &e.id) != Some(&entry.id) {
            return false;
        }

        if state.count(&entry.submitted_by) >= self.config.max_per_user
            || state.contains_uri(entry.uri())
        {
            warn!(id = %entry.id, "Cannot put failed entry back, keeping it current");
            return false;
        }

        state.current = None;
        state.pending.insert(0, entry.clone());
        state.increment(&entry.submitted_by);
        self.commit(&mut state);

        info!(id = %entry.id, "Failed entry returned to the head of the queue");
        true
    }

    /// Drop the current entry
    pub fn clear_current(&self) {
        let mut state = self.lock();
        if state.current.take().is_some() {
            self.commit(&mut state);
        }
    }

    /// Empty pending and counters; the current entry keeps playing
    pub fn clear_all(&self) {
        let mut state = self.lock();
        state.pending.clear();
        state.counters.clear();
        self.commit(&mut state);

        info!("Queue cleared");
    }

    /// Entry currently playing, if any
    pub fn current_entry(&self) -> Option<QueueEntry> {
        self.lock().current.clone()
    }

    pub fn has_current(&self) -> bool {
        self.lock().current.is_some()
    }

    /// URI of the current entry
    pub fn current_uri(&self) -> Option<String> {
        self.lock().current.as_ref().map(|e| e.track.uri.clone())
    }

    /// Pending entries in play order
    pub fn pending_entries(&self) -> Vec<QueueEntry> {
        self.lock().pending.clone()
    }

    /// URIs of pending entries in play order
    pub fn pending_uris(&self) -> Vec<String> {
        self.lock().pending.iter().map(|e| e.track.uri.clone()).collect()
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    /// How many more entries `user` may submit right now
    pub fn remaining_quota(&self, user: &UserName) -> u32 {
        self.config
            .max_per_user
            .saturating_sub(self.lock().count(user))
    }

    /// Pending entries submitted by `user`
    pub fn submission_count(&self, user: &UserName) -> u32 {
        self.lock().count(user)
    }

    /// All non-zero counters
    pub fn submission_counts(&self) -> BTreeMap<UserName, u32> {
        self.lock().counters.clone()
    }

    /// Recompute estimates against the current time and return the
    /// pending entries
    ///
    /// Estimates are display data; this does not write to storage.
    pub fn refresh_estimates(&self) -> Vec<QueueEntry> {
        let mut state = self.lock();
        self.recompute(&mut state, self.clock.now());
        state.pending.clone()
    }

    /// Point-in-time copy of the persisted form
    pub fn snapshot(&self) -> QueueSnapshot {
        self.lock().to_snapshot()
    }
}

impl std::fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("QueueStore")
            .field("config", &self.config)
            .field("pending", &state.pending.len())
            .field("has_current", &state.current.is_some())
            .finish_non_exhaustive()
    }
}
