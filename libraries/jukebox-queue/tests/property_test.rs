//! Property-based tests for the queue store
//!
//! Drives random operation sequences and checks the invariants after every
//! step.

use chrono::{Duration, TimeZone, Utc};
use jukebox_core::{Clock, EntryId, ManualClock, TrackRef, UserName};
use jukebox_queue::{QueueConfig, QueueStore};
use jukebox_storage::MemoryStore;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Enqueue { user: usize, track: usize },
    Dequeue { requester: usize, index: usize },
    DequeueUnknown { requester: usize },
    PullNext,
    ClearCurrent,
    ClearAll,
    Advance { minutes: i64 },
}

const USERS: [&str; 3] = ["alice", "bob", "carol"];

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..USERS.len(), 0usize..8).prop_map(|(user, track)| Op::Enqueue { user, track }),
        3 => (0..USERS.len(), 0usize..10).prop_map(|(requester, index)| Op::Dequeue { requester, index }),
        1 => (0..USERS.len()).prop_map(|requester| Op::DequeueUnknown { requester }),
        3 => Just(Op::PullNext),
        1 => Just(Op::ClearCurrent),
        1 => Just(Op::ClearAll),
        1 => (0i64..30).prop_map(|minutes| Op::Advance { minutes }),
    ]
}

fn user(index: usize) -> UserName {
    UserName::parse(USERS[index]).unwrap()
}

fn track(index: usize) -> TrackRef {
    TrackRef::new(format!("spotify:track:{index}"), format!("Song {index}"))
}

fn assert_invariants(store: &QueueStore, clock: &ManualClock) -> Result<(), TestCaseError> {
    let pending = store.pending_entries();

    // Counter invariant
    let mut expected: BTreeMap<UserName, u32> = BTreeMap::new();
    for entry in &pending {
        *expected.entry(entry.submitted_by.clone()).or_insert(0) += 1;
    }
    prop_assert_eq!(store.submission_counts(), expected.clone());

    // Quota
    for count in expected.values() {
        prop_assert!(*count <= 3, "Counter exceeded quota: {}", count);
    }

    // Id uniqueness across pending and current
    let mut ids: HashSet<EntryId> = pending.iter().map(|e| e.id.clone()).collect();
    prop_assert_eq!(ids.len(), pending.len());
    if let Some(current) = store.current_entry() {
        prop_assert!(ids.insert(current.id), "Current entry is also pending");
    }

    // URI uniqueness among pending
    let uris: HashSet<String> = pending.iter().map(|e| e.track.uri.clone()).collect();
    prop_assert_eq!(uris.len(), pending.len());

    // Estimates step by exactly one track duration from the right head
    let refreshed = store.refresh_estimates();
    let now = clock.now();
    let step = Duration::seconds(180);
    let mut start = if store.has_current() { now + step } else { now };
    for entry in &refreshed {
        prop_assert_eq!(entry.estimated_start_time, Some(start));
        start += step;
    }

    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: counters, quota, and uniqueness hold after every operation
    #[test]
    fn invariants_hold_for_any_sequence(ops in prop::collection::vec(arbitrary_op(), 1..60)) {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        let store = QueueStore::new(
            Arc::new(MemoryStore::new()),
            clock.clone(),
            QueueConfig::default(),
        );

        for op in ops {
            match op {
                Op::Enqueue { user: u, track: t } => {
                    let before = store.pending_entries();
                    if store.enqueue(track(t), &user(u)).is_err() {
                        prop_assert_eq!(store.pending_entries(), before);
                    }
                }
                Op::Dequeue { requester, index } => {
                    let pending = store.pending_entries();
                    if let Some(entry) = pending.get(index) {
                        let result = store.dequeue(&entry.id, &user(requester));
                        prop_assert_eq!(result.is_ok(), entry.submitted_by == user(requester));
                    }
                }
                Op::DequeueUnknown { requester } => {
                    let before = store.pending_entries();
                    prop_assert!(store.dequeue(&EntryId::new("missing"), &user(requester)).is_err());
                    prop_assert_eq!(store.pending_entries(), before);
                }
                Op::PullNext => {
                    let head = store.pending_entries().first().cloned();
                    let pulled = store.pull_next();
                    prop_assert_eq!(pulled.map(|e| e.id), head.map(|e| e.id));
                }
                Op::ClearCurrent => store.clear_current(),
                Op::ClearAll => {
                    let current = store.current_entry();
                    store.clear_all();
                    prop_assert!(store.is_empty());
                    prop_assert_eq!(store.current_entry(), current);
                }
                Op::Advance { minutes } => clock.advance(Duration::minutes(minutes)),
            }

            assert_invariants(&store, &clock)?;
        }
    }

    /// Property: a snapshot reloaded from storage restores the same queue
    #[test]
    fn snapshot_round_trips(
        submissions in prop::collection::vec((0..USERS.len(), 0usize..8), 0..12),
        pulls in 0usize..4,
    ) {
        let storage = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        let store = QueueStore::new(storage.clone(), clock.clone(), QueueConfig::default());

        for (u, t) in submissions {
            let _ = store.enqueue(track(t), &user(u));
            clock.advance(Duration::seconds(7));
        }
        for _ in 0..pulls {
            store.pull_next();
        }

        let reloaded = QueueStore::new(storage, clock, QueueConfig::default());
        prop_assert_eq!(reloaded.snapshot(), store.snapshot());
    }
}
