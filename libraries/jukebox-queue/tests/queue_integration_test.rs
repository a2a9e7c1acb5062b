//! Integration tests for the shared queue
//!
//! Walks through the multi-user scenarios end to end: quotas, ownership,
//! duplicates, estimates, and persistence across restarts.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jukebox_core::storage::QUEUE_KEY;
use jukebox_core::{KeyValueStore, ManualClock, TrackRef, UserName};
use jukebox_queue::{wait_label, IdentityRegister, QueueConfig, QueueRejection, QueueStore};
use jukebox_storage::{FileStore, MemoryStore};
use std::sync::Arc;
use tempfile::TempDir;

// ===== Test Helpers =====

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn track(letter: &str) -> TrackRef {
    TrackRef::new(format!("spotify:track:{letter}"), format!("Song {letter}"))
}

fn user(name: &str) -> UserName {
    UserName::parse(name).unwrap()
}

fn new_store() -> (QueueStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let store = QueueStore::new(
        Arc::new(MemoryStore::new()),
        clock.clone(),
        QueueConfig::default(),
    );
    (store, clock)
}

// ===== Quota =====

#[test]
fn test_quota_frees_up_after_pull() {
    let (store, _) = new_store();
    let alice = user("alice");

    for letter in ["A", "B", "C"] {
        store.enqueue(track(letter), &alice).unwrap();
    }
    assert_eq!(store.remaining_quota(&alice), 0);

    let err = store.enqueue(track("D"), &alice).unwrap_err();
    assert_eq!(err, QueueRejection::QuotaExceeded { limit: 3 });
    assert_eq!(store.len(), 3);

    let pulled = store.pull_next().unwrap();
    assert_eq!(pulled.track.name, "Song A");
    assert_eq!(store.remaining_quota(&alice), 1);

    store.enqueue(track("D"), &alice).unwrap();
    assert_eq!(store.remaining_quota(&alice), 0);
}

#[test]
fn test_quota_frees_up_after_removal() {
    let (store, _) = new_store();
    let alice = user("alice");

    let first = store.enqueue(track("A"), &alice).unwrap().entry;
    store.enqueue(track("B"), &alice).unwrap();
    store.enqueue(track("C"), &alice).unwrap();

    let removed = store.dequeue(&first.id, &alice).unwrap();
    assert_eq!(removed.message, "\"Song A\" removed from queue.");

    assert!(store.enqueue(track("D"), &alice).is_ok());
}

#[test]
fn test_quotas_are_per_user() {
    let (store, _) = new_store();
    let alice = user("alice");
    let bob = user("bob");

    for letter in ["A", "B", "C"] {
        store.enqueue(track(letter), &alice).unwrap();
    }
    store.enqueue(track("D"), &bob).unwrap();

    assert_eq!(store.submission_count(&alice), 3);
    assert_eq!(store.submission_count(&bob), 1);
    assert_eq!(store.remaining_quota(&bob), 2);
}

#[test]
fn test_custom_quota() {
    let store = QueueStore::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ManualClock::new(t0())),
        QueueConfig {
            max_per_user: 1,
            ..QueueConfig::default()
        },
    );
    let alice = user("alice");

    store.enqueue(track("A"), &alice).unwrap();
    let err = store.enqueue(track("B"), &alice).unwrap_err();
    assert_eq!(
        err.to_string(),
        "You can only have 1 songs in the queue. Please wait for your songs to play."
    );
}

// ===== Ownership and Duplicates =====

#[test]
fn test_only_owner_can_remove() {
    let (store, _) = new_store();
    let alice = user("alice");
    let bob = user("bob");

    let entry = store.enqueue(track("A"), &bob).unwrap().entry;

    let err = store.dequeue(&entry.id, &alice).unwrap_err();
    assert!(matches!(err, QueueRejection::NotOwner { .. }));
    assert_eq!(store.len(), 1);
    assert_eq!(store.submission_count(&bob), 1);

    store.dequeue(&entry.id, &bob).unwrap();
    assert!(store.is_empty());
    assert!(store.submission_counts().is_empty());
}

#[test]
fn test_duplicate_uri_rejected_across_users() {
    let (store, _) = new_store();

    store.enqueue(track("A"), &user("alice")).unwrap();
    let err = store.enqueue(track("A"), &user("bob")).unwrap_err();

    assert_eq!(err.to_string(), "This song is already in the queue.");
    assert_eq!(store.len(), 1);
    assert_eq!(store.submission_count(&user("bob")), 0);
}

#[test]
fn test_current_track_may_be_requeued() {
    let (store, _) = new_store();
    let alice = user("alice");

    store.enqueue(track("A"), &alice).unwrap();
    store.pull_next().unwrap();

    // Only pending entries count as duplicates
    assert!(store.enqueue(track("A"), &alice).is_ok());
}

#[test]
fn test_current_entry_cannot_be_dequeued() {
    let (store, _) = new_store();
    let alice = user("alice");

    let entry = store.enqueue(track("A"), &alice).unwrap().entry;
    store.pull_next().unwrap();

    let err = store.dequeue(&entry.id, &alice).unwrap_err();
    assert_eq!(err.to_string(), "Track not found in queue.");
    assert!(store.has_current());
}

// ===== Pull and Clear =====

#[test]
fn test_pull_next_on_empty_queue() {
    let (store, _) = new_store();
    assert!(store.pull_next().is_none());
    assert!(!store.has_current());
}

#[test]
fn test_fifo_across_users() {
    let (store, _) = new_store();

    store.enqueue(track("A"), &user("alice")).unwrap();
    store.enqueue(track("B"), &user("bob")).unwrap();
    store.enqueue(track("C"), &user("alice")).unwrap();

    assert_eq!(
        store.pending_uris(),
        vec!["spotify:track:A", "spotify:track:B", "spotify:track:C"]
    );

    let order: Vec<_> = std::iter::from_fn(|| store.pull_next())
        .map(|e| e.track.name)
        .collect();
    assert_eq!(order, vec!["Song A", "Song B", "Song C"]);
    assert_eq!(store.current_uri().as_deref(), Some("spotify:track:C"));
}

#[test]
fn test_clear_all_resets_counters() {
    let (store, _) = new_store();
    let alice = user("alice");

    store.enqueue(track("A"), &alice).unwrap();
    store.enqueue(track("B"), &alice).unwrap();
    let playing = store.pull_next().unwrap();

    store.clear_all();

    assert!(store.is_empty());
    assert_eq!(store.remaining_quota(&alice), 3);
    assert_eq!(store.current_entry().map(|e| e.id), Some(playing.id));
}

#[test]
fn test_clear_all_survives_restart_with_current() {
    let storage = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let store = QueueStore::new(storage.clone(), clock.clone(), QueueConfig::default());
    let alice = user("alice");

    store.enqueue(track("A"), &alice).unwrap();
    store.enqueue(track("B"), &alice).unwrap();
    store.pull_next().unwrap();
    store.clear_all();

    let reloaded = QueueStore::new(storage, clock, QueueConfig::default());
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.current_uri().as_deref(), Some("spotify:track:A"));
}

// ===== Estimates =====

#[test]
fn test_estimates_follow_current_entry() {
    let (store, clock) = new_store();
    let alice = user("alice");

    store.enqueue(track("A"), &alice).unwrap();
    store.enqueue(track("B"), &alice).unwrap();
    store.enqueue(track("C"), &alice).unwrap();

    let pending = store.pending_entries();
    assert_eq!(pending[0].estimated_start_time, Some(t0()));
    assert_eq!(pending[2].estimated_start_time, Some(t0() + Duration::minutes(6)));

    clock.advance(Duration::minutes(1));
    store.pull_next().unwrap();

    let now = t0() + Duration::minutes(1);
    let pending = store.pending_entries();
    assert_eq!(pending[0].estimated_start_time, Some(now + Duration::minutes(3)));
    assert_eq!(pending[1].estimated_start_time, Some(now + Duration::minutes(6)));

    store.clear_current();
    let pending = store.pending_entries();
    assert_eq!(pending[0].estimated_start_time, Some(now));

    let labels: Vec<_> = pending
        .iter()
        .filter_map(|e| e.estimated_start_time)
        .map(|start| wait_label(start, now))
        .collect();
    assert_eq!(labels, vec!["Starting soon", "In 3 min"]);
}

// ===== Persistence =====

#[test]
fn test_queue_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jukebox.json");
    let clock = Arc::new(ManualClock::new(t0()));
    let alice = user("alice");
    let bob = user("bob");

    let before = {
        let storage = Arc::new(FileStore::open(&path).unwrap());
        let store = QueueStore::new(storage, clock.clone(), QueueConfig::default());
        store.enqueue(track("A"), &alice).unwrap();
        store.enqueue(track("B"), &bob).unwrap();
        store.enqueue(track("C"), &alice).unwrap();
        store.pull_next().unwrap();
        store.snapshot()
    };

    let storage = Arc::new(FileStore::open(&path).unwrap());
    let store = QueueStore::new(storage, clock, QueueConfig::default());

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.current_entry().unwrap().track.name, "Song A");
    assert_eq!(store.submission_count(&alice), 1);
    assert_eq!(store.submission_count(&bob), 1);
}

#[test]
fn test_snapshot_format() {
    let storage = Arc::new(MemoryStore::new());
    let store = QueueStore::new(
        storage.clone(),
        Arc::new(ManualClock::new(t0())),
        QueueConfig::default(),
    );
    store.enqueue(track("A"), &user("bob")).unwrap();
    store.enqueue(track("B"), &user("alice")).unwrap();

    let raw = storage.get(QUEUE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["queue"].as_array().unwrap().len(), 2);
    assert_eq!(json["queue"][0]["submittedBy"], "bob");
    assert!(json["currentTrack"].is_null());
    assert_eq!(json["userSongs"], serde_json::json!([["alice", 1], ["bob", 1]]));
}

#[test]
fn test_restore_keeps_readable_entries_from_damaged_snapshot() {
    let storage = Arc::new(MemoryStore::new());
    storage
        .set(
            QUEUE_KEY,
            r#"{
                "queue": [
                    {"id": "e1", "track": {"uri": "spotify:track:A", "name": "Song A"},
                     "addedBy": "", "addedAt": "2024-05-01T11:58:00.000Z"},
                    {"id": "e2", "track": {"uri": "spotify:track:B", "name": "Song B"},
                     "addedBy": "bob", "addedAt": "2024-05-01T11:59:00.000Z"}
                ],
                "currentTrack": null,
                "userSongs": [["", 1], ["bob", 1]]
            }"#,
        )
        .unwrap();

    let store = QueueStore::new(
        storage,
        Arc::new(ManualClock::new(t0())),
        QueueConfig::default(),
    );

    assert_eq!(store.pending_uris(), vec!["spotify:track:B".to_string()]);
    assert_eq!(store.remaining_quota(&user("bob")), 2);
}

#[test]
fn test_identity_and_queue_share_storage() {
    let storage = Arc::new(MemoryStore::new());
    let identity = IdentityRegister::new(storage.clone());
    let store = QueueStore::new(
        storage.clone(),
        Arc::new(ManualClock::new(t0())),
        QueueConfig::default(),
    );

    let alice = identity.set_current_user("alice").unwrap();
    store.enqueue(track("A"), &alice).unwrap();

    let restored = IdentityRegister::new(storage);
    assert_eq!(restored.current_user(), Some(alice.clone()));
    assert_eq!(store.submission_count(&alice), 1);
}
