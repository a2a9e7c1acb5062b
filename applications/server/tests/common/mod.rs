//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::{TimeZone, Utc};
use jukebox_core::{ManualClock, PlaybackBackend, PlaybackFailure};
use jukebox_provider::WebApiClient;
use jukebox_queue::QueueConfig;
use jukebox_server::{router, AppState};
use jukebox_storage::MemoryStore;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Backend that records commands and can be told to refuse them
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<String>>,
    refuse: AtomicBool,
}

impl RecordingBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn refuse(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    fn record(&self, call: String) -> Result<(), PlaybackFailure> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(PlaybackFailure::not_ready("Player not ready. Please wait..."));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl PlaybackBackend for RecordingBackend {
    async fn play_track_at(&self, uri: &str, _position_hint: usize) -> Result<(), PlaybackFailure> {
        self.record(format!("play {uri}"))
    }

    async fn pause(&self) -> Result<(), PlaybackFailure> {
        self.record("pause".into())
    }

    async fn resume(&self) -> Result<(), PlaybackFailure> {
        self.record("resume".into())
    }

    async fn stop(&self) -> Result<(), PlaybackFailure> {
        self.record("stop".into())
    }

    async fn seek(&self, position_ms: u64) -> Result<(), PlaybackFailure> {
        self.record(format!("seek {position_ms}"))
    }

    async fn set_volume(&self, percent: u8) -> Result<(), PlaybackFailure> {
        self.record(format!("volume {percent}"))
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub backend: Arc<RecordingBackend>,
}

/// App over in-memory storage, a fixed clock, and a recording backend
pub fn create_test_app() -> TestApp {
    create_test_app_with_provider(None)
}

pub fn create_test_app_with_provider(provider: Option<Arc<WebApiClient>>) -> TestApp {
    let backend = Arc::new(RecordingBackend::default());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));

    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        clock,
        QueueConfig::default(),
        backend.clone(),
        provider,
    );

    TestApp {
        router: router(state.clone()),
        state,
        backend,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Request body for submitting a track
pub fn track_body(id: &str, name: &str) -> Value {
    serde_json::json!({
        "track": {
            "id": id,
            "uri": format!("spotify:track:{id}"),
            "name": name,
            "artists": [{ "id": "artist", "name": "Test Artist" }]
        }
    })
}
