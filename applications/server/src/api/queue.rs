/// Queue API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use jukebox_core::{EntryId, QueueEntry, TrackRef};
use jukebox_queue::wait_label;
use serde::{Deserialize, Serialize};

/// A pending entry as shown in the queue list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: QueueEntry,
    pub wait_label: Option<String>,
    pub is_own: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub current: Option<QueueEntry>,
    pub pending: Vec<EntryView>,
    pub length: usize,
    pub max_per_user: u32,
    /// Absent when no name has been entered
    pub remaining_quota: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub track: TrackRef,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub entry: QueueEntry,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/queue - Current entry plus pending entries with wait times
pub async fn get_queue(State(app_state): State<AppState>) -> Json<QueueResponse> {
    let now = app_state.clock.now();
    let user = app_state.identity.current_user();

    let pending: Vec<EntryView> = app_state
        .queue
        .refresh_estimates()
        .into_iter()
        .map(|entry| EntryView {
            wait_label: entry.estimated_start_time.map(|start| wait_label(start, now)),
            is_own: user.as_ref() == Some(&entry.submitted_by),
            entry,
        })
        .collect();

    Json(QueueResponse {
        current: app_state.queue.current_entry(),
        length: pending.len(),
        pending,
        max_per_user: app_state.queue.config().max_per_user,
        remaining_quota: user.as_ref().map(|u| app_state.queue.remaining_quota(u)),
    })
}

/// POST /api/queue - Submit a track as the current user
pub async fn submit(
    State(app_state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let user = app_state.require_user()?;
    let accepted = app_state.queue.enqueue(request.track, &user)?;
    app_state.coordinator.queue_changed();

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: accepted.message,
            entry: accepted.entry,
        }),
    ))
}

/// DELETE /api/queue/:id - Withdraw one of your own entries
pub async fn withdraw(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let user = app_state.require_user()?;
    let removed = app_state.queue.dequeue(&EntryId::new(id), &user)?;
    app_state.coordinator.queue_changed();

    Ok(Json(MessageResponse {
        message: removed.message,
    }))
}

/// DELETE /api/queue - Administrative reset of pending entries
pub async fn clear(State(app_state): State<AppState>) -> Json<MessageResponse> {
    app_state.queue.clear_all();
    app_state.coordinator.queue_changed();
    tracing::info!("Queue cleared over HTTP");

    Json(MessageResponse {
        message: "Queue cleared".to_string(),
    })
}
