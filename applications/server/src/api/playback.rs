/// Playback API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use jukebox_core::{PlayerStateUpdate, PlayerStatus, QueueEntry};
use jukebox_queue::{ToggleOutcome, VolumePreference, EMPTY_QUEUE_NOTICE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeResponse {
    pub level: u8,
    pub is_muted: bool,
}

impl From<VolumePreference> for VolumeResponse {
    fn from(volume: VolumePreference) -> Self {
        Self {
            level: volume.level(),
            is_muted: volume.is_muted(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackResponse {
    pub status: PlayerStatus,
    pub current: Option<QueueEntry>,
    pub volume: VolumeResponse,
    pub last_state: Option<PlayerStateUpdate>,
    pub progress_percent: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// `started`, `paused`, `resumed`, or `nothingToPlay`
    pub outcome: &'static str,
    pub entry: Option<QueueEntry>,
    pub message: Option<String>,
}

impl From<ToggleOutcome> for ToggleResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        match outcome {
            ToggleOutcome::Started(entry) => Self {
                outcome: "started",
                message: Some(format!("Now playing \"{}\"", entry.track.name)),
                entry: Some(*entry),
            },
            ToggleOutcome::Paused => Self {
                outcome: "paused",
                entry: None,
                message: None,
            },
            ToggleOutcome::Resumed => Self {
                outcome: "resumed",
                entry: None,
                message: None,
            },
            ToggleOutcome::NothingToPlay => Self {
                outcome: "nothingToPlay",
                entry: None,
                message: Some(EMPTY_QUEUE_NOTICE.to_string()),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekRequest {
    pub position_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct VolumeRequest {
    pub level: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    pub device_id: String,
}

/// GET /api/playback - Status, current entry, and volume
pub async fn get_playback(State(app_state): State<AppState>) -> Json<PlaybackResponse> {
    let coordinator = &app_state.coordinator;
    let last_state = coordinator.last_state();

    Json(PlaybackResponse {
        status: coordinator.status(),
        current: app_state.queue.current_entry(),
        volume: coordinator.volume().into(),
        progress_percent: last_state.as_ref().map(PlayerStateUpdate::progress_percent),
        last_state,
    })
}

/// POST /api/playback/toggle - Play/pause
pub async fn toggle(State(app_state): State<AppState>) -> Result<Json<ToggleResponse>> {
    let outcome = app_state.coordinator.toggle().await?;
    Ok(Json(outcome.into()))
}

/// POST /api/playback/next - Skip to the next queued track
pub async fn next(State(app_state): State<AppState>) -> Result<Json<QueueEntry>> {
    let entry = app_state.coordinator.advance().await?;
    Ok(Json(entry))
}

/// POST /api/playback/stop - Stop and clear the current entry
pub async fn stop(State(app_state): State<AppState>) -> Result<StatusCode> {
    app_state.coordinator.stop().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/playback/seek - Seek within the current track
pub async fn seek(
    State(app_state): State<AppState>,
    Json(request): Json<SeekRequest>,
) -> Result<StatusCode> {
    app_state.coordinator.seek(request.position_ms).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/playback/volume - Set the volume (0-100)
pub async fn set_volume(
    State(app_state): State<AppState>,
    Json(request): Json<VolumeRequest>,
) -> Result<Json<VolumeResponse>> {
    let volume = app_state.coordinator.set_volume(request.level).await?;
    Ok(Json(volume.into()))
}

/// POST /api/playback/mute - Toggle mute
pub async fn toggle_mute(State(app_state): State<AppState>) -> Result<Json<VolumeResponse>> {
    let volume = app_state.coordinator.toggle_mute().await?;
    Ok(Json(volume.into()))
}

/// POST /api/playback/state - State notification from the player
pub async fn report_state(
    State(app_state): State<AppState>,
    Json(update): Json<PlayerStateUpdate>,
) -> StatusCode {
    app_state.coordinator.handle_state_change(update);
    StatusCode::NO_CONTENT
}

/// PUT /api/playback/device - Player reports its device id once ready
pub async fn register_device(
    State(app_state): State<AppState>,
    Json(request): Json<DeviceRequest>,
) -> Result<StatusCode> {
    let provider = app_state
        .provider
        .as_ref()
        .ok_or(ServerError::ProviderUnavailable)?;

    if request.device_id.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "Device id cannot be empty".to_string(),
        ));
    }

    provider.set_device(request.device_id).await;
    Ok(StatusCode::NO_CONTENT)
}
