/// UI event feed
use crate::state::AppState;
use axum::{extract::State, Json};
use jukebox_queue::JukeboxEvent;

/// GET /api/events - Take every event since the last call
pub async fn drain(State(app_state): State<AppState>) -> Json<Vec<JukeboxEvent>> {
    Json(app_state.coordinator.drain_events())
}
