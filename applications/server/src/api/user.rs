/// Identity API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub name: Option<String>,
    pub display_name: String,
    pub remaining_quota: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SetUserRequest {
    pub name: String,
}

fn current(app_state: &AppState) -> UserResponse {
    let user = app_state.identity.current_user();
    UserResponse {
        remaining_quota: user.as_ref().map(|u| app_state.queue.remaining_quota(u)),
        name: user.map(|u| u.to_string()),
        display_name: app_state.identity.display_name(),
    }
}

/// GET /api/user - Who is submitting from this station
pub async fn get_user(State(app_state): State<AppState>) -> Json<UserResponse> {
    Json(current(&app_state))
}

/// PUT /api/user - Enter a name
pub async fn set_user(
    State(app_state): State<AppState>,
    Json(request): Json<SetUserRequest>,
) -> Result<Json<UserResponse>> {
    app_state.identity.set_current_user(&request.name)?;
    Ok(Json(current(&app_state)))
}

/// DELETE /api/user - Forget the current name
pub async fn clear_user(State(app_state): State<AppState>) -> StatusCode {
    app_state.identity.clear_current_user();
    StatusCode::NO_CONTENT
}
