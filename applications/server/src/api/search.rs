/// Track search API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use jukebox_core::TrackRef;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<u8>,
}

/// GET /api/search?q= - Search the provider catalog for tracks
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TrackRef>>> {
    let provider = app_state
        .provider
        .as_ref()
        .ok_or(ServerError::ProviderUnavailable)?;

    let query = params.q.trim();
    if query.is_empty() {
        return Err(ServerError::BadRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let tracks = provider.search_tracks(query, params.limit).await?;
    Ok(Json(tracks))
}
