/// API route modules
pub mod events;
pub mod health;
pub mod playback;
pub mod queue;
pub mod search;
pub mod user;

use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// All routes, nested under `/api`
pub fn router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        // Identity
        .route(
            "/user",
            get(user::get_user).put(user::set_user).delete(user::clear_user),
        )
        // Queue
        .route(
            "/queue",
            get(queue::get_queue).post(queue::submit).delete(queue::clear),
        )
        .route("/queue/:id", axum::routing::delete(queue::withdraw))
        // Playback
        .route("/playback", get(playback::get_playback))
        .route("/playback/toggle", post(playback::toggle))
        .route("/playback/next", post(playback::next))
        .route("/playback/stop", post(playback::stop))
        .route("/playback/seek", post(playback::seek))
        .route("/playback/volume", put(playback::set_volume))
        .route("/playback/mute", post(playback::toggle_mute))
        .route("/playback/state", post(playback::report_state))
        .route("/playback/device", put(playback::register_device))
        // Events and search
        .route("/events", get(events::drain))
        .route("/search", get(search::search));

    Router::new()
        .nest("/api", routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
