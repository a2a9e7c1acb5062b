/// Search and device registration through a mocked provider
mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_app_with_provider, empty_request, json_request};
use jukebox_provider::{WebApiClient, WebApiConfig};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> Arc<WebApiClient> {
    Arc::new(WebApiClient::new(WebApiConfig::new(server.uri()).with_token("test-token")).unwrap())
}

#[tokio::test]
async fn test_search_returns_tracks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "daft punk"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [
                { "id": "1", "uri": "spotify:track:1", "name": "One More Time" }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app_with_provider(Some(provider_for(&server)));

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/search?q=daft%20punk&limit=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "One More Time");
    assert_eq!(body[0]["uri"], "spotify:track:1");
}

#[tokio::test]
async fn test_blank_query_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app_with_provider(Some(provider_for(&server)));

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/search?q=%20%20"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_error_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let app = create_test_app_with_provider(Some(provider_for(&server)));

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/search?q=anything"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_register_device() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);
    let app = create_test_app_with_provider(Some(Arc::clone(&provider)));

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/playback/device",
            &json!({ "deviceId": "kiosk-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(provider.device_id().await.as_deref(), Some("kiosk-1"));
}
