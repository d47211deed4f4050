// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::header;
use axum::response::Response;
use cyclemax_api::config::Config;
use cyclemax_api::routes::create_router;
use cyclemax_api::services::StravaService;
use cyclemax_api::AppState;
use std::sync::Arc;

/// Create a test app with the default test config.
///
/// The Strava client points at the real upstream; only tests that never
/// leave the router should use this.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default(), None)
}

/// Create a test app whose Strava client talks to a mock upstream.
#[allow(dead_code)]
pub fn create_test_app_with_upstream(upstream: &str) -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default(), Some(upstream))
}

/// Create a test app from an explicit config, optionally pointing the
/// Strava client at a mock upstream.
#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
    upstream: Option<&str>,
) -> (axum::Router, Arc<AppState>) {
    let mut strava = StravaService::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );
    if let Some(base) = upstream {
        strava = strava.with_base_urls(format!("{base}/api/v3"), format!("{base}/oauth"));
    }

    let state = Arc::new(AppState { config, strava });
    (create_router(state.clone()), state)
}

/// Collect all `Set-Cookie` header values from a response.
#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// Find the `Set-Cookie` value for a named cookie, panicking if absent.
#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn response_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
