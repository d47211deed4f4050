// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the cyclist dashboard.

use crate::error::Result;
use crate::models::Activity;
use crate::services::TokenStore;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(get_activities))
        .route("/workout", get(get_workout))
}

// ─── Activities ──────────────────────────────────────────────

/// Recent activities response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
}

/// Get the athlete's recent activities.
///
/// Reads tokens from the request cookies and may renew the access token as a
/// side effect. The jar is returned alongside the result so a renewed token
/// cookie is sent to the client even when the upstream fetch fails.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Result<Json<ActivitiesResponse>>) {
    let mut store = TokenStore::new(jar, state.config.environment.is_production());

    let result = state
        .strava
        .fetch_activities(&mut store)
        .await
        .map(|activities| Json(ActivitiesResponse { activities }));

    (store.into_jar(), result)
}

// ─── Workout ─────────────────────────────────────────────────

/// Planned workout response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutResponse {
    pub name: String,
}

/// Get today's planned workout.
///
/// Static until a training-plan backend exists; the dashboard only shows
/// the workout name.
async fn get_workout() -> Json<WorkoutResponse> {
    Json(WorkoutResponse {
        name: "Endurance".to_string(),
    })
}
