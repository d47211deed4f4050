// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::services::TokenStore;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth", get(auth_start))
        .route("/callback", get(auth_callback))
}

/// Start the OAuth flow by redirecting to Strava's authorize page.
async fn auth_start(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let redirect_uri = format!("{}/callback", state.config.base_url);
    let auth_url = state.strava.authorization_url(&redirect_uri)?;

    tracing::info!("Starting OAuth flow, redirecting to Strava");

    Ok(Redirect::temporary(&auth_url))
}

/// Query parameters Strava sends to the callback.
#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback: exchange the code for tokens and store them as cookies.
///
/// Provider-reported errors (for example the user denying access) redirect
/// home with an error marker rather than surfacing as API errors. A failed
/// exchange does the same with a distinct marker; nothing is persisted in
/// either case.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    // Blank query values (`?code=`) count as absent.
    let code = params.code.filter(|v| !v.is_empty());
    let error = params.error.filter(|v| !v.is_empty());

    if let Some(error) = error {
        tracing::warn!(error = %error, "Strava authorization was denied");
        let home = format!("{}/?error=strava_auth_failed", state.config.base_url);
        return Ok((jar, Redirect::temporary(&home)));
    }

    let Some(code) = code else {
        return Err(AppError::BadRequest(
            "No authorization code provided".to_string(),
        ));
    };

    let pair = match state.strava.exchange_code(&code).await {
        Ok(pair) => pair,
        Err(err @ AppError::ConfigMissing(_)) => return Err(err),
        Err(err) => {
            tracing::warn!(error = %err, "Token exchange failed");
            let home = format!(
                "{}/?error=strava_token_exchange_failed",
                state.config.base_url
            );
            return Ok((jar, Redirect::temporary(&home)));
        }
    };

    let mut store = TokenStore::new(jar, state.config.environment.is_production());
    store.set(&pair);

    let dashboard = format!("{}/dashboard", state.config.base_url);
    Ok((store.into_jar(), Redirect::temporary(&dashboard)))
}
