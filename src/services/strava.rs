// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client and token lifecycle service.
//!
//! Handles:
//! - Authorization URL construction for the OAuth redirect
//! - Authorization-code exchange and refresh-token grants
//! - Activity fetching with bearer auth

use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Activity, TokenPair};
use crate::services::token_store::TokenStore;
use crate::time_utils::format_epoch_rfc3339;

const STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";
const STRAVA_OAUTH_BASE: &str = "https://www.strava.com/oauth";

/// Scopes requested during authorization: profile read plus full activity read.
const OAUTH_SCOPE: &str = "read,activity:read_all";

/// Single page fetched per activities request; the frontend truncates further.
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 30;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    api_base: String,
    oauth_base: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl StravaClient {
    /// Create a new Strava client.
    ///
    /// Credentials are optional so the server can boot without them; requests
    /// that need them fail with `ConfigMissing` instead.
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: STRAVA_API_BASE.to_string(),
            oauth_base: STRAVA_OAUTH_BASE.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Point the client at different API and OAuth endpoints (used by tests).
    pub fn with_base_urls(mut self, api_base: String, oauth_base: String) -> Self {
        self.api_base = api_base;
        self.oauth_base = oauth_base;
        self
    }

    fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), AppError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(AppError::ConfigMissing("STRAVA_CLIENT_ID"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or(AppError::ConfigMissing("STRAVA_CLIENT_SECRET"))?;
        Ok((client_id, client_secret))
    }

    /// Build the provider authorize URL for the OAuth redirect.
    ///
    /// Pure string construction; the only failure is a missing client ID.
    pub fn authorization_url(&self, redirect_uri: &str) -> Result<String, AppError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(AppError::ConfigMissing("STRAVA_CLIENT_ID"))?;

        Ok(format!(
            "{}/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
            self.oauth_base,
            client_id,
            urlencoding::encode(redirect_uri),
            OAUTH_SCOPE
        ))
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AppError> {
        let (client_id, client_secret) = self.credentials()?;

        let response = self
            .http
            .post(format!("{}/token", self.oauth_base))
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Obtain a new access token from a refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let (client_id, client_secret) = self.credentials()?;

        let response = self
            .http
            .post(format!("{}/token", self.oauth_base))
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// List the athlete's activities (single page).
    pub async fn list_activities(
        &self,
        access_token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Activity>, AppError> {
        let url = format!("{}/athlete/activities", self.api_base);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// StravaService - High-level service with token management
// ─────────────────────────────────────────────────────────────────────────────

/// High-level Strava service that manages the token lifecycle and API calls.
///
/// Token state lives entirely in the requester's cookies; every request
/// re-reads the store and at most one refresh-token grant is attempted per
/// request. Two concurrent requests holding the same stale token may both
/// refresh independently (last cookie writer wins); that race is accepted.
#[derive(Clone)]
pub struct StravaService {
    client: StravaClient,
}

impl StravaService {
    /// Create a new Strava service with optional OAuth credentials.
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            client: StravaClient::new(client_id, client_secret),
        }
    }

    /// Point the underlying client at different endpoints (used by tests).
    pub fn with_base_urls(mut self, api_base: String, oauth_base: String) -> Self {
        self.client = self.client.with_base_urls(api_base, oauth_base);
        self
    }

    /// Build the provider authorize URL for the OAuth redirect.
    pub fn authorization_url(&self, redirect_uri: &str) -> Result<String, AppError> {
        self.client.authorization_url(redirect_uri)
    }

    /// Exchange an authorization code for tokens. Exactly one attempt.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AppError> {
        let pair = self.client.exchange_code(code).await?;
        tracing::info!(
            expires_at = %format_epoch_rfc3339(pair.expires_at),
            "Exchanged authorization code for tokens"
        );
        Ok(pair)
    }

    /// Fetch the athlete's recent activities, renewing the access token first
    /// when necessary.
    ///
    /// Per-request state machine:
    /// 1. Access token present: fetch with it.
    /// 2. No access token, refresh token present: attempt exactly one refresh
    ///    grant; persist the new access token to the store, then fetch.
    /// 3. Neither token (or no credentials to refresh with): `NoToken`.
    ///
    /// A renewed access token is written to the store before the upstream
    /// fetch, so the renewal survives even when the fetch itself fails.
    pub async fn fetch_activities(
        &self,
        store: &mut TokenStore,
    ) -> Result<Vec<Activity>, AppError> {
        let tokens = store.get();

        let access_token = match tokens.access {
            Some(token) => token,
            None => {
                let Some(refresh) = tokens.refresh else {
                    return Err(AppError::NoToken);
                };
                // Without credentials the refresh grant cannot be attempted,
                // so a lone refresh token is unusable.
                if !self.client.has_credentials() {
                    return Err(AppError::NoToken);
                }

                let pair = self.client.refresh_token(&refresh).await.map_err(|e| {
                    tracing::warn!(error = %e, "Access token refresh failed");
                    AppError::RefreshFailed
                })?;

                tracing::info!(
                    expires_at = %format_epoch_rfc3339(pair.expires_at),
                    "Access token refreshed"
                );

                store.set_access_token(&pair.access_token);
                pair.access_token
            }
        };

        self.client
            .list_activities(&access_token, DEFAULT_PAGE, DEFAULT_PER_PAGE)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch activities from Strava");
                AppError::UpstreamFetch
            })
    }
}
