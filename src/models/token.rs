// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OAuth token payloads from the Strava token endpoint.

use serde::Deserialize;

/// Response from Strava's `/oauth/token` endpoint.
///
/// Returned both for the initial authorization-code exchange and for
/// refresh-token grants. Strava rotates the refresh token on every grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token for API calls (expires after ~6 hours)
    pub access_token: String,
    /// Long-lived token used to obtain new access tokens
    pub refresh_token: String,
    /// Access token expiry as Unix epoch seconds
    pub expires_at: i64,
}
