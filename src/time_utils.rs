// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat};

/// Format a Unix timestamp (seconds) as RFC3339 with a `Z` suffix.
///
/// Strava reports token expiry as epoch seconds; this renders it for logs.
/// Out-of-range values fall back to the epoch rather than panicking.
pub fn format_epoch_rfc3339(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
