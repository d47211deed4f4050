// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! CycleMax API: Strava connectivity for the CycleMax training dashboard.
//!
//! This crate provides the backend that runs the Strava OAuth flow, keeps
//! the resulting tokens in the requester's cookies, and proxies activity
//! reads to the Strava API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::StravaService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub strava: StravaService,
}
