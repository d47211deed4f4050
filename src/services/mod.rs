// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod strava;
pub mod token_store;

pub use strava::{StravaClient, StravaService};
pub use token_store::{StoredTokens, TokenStore};
