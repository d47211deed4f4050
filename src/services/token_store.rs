// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie-backed storage for the Strava OAuth tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::models::TokenPair;

/// Cookie holding the short-lived access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie holding the long-lived refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Access token cookie lifetime (6 hours, matching Strava's token expiry).
const ACCESS_TOKEN_MAX_AGE_SECS: i64 = 21_600;
/// Refresh token cookie lifetime (30 days).
const REFRESH_TOKEN_MAX_AGE_SECS: i64 = 2_592_000;

/// Tokens presented by the client on the current request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// Cookie-backed token store scoped to a single request.
///
/// Wraps the request's [`CookieJar`]; writes are staged on the jar and only
/// reach the client when the jar is returned with the response. There is no
/// delete operation, tokens age out via `Max-Age`.
pub struct TokenStore {
    jar: CookieJar,
    secure: bool,
}

impl TokenStore {
    /// Wrap the request's cookie jar. `secure` controls the cookie `Secure`
    /// attribute and must only be set when serving over HTTPS.
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    /// Read whichever tokens the client presented.
    pub fn get(&self) -> StoredTokens {
        StoredTokens {
            access: self
                .jar
                .get(ACCESS_TOKEN_COOKIE)
                .map(|c| c.value().to_string()),
            refresh: self
                .jar
                .get(REFRESH_TOKEN_COOKIE)
                .map(|c| c.value().to_string()),
        }
    }

    /// Store both tokens from a completed OAuth exchange.
    pub fn set(&mut self, pair: &TokenPair) {
        self.set_access_token(&pair.access_token);
        self.add(build_cookie(
            REFRESH_TOKEN_COOKIE,
            pair.refresh_token.clone(),
            REFRESH_TOKEN_MAX_AGE_SECS,
            self.secure,
        ));
    }

    /// Store a renewed access token, leaving the refresh cookie untouched.
    pub fn set_access_token(&mut self, access_token: &str) {
        self.add(build_cookie(
            ACCESS_TOKEN_COOKIE,
            access_token.to_string(),
            ACCESS_TOKEN_MAX_AGE_SECS,
            self.secure,
        ));
    }

    /// Consume the store, returning the jar with any staged `Set-Cookie`s.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn add(&mut self, cookie: Cookie<'static>) {
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }
}

fn build_cookie(
    name: &'static str,
    value: String,
    max_age_secs: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pair() -> TokenPair {
        TokenPair {
            access_token: "access_abc".to_string(),
            refresh_token: "refresh_xyz".to_string(),
            expires_at: 1_700_021_600,
        }
    }

    #[test]
    fn set_then_get_round_trips_both_tokens() {
        let mut store = TokenStore::new(CookieJar::new(), false);
        store.set(&test_pair());

        let tokens = store.get();
        assert_eq!(tokens.access.as_deref(), Some("access_abc"));
        assert_eq!(tokens.refresh.as_deref(), Some("refresh_xyz"));
    }

    #[test]
    fn set_applies_lifetimes_and_flags() {
        let mut store = TokenStore::new(CookieJar::new(), false);
        store.set(&test_pair());
        let jar = store.into_jar();

        let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
        assert_eq!(access.max_age(), Some(time::Duration::seconds(21_600)));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.secure(), Some(false));

        let refresh = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
        assert_eq!(refresh.max_age(), Some(time::Duration::seconds(2_592_000)));
        assert_eq!(refresh.http_only(), Some(true));
        assert_eq!(refresh.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn secure_flag_follows_environment() {
        let mut store = TokenStore::new(CookieJar::new(), true);
        store.set(&test_pair());
        let jar = store.into_jar();

        assert_eq!(jar.get(ACCESS_TOKEN_COOKIE).unwrap().secure(), Some(true));
        assert_eq!(jar.get(REFRESH_TOKEN_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn set_access_token_keeps_existing_refresh_cookie() {
        let jar = CookieJar::new().add(Cookie::new(REFRESH_TOKEN_COOKIE, "old_refresh"));
        let mut store = TokenStore::new(jar, false);
        store.set_access_token("renewed");

        let tokens = store.get();
        assert_eq!(tokens.access.as_deref(), Some("renewed"));
        assert_eq!(tokens.refresh.as_deref(), Some("old_refresh"));
    }

    #[test]
    fn empty_jar_reads_as_no_tokens() {
        let store = TokenStore::new(CookieJar::new(), false);
        assert_eq!(store.get(), StoredTokens::default());
    }
}
