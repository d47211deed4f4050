//! Application configuration loaded from environment variables.
//!
//! Strava credentials are optional at startup: the OAuth endpoints report
//! their absence per request, so a box can boot (and serve `/health`)
//! before the app is registered with Strava.

use std::env;

/// Deployment environment, controlling the cookie `Secure` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse from the `APP_ENV` value. Only `production` (any case) is
    /// production; everything else falls back to development.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: Option<String>,
    /// Strava OAuth client secret
    pub strava_client_secret: Option<String>,
    /// Public origin of this deployment, used to build the OAuth
    /// redirect URI and the post-callback redirects
    pub base_url: String,
    /// Deployment environment (cookie security flags)
    pub environment: Environment,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: Some("test_client_id".to_string()),
            strava_client_secret: Some("test_secret".to_string()),
            base_url: "http://localhost:8080".to_string(),
            environment: Environment::Development,
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` first for local development. Never fails: credentials
    /// are optional and everything else has a default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(Environment::Development),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }

    /// Both OAuth credentials, when configured.
    pub fn oauth_credentials(&self) -> Option<(&str, &str)> {
        match (&self.strava_client_id, &self.strava_client_secret) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }
}
