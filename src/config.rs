// src/config.rs
// Process-wide configuration, loaded once at startup from the environment
// (after `dotenvy::dotenv()` in the binary). Immutable afterwards.

use std::str::FromStr;
use std::time::Duration;

const ENV_URLS: &str = "URLS";
const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
const ENV_PORT: &str = "PORT";
const ENV_SOURCE_TIMEOUT_MS: &str = "SOURCE_TIMEOUT_MS";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Upstream source URLs, in configuration order. May legally be empty;
    /// the endpoint rejects aggregation requests with 400 in that case.
    pub source_urls: Vec<String>,
    /// Shared bearer credential attached to every outbound source call.
    pub access_token: Option<String>,
    pub port: u16,
    /// Per-source fetch timeout; one slow source never delays the rest.
    pub source_timeout: Duration,
}

impl Settings {
    /// Read settings from the environment, falling back to defaults for
    /// anything missing or unparsable. Loading never fails: an empty URL
    /// list is a per-request validation error, not a boot error.
    pub fn from_env() -> Self {
        let source_urls = parse_url_list(&std::env::var(ENV_URLS).unwrap_or_default());
        let access_token = std::env::var(ENV_ACCESS_TOKEN)
            .ok()
            .filter(|t| !t.trim().is_empty());
        let port = env_or_default(ENV_PORT, DEFAULT_PORT);
        let timeout_ms = env_or_default(ENV_SOURCE_TIMEOUT_MS, DEFAULT_SOURCE_TIMEOUT_MS);

        Self {
            source_urls,
            access_token,
            port,
            source_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// Split a comma-separated URL list, trimming entries and dropping empties.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or_default<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
