//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://hivemind-api-v2.onrender.com";

const TOKEN_FILE: &str = "session.json";
const COOKIE_FILE: &str = "cookies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL without a trailing slash.
    pub api_url: String,
    /// Directory holding the durable token and the cookie jar.
    pub state_dir: PathBuf,
    /// Whether the `token` cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
}

impl ClientConfig {
    /// Build a config for an explicit base URL with default storage location.
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        let api_url = normalize_url(api_url);
        let secure_cookies = api_url.starts_with("https://");
        Self { api_url, state_dir: default_state_dir(), secure_cookies }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `NEXT_PUBLIC_API_URL`: API base URL (default [`DEFAULT_API_URL`])
    /// - `HIVEMIND_STATE_DIR`: durable session directory
    /// - `COOKIE_SECURE`: force the cookie `Secure` flag on or off
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("NEXT_PUBLIC_API_URL")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| DEFAULT_API_URL.to_owned(), |v| normalize_url(&v));
        let state_dir = lookup("HIVEMIND_STATE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_state_dir, PathBuf::from);
        let secure_cookies = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| api_url.starts_with("https://"));

        Self { api_url, state_dir, secure_cookies }
    }

    #[must_use]
    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = state_dir.into();
        self
    }

    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.state_dir.join(TOKEN_FILE)
    }

    #[must_use]
    pub fn cookie_path(&self) -> PathBuf {
        self.state_dir.join(COOKIE_FILE)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn default_state_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "hivemind", "hivemind")
        .map_or_else(|| PathBuf::from(".hivemind"), |dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
