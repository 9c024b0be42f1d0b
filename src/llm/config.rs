//! LLM settings read from the environment.

use super::LlmError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const KEY_VARS: [&str; 2] = ["LLM_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// Base of an OpenAI-compatible API, without a trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the config from the process environment.
    ///
    /// - `LLM_API_KEY`, falling back to `OPENAI_API_KEY` (required)
    /// - `LLM_MODEL` (default [`DEFAULT_MODEL`])
    /// - `LLM_BASE_URL` (default [`DEFAULT_BASE_URL`])
    /// - `LLM_TIMEOUT_SECS` (default [`DEFAULT_TIMEOUT_SECS`])
    ///
    /// # Errors
    ///
    /// No key in either variable, or a timeout that is not a positive integer.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let api_key = KEY_VARS
            .into_iter()
            .find_map(|var| lookup(var).filter(|v| !v.trim().is_empty()))
            .ok_or(LlmError::MissingApiKey { var: KEY_VARS[0] })?;
        let mut config = Self::new(api_key);

        if let Some(model) = lookup("LLM_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        if let Some(url) = lookup("LLM_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_owned();
        }
        if let Some(raw) = lookup("LLM_TIMEOUT_SECS") {
            config.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| LlmError::Config(format!("LLM_TIMEOUT_SECS must be a positive integer, got '{raw}'")))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
