//! Structured-output calls to a hosted language model.
//!
//! DESIGN
//! ======
//! The only caller is the suggestions flow, which needs one JSON object back
//! that matches a known schema. A [`StructuredRequest`] carries that schema
//! next to the prompt so the provider can constrain decoding; the caller
//! still validates whatever text comes back. Tests substitute a canned model
//! through the [`StructuredModel`] trait.

pub mod client;
pub mod config;

use serde_json::Value;

use crate::error::ErrorCode;

pub use client::LlmClient;
pub use config::LlmConfig;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("missing API key: set {var}")]
    MissingApiKey { var: &'static str },

    #[error("invalid LLM config: {0}")]
    Config(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// No response from the provider.
    #[error("LLM request failed: {0}")]
    Transport(String),

    #[error("LLM provider returned status {status}")]
    Status { status: u16, body: String },

    /// The provider answered 2xx with a body that is not a completion.
    #[error("LLM response could not be decoded: {0}")]
    Decode(String),

    /// The model declined to produce schema-conforming output.
    #[error("model refused: {0}")]
    Refused(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_LLM_MISSING_API_KEY",
            Self::Config(_) => "E_LLM_CONFIG",
            Self::HttpClientBuild(_) => "E_LLM_HTTP_CLIENT_BUILD",
            Self::Transport(_) => "E_LLM_TRANSPORT",
            Self::Status { .. } => "E_LLM_STATUS",
            Self::Decode(_) => "E_LLM_DECODE",
            Self::Refused(_) => "E_LLM_REFUSED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// REQUEST / COMPLETION
// =============================================================================

/// One prompt whose reply must be a JSON object matching `schema`.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    /// Schema name reported to the provider (`[a-zA-Z0-9_-]`).
    pub name: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
    pub schema: &'a Value,
    pub max_tokens: u32,
}

/// Raw reply text plus accounting. The text is not validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    /// The reply stopped at the token limit.
    pub truncated: bool,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[async_trait::async_trait]
pub trait StructuredModel: Send + Sync {
    /// # Errors
    ///
    /// Transport and status failures, undecodable replies, and refusals.
    async fn complete(&self, request: &StructuredRequest<'_>) -> Result<Completion, LlmError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
