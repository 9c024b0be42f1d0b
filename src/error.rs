//! Error taxonomy for the API client.
//!
//! DESIGN
//! ======
//! Three failure origins matter to callers: no response at all (transport),
//! a response with a non-2xx status, and local validation that rejects a
//! call before any network traffic. Everything else (decode failures,
//! storage failures) is reported but rarely actionable.
//!
//! Errors are `Clone` so hook state can hold the last failure while the
//! caller keeps its own copy.

use serde_json::Value;

/// Grepable error code plus a retry hint, shared by every error type.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// SESSION ERROR
// =============================================================================

/// Failures reading or writing a token storage backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("token storage io failed: {0}")]
    Io(String),

    #[error("token storage is corrupt: {0}")]
    Corrupt(String),

    #[error("token storage lock poisoned")]
    Poisoned,
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_SESSION_IO",
            Self::Corrupt(_) => "E_SESSION_CORRUPT",
            Self::Poisoned => "E_SESSION_POISONED",
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// Errors produced by the HTTP client, services, and use cases.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request was sent but no response came back.
    #[error("no response from API: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API returned status {status}")]
    Status { status: u16, body: String },

    /// Rejected locally before any request was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The response body did not have the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status when the API answered, `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for showing to an end user.
    ///
    /// Status codes with a fixed meaning win, then a `message` or `error`
    /// field from the response body, then the error's own display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status: 401, .. } => "Invalid email or password. Please try again.".to_owned(),
            Self::Status { status: 409, .. } => "An account with this email already exists.".to_owned(),
            Self::Status { body, .. } => body_message(body)
                .unwrap_or_else(|| "An unexpected error occurred. Please try again.".to_owned()),
            Self::Transport(_) => "No response from server. Please check your connection.".to_owned(),
            Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_API_STATUS",
            Self::Validation(_) => "E_VALIDATION",
            Self::Decode(_) => "E_DECODE",
            Self::Session(inner) => inner.error_code(),
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
