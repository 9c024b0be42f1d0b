//! OpenAI-compatible `/chat/completions` client with JSON-schema output.
//!
//! Any provider that serves the same endpoint under `LLM_BASE_URL` and
//! honours `response_format: json_schema` works.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{Completion, LlmConfig, LlmError, StructuredModel, StructuredRequest};

pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// # Errors
    ///
    /// Missing key, bad config values, or an HTTP client that fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        info!(model = %config.model, base_url = %config.base_url, "llm client configured");
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait::async_trait]
impl StructuredModel for LlmClient {
    async fn complete(&self, request: &StructuredRequest<'_>) -> Result<Completion, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = %self.config.model, schema = request.name, "llm request");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body(&self.config.model, request))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::Status { status: status.as_u16(), body: text });
        }
        parse_completion(&text)
    }
}

// =============================================================================
// REQUEST BODY
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: NamedSchema<'a>,
}

#[derive(Serialize)]
struct NamedSchema<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

fn request_body<'a>(model: &'a str, request: &StructuredRequest<'a>) -> CompletionRequest<'a> {
    CompletionRequest {
        model,
        max_tokens: request.max_tokens,
        messages: [
            ChatMessage { role: "system", content: request.system },
            ChatMessage { role: "user", content: request.prompt },
        ],
        response_format: ResponseFormat {
            kind: "json_schema",
            json_schema: NamedSchema { name: request.name, schema: request.schema, strict: true },
        },
    }
}

// =============================================================================
// RESPONSE BODY
// =============================================================================

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: AssistantMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

pub(crate) fn parse_completion(body: &str) -> Result<Completion, LlmError> {
    let response: CompletionResponse = serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Decode("response has no choices".to_owned()))?;

    if let Some(reason) = choice.message.refusal.filter(|r| !r.is_empty()) {
        return Err(LlmError::Refused(reason));
    }

    Ok(Completion {
        text: choice.message.content.unwrap_or_default(),
        model: response.model,
        truncated: choice.finish_reason.as_deref() == Some("length"),
        input_tokens: response.usage.prompt_tokens,
        output_tokens: response.usage.completion_tokens,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
