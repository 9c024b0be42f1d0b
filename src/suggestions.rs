//! Smart home suggestions: one templated LLM call over usage data and
//! preferences, answered as structured JSON.
//!
//! DESIGN
//! ======
//! The prompt embeds both JSON inputs verbatim plus the output schema, and
//! the same schema goes to the provider as a structured-output constraint.
//! The reply is still validated here: Markdown code fences around it are
//! tolerated, anything else that is not the expected object is an error. [`get_smart_suggestions`] folds every outcome into the
//! two-field shape the dashboard renders, so callers never see raw errors.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::error::ErrorCode;
use crate::llm::{LlmError, StructuredModel, StructuredRequest};

pub const EMPTY_RESPONSE: &str = "Failed to generate suggestions. The AI returned an empty response.";
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred while contacting the AI. Please try again later.";

const MAX_TOKENS: u32 = 2048;
const SCHEMA_NAME: &str = "smart_home_suggestions";

const SYSTEM_PROMPT: &str = "You are an AI assistant that provides smart suggestions for optimizing home energy consumption.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsInput {
    pub user_id: String,
    /// Historical energy usage data as JSON text.
    pub historical_usage_data: String,
    /// Home automation preferences as JSON text.
    pub preferences: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsOutput {
    pub suggestions: Vec<Suggestion>,
}

/// Dashboard-facing outcome: exactly one of the two fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmartSuggestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model answered with no text or no `suggestions` field.
    #[error("model returned an empty response")]
    Empty,

    #[error("model output is not valid JSON: {0}")]
    Parse(String),
}

impl ErrorCode for SuggestionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Llm(e) => e.error_code(),
            Self::Empty => "E_SUGGESTIONS_EMPTY",
            Self::Parse(_) => "E_SUGGESTIONS_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.retryable(),
            Self::Empty | Self::Parse(_) => false,
        }
    }
}

// =============================================================================
// PROMPT
// =============================================================================

fn output_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "suggestions": {
                "type": "array",
                "description": "A list of smart home suggestions.",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "The title of the suggestion." },
                        "description": { "type": "string", "description": "A detailed explanation of the suggestion." }
                    },
                    "required": ["title", "description"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["suggestions"],
        "additionalProperties": false
    })
}

#[must_use]
pub fn build_prompt(input: &SuggestionsInput) -> String {
    format!(
        "Based on the user's historical usage data and preferences, generate a list of actionable suggestions.\n\n\
         Historical Usage Data: {usage}\n\
         Preferences: {prefs}\n\n\
         Suggestions should be tailored to the user's specific situation and should be practical and easy to implement.\n\
         Each suggestion should have a title and a detailed explanation.\n\n\
         Format your output as a JSON object conforming to the following schema:\n{schema}\n",
        usage = input.historical_usage_data,
        prefs = input.preferences,
        schema = output_schema(),
    )
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct WireOutput {
    #[serde(default)]
    suggestions: Option<Vec<Suggestion>>,
}

/// Strip an optional Markdown code fence (with or without a language tag).
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

pub(crate) fn parse_output(text: &str) -> Result<SuggestionsOutput, SuggestionError> {
    let body = strip_fences(text);
    if body.is_empty() {
        return Err(SuggestionError::Empty);
    }
    let wire: WireOutput = serde_json::from_str(body).map_err(|e| SuggestionError::Parse(e.to_string()))?;
    wire.suggestions
        .map(|suggestions| SuggestionsOutput { suggestions })
        .ok_or(SuggestionError::Empty)
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Ask the model for suggestions.
///
/// # Errors
///
/// Provider failures, an empty reply, or a reply that is not the expected
/// JSON object.
pub async fn smart_home_suggestions(
    model: &dyn StructuredModel,
    input: &SuggestionsInput,
) -> Result<SuggestionsOutput, SuggestionError> {
    let prompt = build_prompt(input);
    let schema = output_schema();
    let completion = model
        .complete(&StructuredRequest {
            name: SCHEMA_NAME,
            system: SYSTEM_PROMPT,
            prompt: &prompt,
            schema: &schema,
            max_tokens: MAX_TOKENS,
        })
        .await?;
    debug!(
        user_id = %input.user_id,
        model = %completion.model,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        "suggestions response"
    );
    if completion.truncated {
        warn!(max_tokens = MAX_TOKENS, "suggestions reply hit the token limit");
    }
    parse_output(&completion.text)
}

/// Run [`smart_home_suggestions`] and fold the outcome into user-facing text.
pub async fn get_smart_suggestions(model: &dyn StructuredModel, input: &SuggestionsInput) -> SmartSuggestions {
    match smart_home_suggestions(model, input).await {
        Ok(output) => SmartSuggestions { suggestions: Some(output.suggestions), error: None },
        Err(SuggestionError::Empty) => {
            error!(code = SuggestionError::Empty.error_code(), "suggestions came back empty");
            SmartSuggestions { suggestions: None, error: Some(EMPTY_RESPONSE.to_owned()) }
        }
        Err(e) => {
            error!(error = %e, code = e.error_code(), "suggestions failed");
            SmartSuggestions { suggestions: None, error: Some(UNEXPECTED_FAILURE.to_owned()) }
        }
    }
}

/// Sample household used by the dashboard until real usage data exists.
#[must_use]
pub fn demo_input() -> SuggestionsInput {
    SuggestionsInput {
        user_id: "user-12345".to_owned(),
        historical_usage_data: json!({
            "daily_avg_kwh": 15,
            "peak_hours": "6-9pm",
            "lighting_usage_hours": 8,
            "thermostat_schedule": "22C day, 19C night",
        })
        .to_string(),
        preferences: json!({
            "automation_level": "high",
            "away_mode": "enabled",
            "preferred_temp_range": [20, 23],
        })
        .to_string(),
    }
}

#[cfg(test)]
#[path = "suggestions_test.rs"]
mod tests;
