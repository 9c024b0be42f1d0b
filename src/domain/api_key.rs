//! API keys that devices authenticate with.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::pick_id;

/// An API key with its identifier normalized to a string.
///
/// `id` may be empty when the API sent none of the known id fields; callers
/// must treat an empty id as "unknown" rather than as a real key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireApiKey")]
pub struct ApiKey {
    pub id: String,
    pub key: String,
    pub name: String,
    pub created_at: String,
    pub user_id: String,
}

/// Incoming key record. Id precedence: `id`, `api_key_id`, `_id`.
/// Timestamp precedence: `createdAt`, `created_at`, then now.
#[derive(Deserialize)]
struct WireApiKey {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    api_key_id: Option<Value>,
    #[serde(default, rename = "_id")]
    underscore_id: Option<Value>,
    #[serde(default)]
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "createdAt")]
    created_at_camel: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, rename = "userId")]
    user_id_camel: Option<Value>,
    #[serde(default)]
    user_id: Option<Value>,
}

impl From<WireApiKey> for ApiKey {
    fn from(wire: WireApiKey) -> Self {
        let created_at = [wire.created_at_camel, wire.created_at]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .unwrap_or_else(now_rfc3339);
        Self {
            id: pick_id(&[wire.id.as_ref(), wire.api_key_id.as_ref(), wire.underscore_id.as_ref()])
                .unwrap_or_default(),
            key: wire.key,
            name: wire.name,
            created_at,
            user_id: pick_id(&[wire.user_id_camel.as_ref(), wire.user_id.as_ref()]).unwrap_or_default(),
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

#[derive(Serialize)]
pub(crate) struct CreateApiKeyRequest<'a> {
    pub name: &'a str,
}

#[cfg(test)]
#[path = "api_key_test.rs"]
mod tests;
