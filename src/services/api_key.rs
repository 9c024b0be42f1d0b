//! API key service: list, create, delete.

use tracing::error;

use crate::domain::ApiKey;
use crate::domain::api_key::CreateApiKeyRequest;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::repositories::ApiKeyRepository;

#[derive(Clone)]
pub struct ApiKeyService {
    http: HttpClient,
}

impl ApiKeyService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl ApiKeyRepository for ApiKeyService {
    async fn get_api_keys(&self, token: Option<&str>) -> Result<Vec<ApiKey>, ApiError> {
        self.http.get_json("/api-keys", token).await
    }

    async fn create_api_key(&self, name: &str, token: Option<&str>) -> Result<ApiKey, ApiError> {
        self.http
            .post_json("/api-keys", &CreateApiKeyRequest { name }, token)
            .await
            .inspect_err(|e| error!(error = %e, name, "create API key failed"))
    }

    async fn delete_api_key(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.http.delete(&format!("/api-keys/{id}", id = urlencoding::encode(id)), token).await
    }
}

#[cfg(test)]
#[path = "api_key_test.rs"]
mod tests;
