//! API keys hook with optimistic create/delete.
//!
//! A successful create appends the returned key and a successful delete
//! filters it out, both without refetching. A failed service call leaves
//! the list untouched and returns the error to the caller.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Fetch, Resource, ResourceState};
use crate::domain::ApiKey;
use crate::error::ApiError;
use crate::repositories::ApiKeyRepository;

#[derive(Clone)]
pub struct UseApiKeys {
    repo: Arc<dyn ApiKeyRepository>,
    resource: Resource<ApiKey>,
}

impl UseApiKeys {
    /// Mount the hook and start fetching. Requires a tokio runtime.
    #[must_use]
    pub fn mount(repo: Arc<dyn ApiKeyRepository>) -> Self {
        let fetch_repo = Arc::clone(&repo);
        let fetch: Fetch<ApiKey> = Arc::new(move || {
            let repo = Arc::clone(&fetch_repo);
            Box::pin(async move { repo.get_api_keys(None).await })
        });
        Self { repo, resource: Resource::mount(fetch) }
    }

    #[must_use]
    pub fn api_keys(&self) -> Vec<ApiKey> {
        self.resource.snapshot().items
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.resource.snapshot().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        self.resource.snapshot().error
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceState<ApiKey> {
        self.resource.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<ApiKey>> {
        self.resource.subscribe()
    }

    pub async fn refresh(&self) {
        self.resource.refresh().await;
    }

    /// Create a key and append it to the local list.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn create_api_key(&self, name: &str) -> Result<ApiKey, ApiError> {
        let key = self.repo.create_api_key(name, None).await?;
        let appended = key.clone();
        self.resource.update(move |keys| keys.push(appended));
        Ok(key)
    }

    /// Delete a key and drop it from the local list.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn delete_api_key(&self, id: &str) -> Result<(), ApiError> {
        self.repo.delete_api_key(id, None).await?;
        self.resource.update(|keys| keys.retain(|k| k.id != id));
        Ok(())
    }
}

#[cfg(test)]
#[path = "api_keys_test.rs"]
mod tests;
