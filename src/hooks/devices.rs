//! Devices hook.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Fetch, Resource, ResourceState};
use crate::domain::Device;
use crate::error::ApiError;
use crate::repositories::DeviceRepository;

#[derive(Clone)]
pub struct UseDevices {
    resource: Resource<Device>,
}

impl UseDevices {
    /// Mount the hook and start fetching. Requires a tokio runtime.
    #[must_use]
    pub fn mount(repo: Arc<dyn DeviceRepository>) -> Self {
        let fetch: Fetch<Device> = Arc::new(move || {
            let repo = Arc::clone(&repo);
            Box::pin(async move { repo.get_devices(None).await })
        });
        Self { resource: Resource::mount(fetch) }
    }

    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
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
    pub fn snapshot(&self) -> ResourceState<Device> {
        self.resource.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Device>> {
        self.resource.subscribe()
    }

    pub async fn refresh(&self) {
        self.resource.refresh().await;
    }
}

#[cfg(test)]
#[path = "devices_test.rs"]
mod tests;
