//! Device service: list, add, delete, update.
//!
//! The list is decoded one record at a time. A record this client cannot
//! represent (an unknown type, a malformed state) is logged and skipped so
//! the rest of the list still renders.

use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{Device, DevicePatch, NewDevice, pick_id};
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::repositories::DeviceRepository;

#[derive(Clone)]
pub struct DeviceService {
    http: HttpClient,
}

impl DeviceService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl DeviceRepository for DeviceService {
    async fn get_devices(&self, token: Option<&str>) -> Result<Vec<Device>, ApiError> {
        let records: Vec<Value> = self.http.get_json("/devices", token).await?;
        Ok(records.into_iter().filter_map(decode_device).collect())
    }

    async fn add_device(&self, device: &NewDevice, token: Option<&str>) -> Result<Device, ApiError> {
        self.http
            .post_json("/devices/add", device, token)
            .await
            .inspect_err(|e| match e {
                ApiError::Status { status, body } => error!(status, body = %body, "add device failed"),
                other => error!(error = %other, "add device failed"),
            })
    }

    async fn delete_device(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.http.delete(&device_path(id), token).await
    }

    async fn update_device(&self, id: &str, patch: &DevicePatch, token: Option<&str>) -> Result<Device, ApiError> {
        self.http
            .patch_json(&device_path(id), patch, token)
            .await
    }
}

fn device_path(id: &str) -> String {
    format!("/devices/{id}", id = urlencoding::encode(id))
}

fn decode_device(record: Value) -> Option<Device> {
    let id = pick_id(&[record.get("id"), record.get("_id")]);
    serde_json::from_value(record)
        .inspect_err(|e| warn!(id = id.as_deref().unwrap_or("?"), error = %e, "skipping undecodable device"))
        .ok()
}

#[cfg(test)]
#[path = "device_test.rs"]
mod tests;
