//! Server-side mutation entry points.
//!
//! DESIGN
//! ======
//! These run on behalf of an incoming request, so the bearer token comes
//! from that request's `Cookie` header rather than from local storage. Each
//! action silently does nothing when its required inputs are missing; the
//! caller re-renders either way. Service errors still propagate.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ApiKey, Device, DeviceState, DeviceStatus, DeviceType, NewDevice, Power};
use crate::error::ApiError;
use crate::repositories::{ApiKeyRepository, DeviceRepository};
use crate::session::token_from_cookie_header;

/// Fields submitted by the add-device form. Absent and empty are the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceForm {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub room: Option<String>,
    pub device_type: Option<String>,
    pub api_key_id: Option<String>,
}

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|v| !v.is_empty())
}

impl DeviceForm {
    /// The device to create, or `None` when a required field is missing.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an unknown device type.
    pub fn to_new_device(&self) -> Result<Option<NewDevice>, ApiError> {
        let (Some(_), Some(name), Some(room), Some(kind), Some(key)) = (
            present(self.user_id.as_ref()),
            present(self.name.as_ref()),
            present(self.room.as_ref()),
            present(self.device_type.as_ref()),
            present(self.api_key_id.as_ref()),
        ) else {
            return Ok(None);
        };
        let device_type: DeviceType = kind.parse().map_err(ApiError::Validation)?;
        Ok(Some(NewDevice {
            name: name.to_owned(),
            device_type,
            room: room.to_owned(),
            state: DeviceState::Power(Power::Off),
            status: DeviceStatus::Online,
            last_seen: None,
            icon_name: Some(device_type.icon_name().to_owned()),
            api_key_id: Some(key.to_owned()),
        }))
    }
}

#[derive(Clone)]
pub struct Actions {
    devices: Arc<dyn DeviceRepository>,
    api_keys: Arc<dyn ApiKeyRepository>,
}

impl Actions {
    #[must_use]
    pub fn new(devices: Arc<dyn DeviceRepository>, api_keys: Arc<dyn ApiKeyRepository>) -> Self {
        Self { devices, api_keys }
    }

    /// Create a device from form fields. `Ok(None)` means nothing was sent.
    ///
    /// # Errors
    ///
    /// Unknown device type or a service failure.
    pub async fn add_device(&self, form: &DeviceForm, cookie_header: Option<&str>) -> Result<Option<Device>, ApiError> {
        let Some(device) = form.to_new_device()? else {
            debug!("add_device skipped: incomplete form");
            return Ok(None);
        };
        let token = request_token(cookie_header);
        let created = self.devices.add_device(&device, token.as_deref()).await?;
        info!(device_id = %created.id, "device added");
        Ok(Some(created))
    }

    /// Returns `false` when skipped for a missing user.
    ///
    /// # Errors
    ///
    /// Service failure.
    pub async fn delete_device(&self, id: &str, user_id: &str, cookie_header: Option<&str>) -> Result<bool, ApiError> {
        if user_id.is_empty() {
            return Ok(false);
        }
        let token = request_token(cookie_header);
        self.devices.delete_device(id, token.as_deref()).await?;
        Ok(true)
    }

    /// Create a key named after the user. `Ok(None)` when skipped.
    ///
    /// # Errors
    ///
    /// Service failure.
    pub async fn generate_api_key(
        &self,
        user_id: &str,
        name: &str,
        cookie_header: Option<&str>,
    ) -> Result<Option<ApiKey>, ApiError> {
        if user_id.is_empty() {
            return Ok(None);
        }
        let token = request_token(cookie_header);
        let key = self.api_keys.create_api_key(name, token.as_deref()).await?;
        info!(api_key_id = %key.id, "api key generated");
        Ok(Some(key))
    }

    /// Returns `false` when skipped for a missing user.
    ///
    /// # Errors
    ///
    /// Service failure.
    pub async fn delete_api_key(&self, id: &str, user_id: &str, cookie_header: Option<&str>) -> Result<bool, ApiError> {
        if user_id.is_empty() {
            return Ok(false);
        }
        let token = request_token(cookie_header);
        self.api_keys.delete_api_key(id, token.as_deref()).await?;
        Ok(true)
    }
}

fn request_token(cookie_header: Option<&str>) -> Option<String> {
    cookie_header.and_then(token_from_cookie_header)
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
