//! Transport-independent contracts for the remote resources.
//!
//! Resource operations take an optional explicit token. `None` lets the
//! HTTP client resolve one from the session; `Some` is for callers that
//! already hold a token, such as server-side handlers reading it from a
//! request cookie.

use crate::domain::{ApiKey, AuthResponse, Credentials, Device, DevicePatch, NewDevice, User};
use crate::error::ApiError;

#[async_trait::async_trait]
pub trait AuthRepository: Send + Sync {
    /// Create an account and persist the issued token.
    async fn signup(&self, credentials: &Credentials, name: &str) -> Result<AuthResponse, ApiError>;

    /// Log in and persist the issued token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// Log out and clear the stored token.
    async fn logout(&self) -> Result<(), ApiError>;

    /// The signed-in user, or `None`. Never fails.
    async fn current_user(&self) -> Option<User>;

    /// Ask the API to email a one-time login code.
    async fn send_otp(&self, email: &str) -> Result<(), ApiError>;
}

#[async_trait::async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn get_devices(&self, token: Option<&str>) -> Result<Vec<Device>, ApiError>;

    async fn add_device(&self, device: &NewDevice, token: Option<&str>) -> Result<Device, ApiError>;

    async fn delete_device(&self, id: &str, token: Option<&str>) -> Result<(), ApiError>;

    async fn update_device(&self, id: &str, patch: &DevicePatch, token: Option<&str>) -> Result<Device, ApiError>;
}

#[async_trait::async_trait]
pub trait ApiKeyRepository: Send + Sync {
    async fn get_api_keys(&self, token: Option<&str>) -> Result<Vec<ApiKey>, ApiError>;

    async fn create_api_key(&self, name: &str, token: Option<&str>) -> Result<ApiKey, ApiError>;

    async fn delete_api_key(&self, id: &str, token: Option<&str>) -> Result<(), ApiError>;
}
