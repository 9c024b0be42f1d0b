//! Login use case. Rejects a missing email before any network call.

use std::sync::Arc;

use crate::domain::{AuthResponse, Credentials};
use crate::error::ApiError;
use crate::repositories::AuthRepository;

pub const EMAIL_REQUIRED: &str = "Email is required";

#[derive(Clone)]
pub struct LoginUseCase {
    auth: Arc<dyn AuthRepository>,
}

impl LoginUseCase {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthRepository>) -> Self {
        Self { auth }
    }

    /// Validate and delegate to [`AuthRepository::login`].
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a blank email, otherwise whatever the
    /// repository returns.
    pub async fn execute(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        if credentials.email.trim().is_empty() {
            return Err(ApiError::Validation(EMAIL_REQUIRED.to_owned()));
        }
        self.auth.login(credentials).await
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
