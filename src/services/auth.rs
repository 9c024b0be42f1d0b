//! Auth service backed by the `/auth` endpoints.
//!
//! Login and signup persist a returned token to both session channels.
//! Logout clears both channels, but only after the API accepted it; a failed
//! logout propagates and leaves storage as it was (apart from the durable
//! token a 401 already removed).

use tracing::debug;

use crate::domain::auth::{OtpRequest, SignupRequest};
use crate::domain::{AuthResponse, Credentials, User};
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::repositories::AuthRepository;

#[derive(Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn remember(&self, response: &AuthResponse) -> Result<(), ApiError> {
        if let Some(token) = response.issued_token() {
            self.http.session().persist(token)?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthRepository for AuthService {
    async fn signup(&self, credentials: &Credentials, name: &str) -> Result<AuthResponse, ApiError> {
        let body = SignupRequest { credentials, name };
        let response: AuthResponse = self.http.post_json("/auth/signup", &body, None).await?;
        self.remember(&response)?;
        Ok(response)
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.http.post_json("/auth/login", credentials, None).await?;
        self.remember(&response)?;
        Ok(response)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.http.post::<()>("/auth/logout", None, None).await?;
        self.http.session().clear()?;
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        let token = self.http.session().resolve_token()?;
        match self.http.get_json::<User>("/auth/me", Some(&token)).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "current user probe failed");
                None
            }
        }
    }

    async fn send_otp(&self, email: &str) -> Result<(), ApiError> {
        self.http.post("/auth/send-otp", Some(&OtpRequest { email }), None).await
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
