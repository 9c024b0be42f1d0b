//! Account types exchanged with the auth endpoints.

use serde::{Deserialize, Serialize};

/// Login or signup input. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn with_password(email: &str, password: &str) -> Self {
        Self { email: email.to_owned(), password: Some(password.to_owned()), otp: None }
    }

    #[must_use]
    pub fn with_otp(email: &str, otp: &str) -> Self {
        Self { email: email.to_owned(), password: None, otp: Some(otp.to_owned()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body returned by login and signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthResponse {
    /// The token worth persisting. Absent and empty tokens are skipped.
    #[must_use]
    pub fn issued_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Serialize)]
pub(crate) struct SignupRequest<'a> {
    #[serde(flatten)]
    pub credentials: &'a Credentials,
    pub name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct OtpRequest<'a> {
    pub email: &'a str,
}
