//! HTTP client. The single point of outbound request configuration.
//!
//! DESIGN
//! ======
//! Every request resolves a bearer token in this order: an explicit token
//! passed by the caller (server-side paths that already extracted one from
//! a request cookie), then the durable store, then the cookie mirror. With
//! no token the request goes out unauthenticated.
//!
//! A 401 response clears the durable token before the error is returned.
//! Nothing is retried and nothing redirects; every failure reaches the
//! calling service unchanged.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpClient {
    /// Build a client for the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.trim_end_matches('/').to_owned(), session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `GET` and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Transport, status, and decode failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        let text = self.send(Method::GET, path, None::<&()>, token).await?;
        decode(&text)
    }

    /// `POST` a JSON body and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Transport, status, and decode failures.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(Method::POST, path, Some(body), token).await?;
        decode(&text)
    }

    /// `PATCH` a JSON body and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Transport, status, and decode failures.
    pub async fn patch_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(Method::PATCH, path, Some(body), token).await?;
        decode(&text)
    }

    /// `POST` with an optional body, ignoring whatever the API answers.
    ///
    /// # Errors
    ///
    /// Transport and status failures.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>, token: Option<&str>) -> Result<(), ApiError> {
        self.send(Method::POST, path, body, token).await.map(drop)
    }

    /// `DELETE`, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Transport and status failures.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None::<&()>, token).await.map(drop)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let bearer = token
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .or_else(|| self.session.resolve_token());
        debug!(%method, path, authenticated = bearer.is_some(), "api request");

        let mut request = self.http.request(method, url);
        if let Some(token) = &bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.drop_durable_token(path);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            debug!(path, status = status.as_u16(), "api error response");
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }

    fn drop_durable_token(&self, path: &str) {
        match self.session.clear_durable() {
            Ok(()) => warn!(path, "unauthorized response; durable token cleared"),
            Err(e) => warn!(path, error = %e, "unauthorized response; durable token clear failed"),
        }
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
