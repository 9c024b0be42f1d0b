//! Cookie mirror of the session token.
//!
//! DESIGN
//! ======
//! The mirror is a single `token` cookie with `path=/`, a seven day
//! `max-age`, `SameSite=Lax`, and `Secure` on HTTPS deployments. An absolute
//! `expires` is stamped alongside `max-age` so a persisted jar can tell when
//! the cookie has lapsed without knowing when it was written. Clearing
//! replaces the cookie with an empty one that expired at the Unix epoch,
//! which is what a browser would be sent to delete it.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use super::TokenStorage;
use crate::error::SessionError;

pub const TOKEN_COOKIE: &str = "token";
pub const TOKEN_MAX_AGE_SECS: i64 = 604_800;

/// Extract the session token from a raw `Cookie` request header.
///
/// Values are percent-decoded. An empty `token=` counts as absent.
#[must_use]
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// JAR
// =============================================================================

/// Token cookie holder, optionally persisted to a file as a `Set-Cookie` line.
#[derive(Debug)]
pub struct CookieJarStorage {
    secure: bool,
    cookie: RwLock<Option<Cookie<'static>>>,
    path: Option<PathBuf>,
}

impl CookieJarStorage {
    #[must_use]
    pub fn new(secure: bool) -> Self {
        Self { secure, cookie: RwLock::new(None), path: None }
    }

    #[must_use]
    pub fn persistent(path: impl Into<PathBuf>, secure: bool) -> Self {
        Self { secure, cookie: RwLock::new(None), path: Some(path.into()) }
    }

    /// The `Set-Cookie` value reflecting the last store or clear.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted jar cannot be read.
    pub fn set_cookie_header(&self) -> Result<Option<String>, SessionError> {
        Ok(self.current()?.map(|c| c.encoded().to_string()))
    }

    fn token_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token.to_owned()))
            .path("/")
            .max_age(Duration::seconds(TOKEN_MAX_AGE_SECS))
            .expires(OffsetDateTime::now_utc() + Duration::seconds(TOKEN_MAX_AGE_SECS))
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    fn removal_cookie() -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, ""))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .same_site(SameSite::Lax)
            .build()
    }

    fn current(&self) -> Result<Option<Cookie<'static>>, SessionError> {
        let Some(path) = &self.path else {
            let guard = self.cookie.read().map_err(|_| SessionError::Poisoned)?;
            return Ok(guard.clone());
        };
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let line = raw.trim().to_owned();
        if line.is_empty() {
            return Ok(None);
        }
        Cookie::parse_encoded(line)
            .map(Some)
            .map_err(|e| SessionError::Corrupt(e.to_string()))
    }

    fn replace(&self, cookie: Cookie<'static>) -> Result<(), SessionError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{}\n", cookie.encoded()))?;
        }
        let mut guard = self.cookie.write().map_err(|_| SessionError::Poisoned)?;
        *guard = Some(cookie);
        Ok(())
    }
}

impl TokenStorage for CookieJarStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let Some(cookie) = self.current()? else {
            return Ok(None);
        };
        if cookie
            .expires_datetime()
            .is_some_and(|at| at <= OffsetDateTime::now_utc())
        {
            return Ok(None);
        }
        Ok(Some(cookie.value().to_owned()).filter(|v| !v.is_empty()))
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        self.replace(self.token_cookie(token))
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.replace(Self::removal_cookie())
    }
}

#[cfg(test)]
#[path = "jar_test.rs"]
mod tests;
