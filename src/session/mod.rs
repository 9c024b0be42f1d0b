//! Session token lifecycle across two persistence channels.
//!
//! ARCHITECTURE
//! ============
//! The API issues one opaque bearer token at login/signup. It is written to
//! durable storage and mirrored into a `token` cookie, because some request
//! paths (server-rendered ones) can only see cookies while others read the
//! durable store. Both channels are kept in sync on login, signup, and
//! logout. A 401 only clears the durable channel.
//!
//! Backends are injected through [`TokenStorage`] so the lifecycle can be
//! exercised against memory in tests and against files in the CLI.
//!
//! No locking spans the two channels: concurrent login/logout calls race and
//! the last write wins.

pub mod file;
pub mod jar;
pub mod memory;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::SessionError;

pub use file::FileTokenStorage;
pub use jar::{CookieJarStorage, TOKEN_COOKIE, TOKEN_MAX_AGE_SECS, token_from_cookie_header};
pub use memory::MemoryTokenStorage;

/// One token persistence channel.
pub trait TokenStorage: Send + Sync {
    /// Current token, `None` when absent or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn store(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// SESSION
// =============================================================================

/// Durable token store plus its cookie mirror.
#[derive(Clone)]
pub struct Session {
    durable: Arc<dyn TokenStorage>,
    cookie: Arc<dyn TokenStorage>,
}

impl Session {
    #[must_use]
    pub fn new(durable: Arc<dyn TokenStorage>, cookie: Arc<dyn TokenStorage>) -> Self {
        Self { durable, cookie }
    }

    /// Session backed entirely by process memory.
    #[must_use]
    pub fn in_memory(secure_cookies: bool) -> Self {
        Self::new(Arc::new(MemoryTokenStorage::default()), Arc::new(CookieJarStorage::new(secure_cookies)))
    }

    /// Session persisted under the configured state directory.
    #[must_use]
    pub fn open(config: &ClientConfig) -> Self {
        Self::new(
            Arc::new(FileTokenStorage::new(config.token_path())),
            Arc::new(CookieJarStorage::persistent(config.cookie_path(), config.secure_cookies)),
        )
    }

    /// Resolve the bearer token: durable storage first, then the cookie.
    ///
    /// Unreadable backends count as "no token" so a broken store degrades to
    /// unauthenticated requests instead of failing them.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.durable_token().or_else(|| self.cookie_token())
    }

    #[must_use]
    pub fn durable_token(&self) -> Option<String> {
        read_channel(self.durable.as_ref(), "durable")
    }

    #[must_use]
    pub fn cookie_token(&self) -> Option<String> {
        read_channel(self.cookie.as_ref(), "cookie")
    }

    /// Write the token to both channels.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure.
    pub fn persist(&self, token: &str) -> Result<(), SessionError> {
        self.durable.store(token)?;
        self.cookie.store(token)?;
        debug!("session token persisted");
        Ok(())
    }

    /// Drop the durable token only. Used after a 401.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable backend cannot be written.
    pub fn clear_durable(&self) -> Result<(), SessionError> {
        self.durable.clear()
    }

    /// Drop the token from both channels. Both are attempted even if the
    /// first fails.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure.
    pub fn clear(&self) -> Result<(), SessionError> {
        let durable = self.durable.clear();
        let cookie = self.cookie.clear();
        debug!("session token cleared");
        durable.and(cookie)
    }
}

fn read_channel(storage: &dyn TokenStorage, channel: &'static str) -> Option<String> {
    match storage.load() {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = %e, channel, "token storage unreadable");
            None
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
