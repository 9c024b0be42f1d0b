//! Stateful data-fetching bindings for UI layers.
//!
//! ARCHITECTURE
//! ============
//! A hook owns the state a view renders from (`items`, `loading`, `error`)
//! and publishes it through a `tokio::sync::watch` channel. Mounting starts
//! a fetch immediately; `refresh` re-runs it on demand, e.g. after a
//! mutation made elsewhere. Hook instances share nothing, so two views of
//! the same resource can briefly disagree.
//!
//! ORDERING
//! ========
//! Each fetch takes a sequence number when it is issued; the mount fetch
//! takes its number inside `mount`, before any caller can `refresh`. A
//! result is applied
//! only if it is newer than the last applied one, so a slow early fetch can
//! never overwrite the outcome of a later one. `loading` stays true until
//! the newest issued fetch has landed. In-flight fetches are never
//! cancelled.

pub mod api_keys;
pub mod auth;
pub mod devices;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::BoxFuture;
use tokio::sync::watch;
use tracing::debug;

use crate::error::ApiError;

pub use api_keys::UseApiKeys;
pub use auth::{AuthState, UseAuth};
pub use devices::UseDevices;

/// Produces one fresh copy of the resource list.
pub type Fetch<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<T>, ApiError>> + Send + Sync>;

/// What a view renders from.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> ResourceState<T> {
    fn loading() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

// =============================================================================
// RESOURCE
// =============================================================================

struct Inner<T> {
    state: watch::Sender<ResourceState<T>>,
    fetch: Fetch<T>,
    issued: AtomicU64,
    applied: AtomicU64,
}

/// A fetched list plus its loading/error tracking.
pub struct Resource<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Clone + Send + Sync + 'static> Resource<T> {
    /// Start in the loading state and spawn the first fetch.
    ///
    /// Must be called from inside a tokio runtime.
    #[must_use]
    pub fn mount(fetch: Fetch<T>) -> Self {
        let (state, _) = watch::channel(ResourceState::loading());
        let resource = Self {
            inner: Arc::new(Inner { state, fetch, issued: AtomicU64::new(0), applied: AtomicU64::new(0) }),
        };
        let seq = resource.issue();
        let pending = (resource.inner.fetch)();
        let first = resource.clone();
        tokio::spawn(async move {
            let result = pending.await;
            first.apply(seq, result);
        });
        resource
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Re-run the fetch and apply its outcome unless a newer one already
    /// landed.
    pub async fn refresh(&self) {
        let seq = self.issue();
        let result = (self.inner.fetch)().await;
        self.apply(seq, result);
    }

    /// Reserve the next sequence number and mark the state loading.
    fn issue(&self) -> u64 {
        let seq = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|s| s.loading = true);
        seq
    }

    fn apply(&self, seq: u64, result: Result<Vec<T>, ApiError>) {
        let inner = &self.inner;
        inner.state.send_if_modified(|s| {
            if seq <= inner.applied.load(Ordering::SeqCst) {
                debug!(seq, "discarding stale fetch result");
                return false;
            }
            inner.applied.store(seq, Ordering::SeqCst);
            match result {
                Ok(items) => {
                    s.items = items;
                    s.error = None;
                }
                Err(e) => s.error = Some(e),
            }
            s.loading = seq < inner.issued.load(Ordering::SeqCst);
            true
        });
    }

    /// Apply a local change to the list without refetching.
    pub fn update(&self, change: impl FnOnce(&mut Vec<T>)) {
        self.inner.state.send_modify(|s| change(&mut s.items));
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
