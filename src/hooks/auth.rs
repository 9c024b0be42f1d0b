//! Auth hook: the signed-in user plus the initial probe's loading flag.
//!
//! Mounting probes `current_user` once. `loading` starts true and turns
//! false when that probe settles, whatever its outcome. A login, signup, or
//! logout that completes first wins over a probe that lands later.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::domain::{Credentials, User};
use crate::error::ApiError;
use crate::repositories::AuthRepository;
use crate::use_cases::LoginUseCase;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct UseAuth {
    auth: Arc<dyn AuthRepository>,
    login_use_case: LoginUseCase,
    state: Arc<watch::Sender<AuthState>>,
    epoch: Arc<AtomicU64>,
}

impl UseAuth {
    /// Mount the hook and start the current-user probe. Requires a tokio
    /// runtime.
    #[must_use]
    pub fn mount(auth: Arc<dyn AuthRepository>) -> Self {
        let (state, _) = watch::channel(AuthState { user: None, loading: true });
        let hook = Self {
            login_use_case: LoginUseCase::new(Arc::clone(&auth)),
            auth,
            state: Arc::new(state),
            epoch: Arc::new(AtomicU64::new(0)),
        };

        let probe = hook.clone();
        tokio::spawn(async move {
            let user = probe.auth.current_user().await;
            let epoch = &probe.epoch;
            probe.state.send_modify(|s| {
                // Read under the sender lock so it orders against `set_user`.
                if epoch.load(Ordering::SeqCst) == 0 {
                    s.user = user;
                }
                s.loading = false;
            });
        });
        hook
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// # Errors
    ///
    /// Validation or API failure; the current user is unchanged.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self.login_use_case.execute(credentials).await?;
        self.set_user(response.user);
        Ok(())
    }

    /// # Errors
    ///
    /// API failure; the current user is unchanged.
    pub async fn signup(&self, credentials: &Credentials, name: &str) -> Result<(), ApiError> {
        let response = self.auth.signup(credentials, name).await?;
        self.set_user(response.user);
        Ok(())
    }

    /// # Errors
    ///
    /// API failure; the user stays signed in locally.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.auth.logout().await?;
        self.set_user(None);
        Ok(())
    }

    fn set_user(&self, user: Option<User>) {
        let epoch = &self.epoch;
        self.state.send_modify(|s| {
            epoch.fetch_add(1, Ordering::SeqCst);
            s.user = user;
        });
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
