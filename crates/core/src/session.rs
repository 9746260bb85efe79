//! Session authority
//!
//! [`SessionManager`] is the one place that knows whether the user is signed
//! in. The HTTP client reads the token from it on every dispatch and reports
//! authentication failures back to it; the navigation guard asks it before
//! every route change. The token store is read once, when the session is
//! restored, and written through on every change after that.

use crate::error::{Error, Result};
use crate::storage::TokenStore;
use crate::types::User;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Path of the login entry point, shared by the guard and the 401 handler
pub const LOGIN_PATH: &str = "/login";

/// Snapshot of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Hook invoked when the server rejects the session
#[cfg_attr(test, mockall::automock)]
pub trait LoginRedirect: Send + Sync {
    /// Send the user to [`LOGIN_PATH`]
    fn redirect_to_login(&self);
}

type SharedRedirect = Arc<RwLock<Option<Arc<dyn LoginRedirect>>>>;

/// Shared handle to the session; clones observe the same state
#[derive(Clone)]
pub struct SessionManager {
    state: Arc<watch::Sender<Session>>,
    store: Arc<dyn TokenStore>,
    login_redirect: SharedRedirect,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create an empty session over `store` without reading it
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(watch::Sender::new(Session::default())),
            store,
            login_redirect: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a session seeded with whatever token `store` holds
    ///
    /// A store that cannot be read yields a signed-out session; the next
    /// `set_token` or `logout` rewrites it.
    pub fn restore(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(e) => {
                warn!("Persisted session is unreadable, starting signed out: {e}");
                None
            }
        };
        let manager = Self::new(store);
        if token.is_some() {
            debug!("Restored persisted session token");
            manager.state.send_replace(Session { token, user: None });
        }
        manager
    }

    /// Register the hook run after an authentication failure
    pub fn set_login_redirect(&self, redirect: Arc<dyn LoginRedirect>) {
        *self
            .login_redirect
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(redirect);
    }

    /// Remove the authentication failure hook
    pub fn clear_login_redirect(&self) {
        *self
            .login_redirect
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observe every change to the session
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Store `token` persistently and in memory
    ///
    /// Nothing changes in memory if persisting fails.
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::EmptyToken);
        }

        self.store.save(&token)?;
        self.state.send_modify(|session| session.token = Some(token));
        info!("Session authenticated");
        Ok(())
    }

    pub fn set_user(&self, user: User) {
        self.state.send_modify(|session| session.user = Some(user));
    }

    /// Clear token, user and the persisted token
    ///
    /// The in-memory session is cleared even when the store fails; the
    /// storage error is still returned.
    pub fn logout(&self) -> Result<()> {
        self.clear_memory();
        info!("Session logged out");
        self.store.clear()
    }

    /// Tear the session down after the server rejected it, then redirect
    pub fn handle_unauthorized(&self) {
        warn!("Server rejected the session credentials, clearing session");
        self.clear_memory();
        if let Err(e) = self.store.clear() {
            warn!("Failed to remove persisted token: {e}");
        }

        let redirect = self
            .login_redirect
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match redirect {
            Some(redirect) => redirect.redirect_to_login(),
            None => debug!("No login redirect registered"),
        }
    }

    fn clear_memory(&self) {
        self.state.send_replace(Session::default());
    }
}
