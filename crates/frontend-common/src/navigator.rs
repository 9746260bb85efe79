//! Where navigation decisions are carried out
//!
//! A navigator performs the router's client-side transitions and also
//! serves as the session's [`LoginRedirect`], so both ways of ending up on
//! the login page go through the same object.

use crate::routes::Route;
use jobagent_core::{LOGIN_PATH, LoginRedirect};
use std::sync::{Mutex, PoisonError};
use yew_router::Routable;

/// Performs route transitions that have already passed the guard
pub trait Navigator: Send + Sync {
    /// Client-side transition, keeping application state
    fn push(&self, route: &Route);

    /// Path currently shown, if known
    fn current_path(&self) -> Option<String>;
}

/// How a location was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Router transition
    Push,
    /// Full reset after the server rejected the session
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub path: String,
    pub kind: NavigationKind,
}

/// In-memory history for native front ends and tests
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<NavigationEntry>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<NavigationEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<NavigationEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn record(&self, path: String, kind: NavigationKind) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(NavigationEntry { path, kind });
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: &Route) {
        self.record(route.to_path(), NavigationKind::Push);
    }

    fn current_path(&self) -> Option<String> {
        self.last().map(|entry| entry.path)
    }
}

impl LoginRedirect for HistoryNavigator {
    fn redirect_to_login(&self) {
        self.record(LOGIN_PATH.to_string(), NavigationKind::Reload);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserNavigator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Navigator;
    use crate::routes::Route;
    use jobagent_core::{LOGIN_PATH, LoginRedirect};
    use tracing::warn;
    use yew_router::Routable;
    use yew_router::history::{BrowserHistory, History};

    /// Drives the browser location
    ///
    /// Router transitions go through the history API so mounted routers
    /// observe them. A rejected session triggers a full page load of the
    /// login page, discarding all in-memory client state.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserNavigator;

    impl Navigator for BrowserNavigator {
        fn push(&self, route: &Route) {
            BrowserHistory::new().push(route.to_path());
        }

        fn current_path(&self) -> Option<String> {
            Some(BrowserHistory::new().location().path().to_string())
        }
    }

    impl LoginRedirect for BrowserNavigator {
        fn redirect_to_login(&self) {
            let Some(window) = web_sys::window() else {
                warn!("No window available for login redirect");
                return;
            };
            if window.location().set_href(LOGIN_PATH).is_err() {
                warn!("Failed to navigate to {LOGIN_PATH}");
            }
        }
    }
}
