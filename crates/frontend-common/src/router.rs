//! Path resolution and navigation

use crate::guard::{GuardDecision, NavigationGuard};
use crate::navigator::Navigator;
use crate::routes::Route;
use jobagent_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Redirect hops followed before a resolution is abandoned
pub const MAX_REDIRECTS: usize = 8;

/// Where a requested location ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub requested: Route,
    pub route: Route,
}

impl Resolution {
    pub fn is_redirect(&self) -> bool {
        self.requested != self.route
    }
}

/// Resolves locations through static redirects and the guard
#[derive(Clone)]
pub struct Router {
    guard: NavigationGuard,
    navigator: Arc<dyn Navigator>,
}

impl Router {
    pub fn new(guard: NavigationGuard, navigator: Arc<dyn Navigator>) -> Self {
        Self { guard, navigator }
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Work out which route a location leads to, without navigating
    ///
    /// # Errors
    ///
    /// Returns `Error::RedirectLoop` if redirects do not settle within
    /// [`MAX_REDIRECTS`] hops
    pub fn resolve(&self, location: &str) -> Result<Resolution> {
        let requested = Route::parse(location);
        let mut current = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            if let Some(target) = current.descriptor().redirect {
                current = Route::parse(target);
                continue;
            }

            match self.guard.check(&current) {
                GuardDecision::Allow => {
                    return Ok(Resolution {
                        requested,
                        route: current,
                    });
                }
                GuardDecision::Redirect(target) => current = target,
            }
        }

        Err(Error::RedirectLoop(location.to_string()))
    }

    /// Resolve `location` and move the navigator to the result
    pub fn navigate(&self, location: &str) -> Result<Resolution> {
        let resolution = self.resolve(location)?;
        if resolution.is_redirect() {
            debug!(from = %location, to = ?resolution.route, "Navigation redirected");
        }
        self.navigator.push(&resolution.route);
        Ok(resolution)
    }

    pub fn current_path(&self) -> Option<String> {
        self.navigator.current_path()
    }
}
