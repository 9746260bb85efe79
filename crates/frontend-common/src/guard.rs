//! Navigation guard

use crate::routes::Route;
use jobagent_core::SessionManager;
use tracing::debug;
use yew_router::Routable;

/// Outcome of checking a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Runs before every route transition
///
/// A route is entered only if it is public or the session holds a token.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: SessionManager,
}

impl NavigationGuard {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn check(&self, to: &Route) -> GuardDecision {
        if to.requires_auth() && !self.session.is_authenticated() {
            debug!(target_path = %to.to_path(), "Unauthenticated, redirecting to login");
            GuardDecision::Redirect(Route::Login)
        } else {
            GuardDecision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobagent_core::MemoryTokenStore;
    use std::sync::Arc;

    fn guard(token: Option<&str>) -> NavigationGuard {
        let session = SessionManager::new(Arc::new(MemoryTokenStore::new()));
        if let Some(token) = token {
            session.set_token(token).unwrap();
        }
        NavigationGuard::new(session)
    }

    fn protected_routes() -> Vec<Route> {
        vec![
            Route::Root,
            Route::Dashboard,
            Route::CvUpload,
            Route::JobSearch,
            Route::JobDetail {
                id: "42".to_string(),
            },
            Route::MotivationLetters,
            Route::Applications,
            Route::NotFound,
        ]
    }

    #[test]
    fn test_protected_routes_redirect_without_token() {
        let guard = guard(None);
        for route in protected_routes() {
            assert_eq!(
                guard.check(&route),
                GuardDecision::Redirect(Route::Login),
                "{route:?}"
            );
        }
    }

    #[test]
    fn test_protected_routes_allowed_with_token() {
        let guard = guard(Some("abc123"));
        for route in protected_routes() {
            assert_eq!(guard.check(&route), GuardDecision::Allow, "{route:?}");
        }
    }

    #[test]
    fn test_public_routes_always_allowed() {
        for token in [None, Some("abc123")] {
            let guard = guard(token);
            assert_eq!(guard.check(&Route::Login), GuardDecision::Allow);
            assert_eq!(guard.check(&Route::Register), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_guard_follows_session_changes() {
        let guard = guard(None);
        assert_ne!(guard.check(&Route::Dashboard), GuardDecision::Allow);

        guard.session().set_token("abc123").unwrap();
        assert_eq!(guard.check(&Route::Dashboard), GuardDecision::Allow);

        guard.session().logout().unwrap();
        assert_eq!(
            guard.check(&Route::Dashboard),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_redirect_target_is_login_path() {
        let GuardDecision::Redirect(route) = guard(None).check(&Route::Dashboard) else {
            panic!("expected redirect");
        };
        assert_eq!(route.to_path(), jobagent_core::LOGIN_PATH);
    }
}
