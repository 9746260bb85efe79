//! Application wiring
//!
//! One [`SessionManager`] is shared by the API client and the navigation
//! guard, and one navigator serves both the router and the session's login
//! redirect.

use crate::guard::NavigationGuard;
use crate::navigator::Navigator;
use crate::router::Router;
use jobagent_core::{LoginRedirect, SessionManager};
use jobagent_http::{ApiClient, ApiClientBuilder, ClientError};
use std::sync::Arc;

/// Everything a page needs to talk to the API and move between routes
#[derive(Clone)]
pub struct AppContext {
    pub session: SessionManager,
    pub api: ApiClient,
    pub router: Router,
}

impl AppContext {
    /// Wire a session, a navigator and a client configuration together
    ///
    /// The builder's own session, if any, is replaced by `session`.
    pub fn new<N>(
        session: SessionManager,
        navigator: Arc<N>,
        client: ApiClientBuilder,
    ) -> Result<Self, ClientError>
    where
        N: Navigator + LoginRedirect + 'static,
    {
        session.set_login_redirect(navigator.clone());
        let api = client.session(session.clone()).build()?;
        let router = Router::new(NavigationGuard::new(session.clone()), navigator);

        Ok(Self {
            session,
            api,
            router,
        })
    }

    /// Context for the browser: `localStorage` session, location-driven
    /// navigation, API on the page's own origin
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Result<Self, ClientError> {
        use crate::navigator::BrowserNavigator;
        use crate::storage::LocalTokenStore;

        let session = SessionManager::restore(Arc::new(LocalTokenStore));
        let client = ApiClientBuilder::default().origin(browser_origin());
        Self::new(session, Arc::new(BrowserNavigator), client)
    }
}

/// Origin of the current page, or the default API origin outside a browser
pub fn browser_origin() -> String {
    #[cfg(target_arch = "wasm32")]
    if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
        return origin;
    }

    jobagent_core::config::DEFAULT_ORIGIN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::{HistoryNavigator, NavigationKind};
    use crate::routes::Route;
    use jobagent_core::{MemoryTokenStore, TokenStore};
    use serde_json::Value;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn context(
        server: &MockServer,
        store: Arc<MemoryTokenStore>,
    ) -> (AppContext, Arc<HistoryNavigator>) {
        let session = SessionManager::restore(store);
        let navigator = Arc::new(HistoryNavigator::new());
        let client = ApiClient::builder().origin(server.uri());
        let app = AppContext::new(session, navigator.clone(), client).unwrap();
        (app, navigator)
    }

    #[tokio::test]
    async fn test_login_then_fetch_jobs() {
        let server = MockServer::start().await;
        let (app, _) = context(&server, Arc::new(MemoryTokenStore::new())).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/jobs"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(app.router.resolve("/jobs").unwrap().route, Route::Login);

        app.session.set_token("abc123").unwrap();
        assert_eq!(app.router.resolve("/jobs").unwrap().route, Route::JobSearch);

        let _: Value = app.api.get("/jobs").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_session_redirects_and_locks_router() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryTokenStore::with_token("expired"));
        let (app, navigator) = context(&server, store.clone()).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/applications"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        app.router.navigate("/applications").unwrap();
        let result: Result<Value, _> = app.api.get("/applications").await;

        assert!(result.unwrap_err().is_auth_expired());
        assert_eq!(store.load().unwrap(), None);
        let last = navigator.last().unwrap();
        assert_eq!(last.path, "/login");
        assert_eq!(last.kind, NavigationKind::Reload);
        assert_eq!(app.router.resolve("/applications").unwrap().route, Route::Login);
    }

    #[test]
    fn test_browser_origin_outside_browser() {
        assert_eq!(browser_origin(), "http://localhost:8080");
    }
}
