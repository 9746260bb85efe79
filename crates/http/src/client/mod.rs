//! JobAgent API client

pub mod auth;
pub mod error;
pub mod problem;

use error::ClientError;
use jobagent_core::SessionManager;
use jobagent_core::config::{ClientConfig, DEFAULT_API_BASE_PATH, join_base};
#[cfg(not(target_arch = "wasm32"))]
use jobagent_core::config::DEFAULT_TIMEOUT_SECS;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

/// JobAgent API client
///
/// Requests are resolved against `<origin>/api/v1`. The bearer token is read
/// from the session when a request is dispatched, not when it is built.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    origin: String,
    base_url: String,
    session: SessionManager,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with the default base path and timeout
    pub fn new(origin: impl Into<String>, session: SessionManager) -> Result<Self, ClientError> {
        Self::builder().origin(origin).session(session).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL all API paths are appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The session this client authenticates with
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Create a request builder for an API path
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Dispatch a request and decode a JSON response
    ///
    /// A 401 clears the session and triggers the login redirect before the
    /// error is returned. Every other failure is returned unchanged.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let mut request = request.build()?;
        self.authorize(&mut request)?;
        debug!(method = %request.method(), url = %request.url(), "Dispatching request");

        let response = self.client.execute(request).await?;
        self.handle_response(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    /// Attach the bearer token, if the session holds one
    ///
    /// A token that is not a legal header value fails the request instead of
    /// sending it unauthenticated.
    fn authorize(&self, request: &mut reqwest::Request) -> Result<(), ClientError> {
        let Some(token) = self.session.token() else {
            return Ok(());
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            warn!("Session token is not a valid header value, refusing to send request");
            ClientError::InvalidToken
        })?;
        value.set_sensitive(true);
        request.headers_mut().insert(header::AUTHORIZATION, value);
        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            if body.is_empty() {
                Ok(serde_json::from_slice(b"null")?)
            } else {
                Ok(serde_json::from_slice(&body)?)
            }
        } else {
            if status == StatusCode::UNAUTHORIZED {
                self.session.handle_unauthorized();
            }
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    origin: Option<String>,
    api_base_path: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    timeout: Option<Duration>,
    #[cfg(not(target_arch = "wasm32"))]
    user_agent: Option<String>,
    session: Option<SessionManager>,
}

impl ApiClientBuilder {
    /// Start from a loaded configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        let builder = Self::default()
            .origin(&config.origin)
            .api_base_path(&config.api_base_path);

        // The browser owns timeouts and the user agent
        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            let builder = builder.timeout(config.timeout());
            match &config.user_agent {
                Some(agent) => builder.user_agent(agent),
                None => builder,
            }
        };

        builder
    }

    /// Set the server origin (scheme, host and port)
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Override the `/api/v1` path prefix
    pub fn api_base_path(mut self, path: impl Into<String>) -> Self {
        self.api_base_path = Some(path.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[cfg(not(target_arch = "wasm32"))]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the session that supplies the bearer token
    pub fn session(mut self, session: SessionManager) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let origin = self
            .origin
            .ok_or_else(|| ClientError::Configuration("origin is required".into()))?;
        let session = self
            .session
            .ok_or_else(|| ClientError::Configuration("session is required".into()))?;

        reqwest::Url::parse(&origin)
            .map_err(|e| ClientError::Configuration(format!("invalid origin {origin:?}: {e}")))?;

        let origin = origin.trim_end_matches('/').to_string();
        let base_path = self
            .api_base_path
            .unwrap_or_else(|| DEFAULT_API_BASE_PATH.to_string());
        let base_url = join_base(&origin, &base_path);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client_builder = ClientBuilder::new().default_headers(headers);

        #[cfg(not(target_arch = "wasm32"))]
        let client_builder = {
            let timeout = self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
            let user_agent = self
                .user_agent
                .unwrap_or_else(|| concat!("jobagent-client/", env!("CARGO_PKG_VERSION")).into());
            client_builder.timeout(timeout).user_agent(user_agent)
        };

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            origin,
            base_url,
            session,
        })
    }
}
