//! Client configuration

use crate::error::{Error, Result};
use crate::validation::validators;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path prefix of every API endpoint
pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

/// Request timeout applied to every API call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "JOBAGENT";

/// Settings for reaching the JobAgent API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the API server
    pub origin: String,

    /// Path prefix prepended to every API call
    pub api_base_path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Overrides the default user agent
    pub user_agent: Option<String>,

    /// Where native clients persist the token
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            api_base_path: DEFAULT_API_BASE_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            token_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional file, then `JOBAGENT_*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder.add_source(environment).build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a working client
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if let Err(e) = validators::validate_url(&self.origin, "origin") {
            violations.push(e);
        }
        if !self.api_base_path.starts_with('/') {
            violations.push("api_base_path: must start with '/'".to_string());
        }
        if let Err(e) = validators::validate_range(self.timeout_secs, 1, 3600, "timeout_secs") {
            violations.push(e);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfig(violations.join("; ")))
        }
    }

    /// Origin joined with the API base path, without a trailing slash
    pub fn api_base_url(&self) -> String {
        join_base(&self.origin, &self.api_base_path)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Join an origin and a path prefix, normalizing slashes
pub fn join_base(origin: &str, base_path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let base_path = base_path.trim_matches('/');
    if base_path.is_empty() {
        origin.to_string()
    } else {
        format!("{origin}/{base_path}")
    }
}
