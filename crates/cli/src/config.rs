//! CLI configuration utilities

use anyhow::{Context, Result};
use jobagent_core::{ClientConfig, FileTokenStore, SessionManager};
use jobagent_frontend_common::{AppContext, HistoryNavigator};
use jobagent_http::ApiClientBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load client configuration, then apply command-line overrides
pub fn load(
    path: Option<&Path>,
    origin: Option<String>,
    token_file: Option<PathBuf>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path).context("Failed to load configuration")?;

    if let Some(origin) = origin {
        config.origin = origin;
    }
    if token_file.is_some() {
        config.token_file = token_file;
    }

    config.validate()?;
    Ok(config)
}

/// Session file the CLI persists the token in
pub fn token_file(config: &ClientConfig) -> PathBuf {
    config
        .token_file
        .clone()
        .unwrap_or_else(FileTokenStore::default_path)
}

/// Restore the persisted session and wire it into a full application context
pub fn build_context(config: &ClientConfig) -> Result<(AppContext, Arc<HistoryNavigator>)> {
    let store = FileTokenStore::new(token_file(config));
    let session = SessionManager::restore(Arc::new(store));
    let navigator = Arc::new(HistoryNavigator::new());
    let app = AppContext::new(
        session,
        navigator.clone(),
        ApiClientBuilder::from_config(config),
    )?;

    Ok((app, navigator))
}
