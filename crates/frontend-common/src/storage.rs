//! Browser `localStorage` token store

use gloo::storage::{LocalStorage, Storage};
use jobagent_core::{ACCESS_TOKEN_KEY, Error, Result, TokenStore};

/// Persists the raw token string under `access_token` in `localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTokenStore;

fn storage_error(operation: &str, err: wasm_bindgen::JsValue) -> Error {
    Error::Storage(format!("localStorage {operation} failed: {err:?}"))
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(ACCESS_TOKEN_KEY)
            .map_err(|e| storage_error("read", e))
    }

    fn save(&self, token: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(ACCESS_TOKEN_KEY, token)
            .map_err(|e| storage_error("write", e))
    }

    fn clear(&self) -> Result<()> {
        LocalStorage::raw()
            .remove_item(ACCESS_TOKEN_KEY)
            .map_err(|e| storage_error("remove", e))
    }
}
