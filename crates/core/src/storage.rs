//! Persistent token storage
//!
//! The session persists exactly one value, the bearer token, under
//! [`ACCESS_TOKEN_KEY`]. Stores are only read when a session is restored at
//! start-up; afterwards they are written through by the session authority.

use crate::error::{Error, Result};
use std::sync::Mutex;

/// Key under which the bearer token is persisted
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Backing storage for the bearer token
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Persist the token, replacing any previous value
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the persisted token; removing an absent token is not an error
    fn clear(&self) -> Result<()>;
}

/// Process-local store, used by tests and short-lived tools
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| Error::Storage("memory token store poisoned".into()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTokenStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{ACCESS_TOKEN_KEY, TokenStore};
    use crate::error::{Error, Result};
    use serde_json::{Map, Value};
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;
    use tracing::{debug, warn};

    /// Token store backed by a JSON object file, keyed like browser storage
    #[derive(Debug, Clone)]
    pub struct FileTokenStore {
        path: PathBuf,
    }

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Default location under the user data directory
        pub fn default_path() -> PathBuf {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("jobagent")
                .join("session.json")
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_entries(&self) -> Result<Map<String, Value>> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(Map::new()),
                Ok(content) => match serde_json::from_str::<Value>(&content)? {
                    Value::Object(entries) => Ok(entries),
                    _ => Err(Error::Storage(format!(
                        "{} does not contain a JSON object",
                        self.path.display()
                    ))),
                },
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
                Err(e) => Err(e.into()),
            }
        }

        /// Entries to build a rewrite on; an unparseable file is replaced
        fn entries_for_rewrite(&self) -> Result<Map<String, Value>> {
            match self.read_entries() {
                Err(e @ (Error::Serialization(_) | Error::Storage(_))) => {
                    warn!("Replacing unreadable session file {:?}: {e}", self.path);
                    Ok(Map::new())
                }
                other => other,
            }
        }

        /// Write through a temp file in the same directory, then rename over
        /// the target so readers never see a partial file
        fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
            let dir = match self.path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            std::fs::create_dir_all(dir)?;

            let content = serde_json::to_string_pretty(entries)?;
            let mut file = NamedTempFile::new_in(dir)?;
            file.write_all(content.as_bytes())?;
            file.as_file().sync_all()?;
            file.persist(&self.path).map_err(|e| e.error)?;
            Ok(())
        }
    }

    impl TokenStore for FileTokenStore {
        fn load(&self) -> Result<Option<String>> {
            let entries = self.read_entries()?;
            Ok(entries
                .get(ACCESS_TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string))
        }

        fn save(&self, token: &str) -> Result<()> {
            let mut entries = self.entries_for_rewrite()?;
            entries.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(token.to_string()));
            self.write_entries(&entries)?;
            debug!("Persisted token to {:?}", self.path);
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            let corrupt = matches!(
                self.read_entries(),
                Err(Error::Serialization(_) | Error::Storage(_))
            );
            let mut entries = self.entries_for_rewrite()?;
            if entries.remove(ACCESS_TOKEN_KEY).is_some() || corrupt {
                self.write_entries(&entries)?;
                debug!("Removed persisted token from {:?}", self.path);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists_under_access_token_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::new(&path);

        store.save("abc123").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[ACCESS_TOKEN_KEY], "abc123");

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_file_store_clear_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"theme": "dark", "access_token": "abc123"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.load(), Err(Error::Storage(_))));
    }

    #[test]
    fn test_file_store_recovers_from_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"access_token": "abc"#).unwrap();
        let store = FileTokenStore::new(&path);

        assert!(matches!(store.load(), Err(Error::Serialization(_))));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        std::fs::write(&path, r#"{"access_token": "abc"#).unwrap();
        store.save("def456").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("def456"));
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));

        store.save("abc123").unwrap();
        store.save("def456").unwrap();
        store.clear().unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    }
}
