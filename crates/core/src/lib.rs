//! JobAgent client core: session authority, token storage and domain types

pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;
pub mod validation;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use session::{LOGIN_PATH, LoginRedirect, Session, SessionManager};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileTokenStore;
pub use storage::{ACCESS_TOKEN_KEY, MemoryTokenStore, TokenStore};
pub use types::{RegisterRequest, RegisterResponse, ServiceStatus, User};
pub use validation::Validate;
