use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Token must not be empty")]
    EmptyToken,

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Redirect loop while resolving {0}")]
    RedirectLoop(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Field-level messages carried by a validation failure
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Validation(messages) => messages,
            _ => &[],
        }
    }
}
