//! Client error types

use super::problem::ProblemDetail;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed; the session has already been cleared
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Field-level validation failure, local or reported by the server
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The session token cannot be carried in an `Authorization` header
    #[error("Session token is not a valid header value")]
    InvalidToken,
}

impl ClientError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let problem = ProblemDetail::parse(body);
        let message = problem
            .as_ref()
            .and_then(ProblemDetail::message)
            .map(str::to_string)
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| status.to_string());

        match status.as_u16() {
            400 => match problem {
                Some(problem) if !problem.errors.is_empty() => Self::Validation(problem.errors),
                _ => Self::BadRequest(message),
            },
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the server rejected the session credentials
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the request hit the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::ServerError { status, .. } => Some(*status),
            Self::AuthenticationFailed(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::Conflict(_) => Some(409),
            Self::Validation(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::InvalidToken => None,
        }
    }
}

impl From<jobagent_core::Error> for ClientError {
    fn from(err: jobagent_core::Error) -> Self {
        match err {
            jobagent_core::Error::Validation(violations) => Self::Validation(violations),
            other => Self::Configuration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "Unauthorized"),
            ClientError::AuthenticationFailed(m) if m == "Unauthorized"
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, ""),
            ClientError::Forbidden(m) if m == "403 Forbidden"
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "missing"),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::CONFLICT, "dup"),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            ClientError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_problem_detail_message_is_used() {
        let body = r#"{"title": "Duplicate Resource", "status": 409, "detail": "Email already registered"}"#;
        let err = ClientError::from_status(StatusCode::CONFLICT, body);
        assert_eq!(err.to_string(), "Conflict: Email already registered");
    }

    #[test]
    fn test_bad_request_with_field_errors_is_validation() {
        let body = r#"{"title": "Validation Error", "status": 400, "detail": "Validation failed", "errors": ["country: Country is required"]}"#;
        let err = ClientError::from_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(&err, ClientError::Validation(v) if v == &["country: Country is required"]));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_bad_request_without_field_errors() {
        let body = r#"{"title": "Bad Request", "status": 400}"#;
        let err = ClientError::from_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ClientError::BadRequest(m) if m == "Bad Request"));
    }

    #[test]
    fn test_auth_expired_predicate() {
        assert!(ClientError::AuthenticationFailed(String::new()).is_auth_expired());
        assert!(!ClientError::Forbidden(String::new()).is_auth_expired());
    }

    #[test]
    fn test_core_validation_converts() {
        let err: ClientError = jobagent_core::Error::Validation(vec!["email: bad".into()]).into();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
