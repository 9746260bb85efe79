//! RFC 7807 problem details returned by the API on failure

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Field errors attached to validation failures, as `field: message`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ProblemDetail {
    /// Parse a response body, returning None unless it looks like a problem
    pub fn parse(body: &str) -> Option<Self> {
        let problem: Self = serde_json::from_str(body).ok()?;
        if problem.title.is_none() && problem.detail.is_none() && problem.status.is_none() {
            return None;
        }
        Some(problem)
    }

    /// Human-readable message: detail, falling back to title
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.title.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validation_problem() {
        let body = r#"{
            "type": "https://jobagent.com/errors/validation",
            "title": "Validation Error",
            "status": 400,
            "detail": "Validation failed",
            "instance": "/api/v1/auth/register",
            "timestamp": "2026-01-01T00:00:00Z",
            "errors": ["email: Invalid email format"]
        }"#;

        let problem = ProblemDetail::parse(body).unwrap();
        assert_eq!(
            problem.problem_type.as_deref(),
            Some("https://jobagent.com/errors/validation")
        );
        assert_eq!(problem.status, Some(400));
        assert_eq!(problem.message(), Some("Validation failed"));
        assert_eq!(problem.errors, vec!["email: Invalid email format"]);
    }

    #[test]
    fn test_message_falls_back_to_title() {
        let problem = ProblemDetail::parse(r#"{"title": "Forbidden", "status": 403}"#).unwrap();
        assert_eq!(problem.message(), Some("Forbidden"));
    }

    #[test]
    fn test_non_problem_bodies_are_rejected() {
        assert!(ProblemDetail::parse("Unauthorized").is_none());
        assert!(ProblemDetail::parse(r#"{"id": 1}"#).is_none());
        assert!(ProblemDetail::parse("[]").is_none());
    }
}
