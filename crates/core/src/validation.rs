//! Client-side validation, mirroring the rules the API enforces

use crate::error::{Error, Result};
use crate::types::RegisterRequest;

/// Types that can be checked before they are sent to the API
pub trait Validate {
    /// Returns every violation found, formatted as `field: message`
    fn violations(&self) -> Vec<String>;

    /// Ok(()) if valid, otherwise `Error::Validation` listing all violations
    fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(violations))
        }
    }
}

impl Validate for RegisterRequest {
    fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();

        collect(
            &mut out,
            validators::validate_not_blank(&self.email, "email", "Email is required"),
        );
        if !self.email.is_empty() {
            collect(&mut out, validators::validate_email(&self.email, "email"));
        }

        collect(
            &mut out,
            validators::validate_not_blank(&self.password, "password", "Password is required"),
        );
        collect(
            &mut out,
            validators::validate_length(
                &self.password,
                8,
                128,
                "password",
                "Password must be 8-128 characters",
            ),
        );

        collect(
            &mut out,
            validators::validate_not_blank(&self.full_name, "fullName", "Full name is required"),
        );
        collect(
            &mut out,
            validators::validate_length(
                &self.full_name,
                2,
                255,
                "fullName",
                "Name must be 2-255 characters",
            ),
        );

        collect(
            &mut out,
            validators::validate_not_blank(&self.country, "country", "Country is required"),
        );
        collect(&mut out, validators::validate_country_code(&self.country, "country"));

        out
    }
}

fn collect(out: &mut Vec<String>, result: std::result::Result<(), String>) {
    if let Err(message) = result {
        out.push(message);
    }
}

/// Common validation helpers
pub mod validators {
    /// Validate that a string has at least one non-whitespace character
    pub fn validate_not_blank(value: &str, field: &str, message: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err(format!("{field}: {message}"));
        }
        Ok(())
    }

    /// Validate character length within an inclusive range
    pub fn validate_length(
        value: &str,
        min: usize,
        max: usize,
        field: &str,
        message: &str,
    ) -> Result<(), String> {
        let len = value.chars().count();
        if len < min || len > max {
            return Err(format!("{field}: {message}"));
        }
        Ok(())
    }

    /// Validate email format (basic check)
    pub fn validate_email(email: &str, field: &str) -> Result<(), String> {
        let mut parts = email.split('@');
        let valid = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            _ => false,
        };
        if !valid {
            return Err(format!("{field}: Invalid email format"));
        }
        Ok(())
    }

    /// Validate the length of an ISO 3166-1 alpha-2 country code
    ///
    /// Only the length is checked, the same rule the API applies.
    pub fn validate_country_code(code: &str, field: &str) -> Result<(), String> {
        if code.chars().count() != 2 {
            return Err(format!(
                "{field}: Country must be ISO 3166-1 alpha-2 (e.g., US, DE)"
            ));
        }
        Ok(())
    }

    /// Validate URL format
    pub fn validate_url(url: &str, field: &str) -> Result<(), String> {
        let parsed = url::Url::parse(url).map_err(|e| format!("{field}: invalid URL - {e}"))?;
        if parsed.cannot_be_a_base() {
            return Err(format!("{field}: must be an absolute URL"));
        }
        Ok(())
    }

    /// Validate that a value is within range
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<(), String> {
        if value < min || value > max {
            return Err(format!("{field}: must be between {min} and {max}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "correct-horse".to_string(),
            full_name: "Ada Lovelace".to_string(),
            country: "GB".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_blank_email_reports_required_only() {
        let request = RegisterRequest {
            email: String::new(),
            ..valid_request()
        };
        assert_eq!(request.violations(), vec!["email: Email is required"]);
    }

    #[test]
    fn test_malformed_email() {
        for email in ["ada", "ada@", "@example.com", "a@b@c", "ada @example.com"] {
            let request = RegisterRequest {
                email: email.to_string(),
                ..valid_request()
            };
            assert_eq!(
                request.violations(),
                vec!["email: Invalid email format"],
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_length_bounds() {
        let short = RegisterRequest {
            password: "1234567".to_string(),
            ..valid_request()
        };
        assert_eq!(
            short.violations(),
            vec!["password: Password must be 8-128 characters"]
        );

        let exact = RegisterRequest {
            password: "12345678".to_string(),
            ..valid_request()
        };
        assert!(exact.validate().is_ok());

        let long = RegisterRequest {
            password: "x".repeat(129),
            ..valid_request()
        };
        assert_eq!(long.violations().len(), 1);
    }

    #[test]
    fn test_empty_password_reports_both_rules() {
        let request = RegisterRequest {
            password: String::new(),
            ..valid_request()
        };
        assert_eq!(
            request.violations(),
            vec![
                "password: Password is required",
                "password: Password must be 8-128 characters",
            ]
        );
    }

    #[test]
    fn test_country_must_be_two_characters() {
        for country in ["G", "GBR"] {
            let request = RegisterRequest {
                country: country.to_string(),
                ..valid_request()
            };
            assert_eq!(request.violations().len(), 1, "country {country:?}");
        }
    }

    #[test]
    fn test_country_accepts_what_the_api_accepts() {
        for country in ["DE", "us", "1A"] {
            let request = RegisterRequest {
                country: country.to_string(),
                ..valid_request()
            };
            assert!(request.violations().is_empty(), "country {country:?}");
        }
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let request = RegisterRequest {
            email: "nope".to_string(),
            password: "short".to_string(),
            full_name: "A".to_string(),
            country: "USA".to_string(),
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.violations().len(), 4);
        assert!(err.to_string().starts_with("Validation failed: email:"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validators::validate_url("http://localhost:8080", "origin").is_ok());
        assert!(validators::validate_url("/api/v1", "origin").is_err());
        assert!(validators::validate_url("mailto:ada@example.com", "origin").is_err());
    }
}
