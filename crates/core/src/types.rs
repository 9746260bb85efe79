use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub country: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

impl RegisterResponse {
    /// Identity to record in the session once the account exists
    pub fn to_user(&self) -> User {
        User {
            id: self.user_id.to_string(),
            name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Body of the service root endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub service: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl ServiceStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}
