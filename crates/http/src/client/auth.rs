//! Account endpoints

use super::{ApiClient, ClientError};
use jobagent_core::{RegisterRequest, RegisterResponse, ServiceStatus, Validate};
use reqwest::Method;
use tracing::info;

impl ApiClient {
    /// Create an account
    ///
    /// The request is validated with the server's rules first; nothing is
    /// sent if any field is invalid.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ClientError> {
        request.validate()?;
        let response: RegisterResponse = self.post("/auth/register", request).await?;
        info!(user_id = %response.user_id, region = %response.region, "Registered account");
        Ok(response)
    }

    /// Query the service root, outside the API base path
    pub async fn service_status(&self) -> Result<ServiceStatus, ClientError> {
        let request = self
            .client
            .request(Method::GET, format!("{}/", self.origin));
        self.execute(request).await
    }
}
