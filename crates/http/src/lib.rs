//! JobAgent HTTP client
//!
//! Every call goes through [`client::ApiClient`], which attaches the bearer
//! token held by the shared [`jobagent_core::SessionManager`] and hands
//! authentication failures back to it.

pub mod client;

pub use client::error::ClientError;
pub use client::problem::ProblemDetail;
pub use client::{ApiClient, ApiClientBuilder};
