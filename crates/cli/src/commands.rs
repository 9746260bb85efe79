//! CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;
use jobagent_core::{ClientConfig, RegisterRequest};
use jobagent_frontend_common::{AppContext, ROUTES};
use jobagent_http::ClientError;
use serde_json::Value;
use tracing::info;

use crate::config;

#[derive(Subcommand)]
pub enum Commands {
    /// Store a bearer token for subsequent calls
    Login {
        /// Token issued by the login endpoint
        #[arg(long, env = "JOBAGENT_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Forget the stored token
    Logout,

    /// Show whether a session is stored
    Status,

    /// GET an API path
    Get {
        /// Path below the API base, e.g. /jobs
        path: String,
    },

    /// POST a JSON body to an API path
    Post {
        path: String,

        /// Request body as JSON
        #[arg(long, default_value = "{}")]
        body: String,
    },

    /// DELETE an API path
    Delete { path: String },

    /// Show where a page location leads with the current session
    Navigate { path: String },

    /// List the page routes and their access rules
    Routes,

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "JOBAGENT_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        full_name: String,

        /// ISO 3166-1 alpha-2 country code
        #[arg(long)]
        country: String,
    },

    /// Check that the service is up
    Ping,
}

impl Commands {
    pub async fn execute(self, config: &ClientConfig) -> Result<()> {
        let (app, _navigator) = config::build_context(config)?;

        match self {
            Self::Login { token } => {
                app.session.set_token(token)?;
                info!("Session stored");
                println!("Logged in; token saved to {}", config::token_file(config).display());
                Ok(())
            }
            Self::Logout => {
                app.session.logout()?;
                println!("Logged out");
                Ok(())
            }
            Self::Status => {
                print_status(&app, config);
                Ok(())
            }
            Self::Get { path } => call(app.api.get(&path).await),
            Self::Post { path, body } => {
                let body: Value =
                    serde_json::from_str(&body).context("--body is not valid JSON")?;
                call(app.api.post(&path, &body).await)
            }
            Self::Delete { path } => call(app.api.delete(&path).await),
            Self::Navigate { path } => {
                let resolution = app.router.navigate(&path)?;
                let target = app.router.current_path().unwrap_or_default();
                if resolution.is_redirect() {
                    println!("{path} -> {target} (redirected)");
                } else {
                    println!("{path} -> {target}");
                }
                Ok(())
            }
            Self::Routes => {
                print_routes();
                Ok(())
            }
            Self::Register {
                email,
                password,
                full_name,
                country,
            } => {
                let request = RegisterRequest {
                    email,
                    password,
                    full_name,
                    country,
                };
                let response = app.api.register(&request).await.map_err(relogin_hint)?;
                print_json(&serde_json::to_value(&response)?)
            }
            Self::Ping => {
                let status = app.api.service_status().await?;
                println!(
                    "{} is {} ({})",
                    status.service,
                    status.status,
                    status.timestamp
                );
                if status.is_up() {
                    Ok(())
                } else {
                    anyhow::bail!("service reported status {}", status.status)
                }
            }
        }
    }
}

fn call(result: Result<Value, ClientError>) -> Result<()> {
    let value = result.map_err(relogin_hint)?;
    print_json(&value)
}

fn print_json(value: &Value) -> Result<()> {
    if !value.is_null() {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Attach a login hint when the server rejected the session
fn relogin_hint(err: ClientError) -> anyhow::Error {
    if err.is_auth_expired() {
        anyhow::Error::new(err)
            .context("Session rejected; run `jobagent login --token <TOKEN>` to sign in again")
    } else {
        err.into()
    }
}

fn print_status(app: &AppContext, config: &ClientConfig) {
    println!("API:      {}", app.api.base_url());
    println!("Session:  {}", config::token_file(config).display());
    match app.session.token() {
        Some(token) => println!("Status:   authenticated ({})", mask_token(&token)),
        None => println!("Status:   not authenticated"),
    }
}

fn print_routes() {
    println!("{:<22} {:<18} {:<6} REDIRECT", "PATH", "NAME", "AUTH");
    for route in ROUTES {
        println!(
            "{:<22} {:<18} {:<6} {}",
            route.path,
            route.name.unwrap_or("-"),
            if route.requires_auth() { "yes" } else { "no" },
            route.redirect.unwrap_or("-"),
        );
    }
}

/// Show only the ends of a token
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJh...load");
    }

    #[test]
    fn test_relogin_hint_only_for_rejected_sessions() {
        let hinted = relogin_hint(ClientError::AuthenticationFailed("expired".to_string()));
        assert!(format!("{hinted:#}").contains("jobagent login"));

        let plain = relogin_hint(ClientError::NotFound("/jobs/9".to_string()));
        assert!(!format!("{plain:#}").contains("jobagent login"));
    }
}
