use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub(crate) const LOGIN_PATH: &str = "/api/auth/login";
pub(crate) const FALLBACK_MESSAGE: &str = "Failed to sign in";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("Sign-in response did not contain a token")]
    MalformedResponse,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking client for the sign-in endpoint. One request per call.
pub(crate) struct AuthClient {
    http: reqwest::blocking::Client,
    api_url: String,
}

impl AuthClient {
    pub fn new(api_url: &str) -> Result<Self, AuthError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn login_url(&self) -> String {
        format!("{}{LOGIN_PATH}", self.api_url)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let response = self
            .http
            .post(self.login_url())
            .json(&LoginRequest { email, password })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().unwrap_or_default();
            let message = body
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            warn!(%status, "sign-in rejected");
            return Err(AuthError::Rejected(message));
        }

        let body: LoginResponse = response
            .json()
            .map_err(|_| AuthError::MalformedResponse)?;
        info!("sign-in succeeded");
        Ok(body.token)
    }
}

#[cfg(test)]
mod tests;
