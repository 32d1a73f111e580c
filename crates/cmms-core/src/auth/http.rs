use anyhow::{Context, bail};
use futures_util::FutureExt;
use serde::Deserialize;
use url::Url;

use super::{AuthFuture, AuthOutcome, Authenticator, Credentials};

/// Reason used when the endpoint rejects without giving one.
const DEFAULT_REJECTION: &str = "Invalid username or password.";

/// Body returned by the login endpoint.
///
/// `{"ok": true}` or `{"ok": false, "reason": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl LoginResponse {
    pub fn into_outcome(self) -> AuthOutcome {
        if self.ok {
            AuthOutcome::Accepted
        } else {
            AuthOutcome::rejected(
                self.reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            )
        }
    }
}

/// Authenticates by POSTing credentials as JSON to a login endpoint.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAuthenticator {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl Authenticator for HttpAuthenticator {
    fn authenticate(&self, credentials: Credentials) -> AuthFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        async move {
            tracing::debug!(%endpoint, username = %credentials.username, "posting credentials");
            let response = client
                .post(endpoint.clone())
                .json(&credentials)
                .send()
                .await
                .with_context(|| format!("POST {endpoint}"))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .context("Failed to read login response")?;

            // Rejections may arrive with 4xx statuses; only an unparsable body is a fault.
            match serde_json::from_str::<LoginResponse>(&body) {
                Ok(parsed) => Ok(parsed.into_outcome()),
                Err(err) if status.is_success() => {
                    Err(err).context("Failed to parse login response")
                }
                Err(_) => bail!("Login endpoint returned {status}"),
            }
        }
        .boxed()
    }
}
