//! Authentication capability.
//!
//! The login controller only sees [`Authenticator`]: it hands over
//! credentials once per attempt and gets back a deferred [`AuthOutcome`].
//! `Ok(AuthOutcome::Rejected { .. })` is the expected failure signal; an
//! `Err` is an unexpected fault in the call itself.

mod demo;
mod http;
mod timeout;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
pub use demo::{DEMO_PASSWORD, DEMO_USERNAME, DemoAuthenticator, REJECTION_REASON};
use futures_util::future::BoxFuture;
pub use http::{HttpAuthenticator, LoginResponse};
use serde::Serialize;
pub use timeout::{TIMEOUT_REASON, WithTimeout};
use url::Url;

use crate::config::{AuthConfig, AuthMode};

/// Deferred result of one authentication call.
pub type AuthFuture = BoxFuture<'static, Result<AuthOutcome>>;

/// Credentials for one login attempt.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How an authentication call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted,
    /// Human-readable reason, shown to the user verbatim.
    Rejected { reason: String },
}

impl AuthOutcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        AuthOutcome::Rejected {
            reason: reason.into(),
        }
    }
}

/// Asynchronous authentication call.
///
/// Implementations must be cheap to call more than once; each call is
/// independent and always settles (no cancellation).
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: Credentials) -> AuthFuture;
}

impl<T: Authenticator + ?Sized> Authenticator for Arc<T> {
    fn authenticate(&self, credentials: Credentials) -> AuthFuture {
        (**self).authenticate(credentials)
    }
}

/// Adapts a closure into an [`Authenticator`].
pub struct FnAuthenticator<F>(F);

/// Builds an authenticator from a closure (handy for stubs).
pub fn from_fn<F>(f: F) -> FnAuthenticator<F>
where
    F: Fn(Credentials) -> AuthFuture + Send + Sync,
{
    FnAuthenticator(f)
}

impl<F> Authenticator for FnAuthenticator<F>
where
    F: Fn(Credentials) -> AuthFuture + Send + Sync,
{
    fn authenticate(&self, credentials: Credentials) -> AuthFuture {
        (self.0)(credentials)
    }
}

/// Builds the authenticator selected by configuration.
///
/// # Errors
/// Returns an error if the HTTP endpoint is not a valid URL.
pub fn from_config(config: &AuthConfig) -> Result<Arc<dyn Authenticator>> {
    let inner: Arc<dyn Authenticator> = match config.mode {
        AuthMode::Demo => Arc::new(DemoAuthenticator::new(Duration::from_millis(
            config.demo_delay_ms,
        ))),
        AuthMode::Http => {
            let endpoint = Url::parse(&config.endpoint)
                .with_context(|| format!("Invalid auth endpoint '{}'", config.endpoint))?;
            Arc::new(HttpAuthenticator::new(endpoint))
        }
    };

    Ok(match config.timeout_secs {
        Some(secs) if secs > 0 => Arc::new(WithTimeout::new(inner, Duration::from_secs(secs))),
        _ => inner,
    })
}
