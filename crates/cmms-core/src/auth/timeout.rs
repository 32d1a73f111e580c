use std::time::Duration;

use futures_util::FutureExt;

use super::{AuthFuture, AuthOutcome, Authenticator, Credentials};

pub const TIMEOUT_REASON: &str = "Sign-in timed out. Please try again.";

/// Bounds an authenticator's call time; an elapsed limit settles as a
/// rejection rather than leaving the attempt pending.
#[derive(Debug, Clone)]
pub struct WithTimeout<A> {
    inner: A,
    limit: Duration,
}

impl<A> WithTimeout<A> {
    pub fn new(inner: A, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

impl<A: Authenticator> Authenticator for WithTimeout<A> {
    fn authenticate(&self, credentials: Credentials) -> AuthFuture {
        let call = self.inner.authenticate(credentials);
        let limit = self.limit;
        async move {
            if let Ok(result) = tokio::time::timeout(limit, call).await {
                result
            } else {
                tracing::warn!(?limit, "authentication call timed out");
                Ok(AuthOutcome::rejected(TIMEOUT_REASON))
            }
        }
        .boxed()
    }
}
