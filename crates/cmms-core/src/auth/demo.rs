use std::time::Duration;

use futures_util::FutureExt;

use super::{AuthFuture, AuthOutcome, Authenticator, Credentials};

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "password";
pub const REJECTION_REASON: &str = "Invalid username or password. Try demo/password";

/// Placeholder authenticator: accepts a single literal credential pair
/// after a fixed delay.
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    delay: Duration,
}

impl DemoAuthenticator {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl Authenticator for DemoAuthenticator {
    fn authenticate(&self, credentials: Credentials) -> AuthFuture {
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if credentials.username == DEMO_USERNAME && credentials.password == DEMO_PASSWORD {
                Ok(AuthOutcome::Accepted)
            } else {
                Ok(AuthOutcome::rejected(REJECTION_REASON))
            }
        }
        .boxed()
    }
}
