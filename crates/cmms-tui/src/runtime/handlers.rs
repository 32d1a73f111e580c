//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`; the runtime
//! spawns them and sends the result to the inbox. They never touch state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use cmms_core::auth::{Authenticator, Credentials};
use tracing::warn;

use crate::events::UiEvent;

/// Runs one authentication call on its own task so a panic inside the
/// authenticator settles the attempt instead of tearing down the loop.
pub async fn authenticate(
    authenticator: Arc<dyn Authenticator>,
    credentials: Credentials,
) -> UiEvent {
    let call = authenticator.authenticate(credentials);
    let result = match tokio::spawn(call).await {
        Ok(result) => result,
        Err(join_error) => {
            warn!(error = %join_error, "authentication task aborted");
            Err(anyhow!("authentication task failed: {join_error}"))
        }
    };
    UiEvent::AuthSettled { result }
}

/// Simulated dashboard data fetch.
pub async fn dashboard_refresh(delay: Duration) -> UiEvent {
    tokio::time::sleep(delay).await;
    UiEvent::DashboardRefreshed
}

#[cfg(test)]
mod tests {
    use cmms_core::auth::{self, AuthOutcome, DemoAuthenticator};
    use futures_util::FutureExt;

    use super::*;

    #[tokio::test]
    async fn demo_call_settles_with_outcome() {
        let authenticator: Arc<dyn Authenticator> =
            Arc::new(DemoAuthenticator::new(Duration::ZERO));

        let event = authenticate(authenticator, Credentials::new("demo", "password")).await;

        assert!(matches!(
            event,
            UiEvent::AuthSettled {
                result: Ok(AuthOutcome::Accepted)
            }
        ));
    }

    #[tokio::test]
    async fn panicking_authenticator_settles_as_fault() {
        let authenticator: Arc<dyn Authenticator> = Arc::new(auth::from_fn(|_| {
            async { panic!("authenticator bug") }.boxed()
        }));

        let event = authenticate(authenticator, Credentials::new("demo", "password")).await;

        let UiEvent::AuthSettled { result } = event else {
            panic!("expected AuthSettled, got {event:?}");
        };
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_waits_for_delay() {
        let start = tokio::time::Instant::now();
        let event = dashboard_refresh(Duration::from_secs(2)).await;
        assert!(matches!(event, UiEvent::DashboardRefreshed));
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
