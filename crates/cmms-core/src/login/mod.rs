//! Login form controller.
//!
//! Owns the lifecycle of one login attempt: field validation, submission
//! gating, the pending/success/error display state, and settling the
//! asynchronous authentication call.
//!
//! Submission is split in two synchronous halves so event-loop front ends
//! can run the call on their own executor:
//!
//! - [`LoginFormController::begin_submit`] validates and, if the form is
//!   valid and nothing is in flight, moves to `Submitting` and hands back
//!   the credentials for exactly one call;
//! - [`LoginFormController::complete`] settles that call.
//!
//! [`LoginFormController::submit`] composes both around the injected
//! authenticator for callers that can simply await.

mod action;
mod state;
mod view;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use action::{FormAction, SocialProvider};
use anyhow::{Result, anyhow};
use enum_map::EnumMap;
use futures_util::FutureExt;
pub use state::{AttemptState, FormMessage, LoginAttempt, MessageKind, PasswordVisibility};
use tracing::{debug, info, warn};
pub use view::{FieldStatus, FormView};

use crate::auth::{AuthOutcome, Authenticator, Credentials};
use crate::config::UiConfig;
use crate::error::LoginError;
use crate::surface::{FieldValidationDisplay, Navigator, NotificationKind, NotificationSurface};
use crate::validation::{self, Field, FieldValidationResult};

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors above";
pub const SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const FAULT_MESSAGE: &str = "An error occurred. Please try again.";

/// Where and when to go after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSettings {
    pub landing_target: String,
    pub redirect_delay: Duration,
    /// How long the form-level message stays visible.
    pub message_ttl: Duration,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            landing_target: "/dashboard/".to_string(),
            redirect_delay: Duration::from_millis(1500),
            message_ttl: Duration::from_secs(5),
        }
    }
}

impl From<&UiConfig> for LoginSettings {
    fn from(ui: &UiConfig) -> Self {
        Self {
            landing_target: ui.landing_target.clone(),
            redirect_delay: Duration::from_millis(ui.redirect_delay_ms),
            message_ttl: Duration::from_secs(ui.notification_secs),
        }
    }
}

/// Login form controller.
///
/// Generic over its three UI collaborators so each front end can supply
/// its own surfaces; the authenticator is injected as a trait object.
pub struct LoginFormController<N, D, R> {
    notifications: N,
    field_display: D,
    navigator: R,
    authenticator: Arc<dyn Authenticator>,
    settings: LoginSettings,
    values: EnumMap<Field, String>,
    results: EnumMap<Field, Option<FieldValidationResult>>,
    attempt: Option<LoginAttempt>,
    password: PasswordVisibility,
    message: Option<FormMessage>,
    /// Username of the attempt that succeeded, until the next attempt.
    signed_in: Option<String>,
}

impl<N, D, R> LoginFormController<N, D, R>
where
    N: NotificationSurface,
    D: FieldValidationDisplay,
    R: Navigator,
{
    pub fn new(
        notifications: N,
        field_display: D,
        navigator: R,
        authenticator: Arc<dyn Authenticator>,
        settings: LoginSettings,
    ) -> Self {
        Self {
            notifications,
            field_display,
            navigator,
            authenticator,
            settings,
            values: EnumMap::default(),
            results: EnumMap::default(),
            attempt: None,
            password: PasswordVisibility::default(),
            message: None,
            signed_in: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn value(&self, field: Field) -> &str {
        &self.values[field]
    }

    pub fn result(&self, field: Field) -> Option<&FieldValidationResult> {
        self.results[field].as_ref()
    }

    pub fn state(&self) -> AttemptState {
        self.attempt
            .as_ref()
            .map_or(AttemptState::Idle, |attempt| attempt.state)
    }

    pub fn attempt(&self) -> Option<&LoginAttempt> {
        self.attempt.as_ref()
    }

    /// The account the last successful attempt signed in, if any.
    pub fn signed_in_user(&self) -> Option<&str> {
        self.signed_in.as_deref()
    }

    pub fn password_visibility(&self) -> PasswordVisibility {
        self.password
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn settings(&self) -> &LoginSettings {
        &self.settings
    }

    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::clone(&self.authenticator)
    }

    pub fn notifications(&self) -> &N {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut N {
        &mut self.notifications
    }

    pub fn field_display(&self) -> &D {
        &self.field_display
    }

    pub fn navigator(&self) -> &R {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut R {
        &mut self.navigator
    }

    /// Presentation snapshot for renderers.
    pub fn view(&self) -> FormView {
        FormView::derive(
            self.state(),
            &self.results,
            self.password,
            self.message.as_ref(),
        )
    }

    /// Why the current attempt is not (yet) a success, if it has failed.
    pub fn last_error(&self) -> Option<LoginError> {
        let invalid = Field::ALL.into_iter().find_map(|field| {
            self.results[field]
                .as_ref()
                .filter(|r| !r.valid)
                .map(|r| LoginError::Validation {
                    field,
                    message: r.message.clone().unwrap_or_default(),
                })
        });
        if invalid.is_some() {
            return invalid;
        }

        match (self.state(), &self.message) {
            (AttemptState::Failed, Some(message)) => {
                Some(LoginError::Authentication(message.text.clone()))
            }
            _ => None,
        }
    }

    // ========================================================================
    // Field events
    // ========================================================================

    /// Input-change event: stores the text and re-validates that field.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) -> FieldValidationResult {
        self.values[field] = text.into();
        self.validate_field(field)
    }

    /// Validates one field from its current text and updates its display.
    pub fn validate_field(&mut self, field: Field) -> FieldValidationResult {
        let result = validation::validate(field, &self.values[field]);
        match &result.message {
            Some(message) => self.field_display.show_field_error(field, message),
            None => self.field_display.clear_field_error(field),
        }
        self.results[field] = Some(result.clone());
        result
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Dispatches a control's action tag.
    ///
    /// Returns credentials when the action started an authentication call.
    pub fn dispatch(&mut self, action: FormAction) -> Option<Credentials> {
        match action {
            FormAction::Submit => self.begin_submit(),
            FormAction::TogglePassword => {
                self.toggle_password_visibility();
                None
            }
            FormAction::ClearForm => {
                self.clear_form();
                None
            }
            FormAction::SocialLogin(provider) => {
                self.notifications.show(
                    &format!("{} login would be implemented here", provider.name()),
                    NotificationKind::Info,
                );
                None
            }
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password = self.password.toggled();
    }

    /// Empties both fields and their error slots. An in-flight attempt is
    /// left to settle.
    pub fn clear_form(&mut self) {
        for field in Field::ALL {
            self.values[field].clear();
            self.results[field] = None;
            self.field_display.clear_field_error(field);
        }
    }

    /// Drops the current attempt and all field state (logout / teardown).
    pub fn reset(&mut self) {
        self.clear_form();
        self.attempt = None;
        self.message = None;
        self.signed_in = None;
        self.password = PasswordVisibility::default();
    }

    /// Hides the form message once it has been visible long enough.
    pub fn expire_message(&mut self, now: Instant) -> bool {
        let expired = self.message.as_ref().is_some_and(|m| {
            now.saturating_duration_since(m.shown_at) >= self.settings.message_ttl
        });
        if expired {
            self.message = None;
        }
        expired
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Starts an attempt from the current field values.
    ///
    /// Returns `None` without side effects while an attempt is in flight,
    /// and `None` after showing the aggregate error when a field is
    /// invalid. Otherwise the attempt is `Submitting` and the returned
    /// credentials must be authenticated exactly once.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.state().is_submitting() {
            debug!("submit ignored: attempt already in flight");
            return None;
        }

        // A finished attempt's redirect belongs to that attempt only
        if self.state().is_terminal() {
            self.navigator.cancel();
            self.signed_in = None;
        }

        let username = Field::Username.normalize(&self.values[Field::Username]).to_string();
        let password = self.values[Field::Password].clone();
        self.attempt = Some(LoginAttempt {
            username: username.clone(),
            password: password.clone(),
            state: AttemptState::Validating,
        });

        let mut all_valid = true;
        for field in Field::ALL {
            all_valid &= self.validate_field(field).valid;
        }

        if !all_valid {
            debug!("submit blocked by validation");
            self.set_state(AttemptState::Idle);
            self.notifications
                .show(INVALID_FORM_MESSAGE, NotificationKind::Error);
            return None;
        }

        self.set_state(AttemptState::Submitting);
        self.message = None;
        info!(username = %username, "submitting login");
        Some(Credentials { username, password })
    }

    /// Settles the in-flight call. Results arriving when nothing is
    /// submitting are ignored.
    pub fn complete(&mut self, result: Result<AuthOutcome>) {
        if !self.state().is_submitting() {
            debug!("stale authentication result ignored");
            return;
        }

        match result {
            Ok(AuthOutcome::Accepted) => {
                info!("login accepted");
                self.set_state(AttemptState::Succeeded);
                self.signed_in = self.attempt.as_ref().map(|a| a.username.clone());
                self.notifications
                    .show(SUCCESS_MESSAGE, NotificationKind::Success);
                self.show_message(MessageKind::Success, SUCCESS_MESSAGE);
                self.navigator
                    .schedule(&self.settings.landing_target, self.settings.redirect_delay);
            }
            Ok(AuthOutcome::Rejected { reason }) => {
                info!(%reason, "login rejected");
                self.set_state(AttemptState::Failed);
                self.show_message(MessageKind::Error, &reason);
            }
            Err(fault) => {
                warn!(error = %format!("{fault:#}"), "authentication call failed");
                self.set_state(AttemptState::Failed);
                self.show_message(MessageKind::Error, FAULT_MESSAGE);
            }
        }
    }

    /// Runs a whole attempt: fill in both fields, validate, authenticate
    /// once, settle. A panic inside the call settles as a fault.
    pub async fn submit(&mut self, username: &str, password: &str) -> AttemptState {
        self.set_field(Field::Username, username);
        self.set_field(Field::Password, password);

        let Some(credentials) = self.begin_submit() else {
            return self.state();
        };

        let call = self.authenticator.authenticate(credentials);
        let result = match AssertUnwindSafe(call).catch_unwind().await {
            Ok(result) => result,
            Err(_panic) => Err(anyhow!("authentication call panicked")),
        };
        self.complete(result);
        self.state()
    }

    fn set_state(&mut self, next: AttemptState) {
        if let Some(attempt) = self.attempt.as_mut() {
            debug!(from = ?attempt.state, to = ?next, "attempt state");
            attempt.state = next;
        }
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.message = Some(FormMessage {
            kind,
            text: text.to_string(),
            shown_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::auth::{self, DemoAuthenticator, REJECTION_REASON};
    use crate::surface::{FieldErrors, Redirects, Toasts};

    type Controller = LoginFormController<Toasts, FieldErrors, Redirects>;

    fn controller_with(authenticator: Arc<dyn Authenticator>) -> Controller {
        LoginFormController::new(
            Toasts::default(),
            FieldErrors::default(),
            Redirects::default(),
            authenticator,
            LoginSettings::default(),
        )
    }

    fn demo_controller() -> Controller {
        controller_with(Arc::new(DemoAuthenticator::new(Duration::ZERO)))
    }

    /// Authenticator that counts calls and always accepts.
    fn counting(calls: Arc<AtomicUsize>) -> Arc<dyn Authenticator> {
        Arc::new(auth::from_fn(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(AuthOutcome::Accepted) }.boxed()
        }))
    }

    #[test]
    fn short_username_is_invalid_regardless_of_password() {
        let mut form = demo_controller();
        for password in ["", "short", "password"] {
            form.set_field(Field::Password, password);
            let result = form.set_field(Field::Username, "ab");
            assert!(!result.valid);
            assert_eq!(
                form.field_display().get(Field::Username),
                Some("Username must be at least 3 characters")
            );
        }
    }

    #[test]
    fn fixing_a_field_clears_its_error() {
        let mut form = demo_controller();
        form.set_field(Field::Username, "a!");
        assert_eq!(form.view().fields[Field::Username], FieldStatus::Invalid);

        form.set_field(Field::Username, "demo");
        assert_eq!(form.field_display().get(Field::Username), None);
        assert_eq!(form.view().fields[Field::Username], FieldStatus::Valid);
        // Validating one field never touches the other.
        assert_eq!(form.view().fields[Field::Password], FieldStatus::Untouched);
    }

    #[test]
    fn invalid_form_never_calls_authenticator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = controller_with(counting(Arc::clone(&calls)));

        form.set_field(Field::Password, "password");
        assert!(form.begin_submit().is_none());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.state(), AttemptState::Idle);
        let toast = form.notifications().current().unwrap();
        assert_eq!(toast.message, INVALID_FORM_MESSAGE);
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(
            form.field_display().get(Field::Username),
            Some("Username is required")
        );
    }

    #[test]
    fn second_submit_while_pending_is_ignored() {
        let mut form = demo_controller();
        form.set_field(Field::Username, "demo");
        form.set_field(Field::Password, "password");

        let first = form.begin_submit();
        assert!(first.is_some());
        assert_eq!(form.state(), AttemptState::Submitting);
        let view = form.view();
        assert!(!view.submit_enabled);
        assert!(view.loading);
        assert_eq!(view.submit_label(), "Signing In...");

        assert!(form.begin_submit().is_none());
        assert!(form.dispatch(FormAction::Submit).is_none());
        assert_eq!(form.state(), AttemptState::Submitting);
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut form = demo_controller();
        form.complete(Ok(AuthOutcome::Accepted));
        assert_eq!(form.state(), AttemptState::Idle);
        assert!(form.navigator().pending().is_none());
    }

    #[tokio::test]
    async fn demo_credentials_succeed_and_schedule_redirect() {
        let mut form = demo_controller();

        let state = form.submit("demo", "password").await;

        assert_eq!(state, AttemptState::Succeeded);
        let toast = form.notifications().current().unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
        assert_eq!(toast.message, SUCCESS_MESSAGE);
        let redirect = form.navigator().pending().unwrap();
        assert_eq!(redirect.target, "/dashboard/");
        assert!(form.view().submit_enabled);
        assert!(!form.view().loading);
    }

    #[tokio::test]
    async fn wrong_password_fails_with_hint_and_reenables_submit() {
        let mut form = demo_controller();

        let state = form.submit("demo", "wrong!").await;

        assert_eq!(state, AttemptState::Failed);
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, REJECTION_REASON);
        assert!(form.view().submit_enabled);
        assert!(form.navigator().pending().is_none());
        assert_eq!(
            form.last_error(),
            Some(LoginError::Authentication(REJECTION_REASON.to_string()))
        );
    }

    #[tokio::test]
    async fn short_password_is_a_validation_error() {
        // "wrong" is under six characters, so the call is never made.
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = controller_with(counting(Arc::clone(&calls)));

        let state = form.submit("demo", "wrong").await;

        assert_eq!(state, AttemptState::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            form.last_error(),
            Some(LoginError::Validation {
                field: Field::Password,
                message: "Password must be at least 6 characters".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn empty_username_never_authenticates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = controller_with(counting(Arc::clone(&calls)));

        form.submit("", "password").await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            form.notifications().current().unwrap().message,
            INVALID_FORM_MESSAGE
        );
    }

    #[tokio::test]
    async fn one_call_per_valid_submit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = controller_with(counting(Arc::clone(&calls)));

        form.submit("demo", "password").await;
        form.submit("demo", "password").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fault_in_call_is_reported_generically() {
        let mut form = controller_with(Arc::new(auth::from_fn(|_| {
            async { Err(anyhow!("connection reset")) }.boxed()
        })));

        let state = form.submit("demo", "password").await;

        assert_eq!(state, AttemptState::Failed);
        assert_eq!(form.message().unwrap().text, FAULT_MESSAGE);
        assert!(form.view().submit_enabled);
    }

    #[tokio::test]
    async fn panic_in_call_still_reenables_submit() {
        let mut form = controller_with(Arc::new(auth::from_fn(|_| {
            async { panic!("authenticator bug") }.boxed()
        })));

        let state = form.submit("demo", "password").await;

        assert_eq!(state, AttemptState::Failed);
        assert_eq!(form.message().unwrap().text, FAULT_MESSAGE);
        assert!(form.view().submit_enabled);
    }

    #[tokio::test]
    async fn new_attempt_starts_fresh_after_failure() {
        let mut form = demo_controller();
        assert_eq!(form.submit("demo", "wrong!").await, AttemptState::Failed);
        assert_eq!(form.submit("demo", "password").await, AttemptState::Succeeded);
        assert_eq!(form.attempt().unwrap().username, "demo");
    }

    #[test]
    fn previous_message_is_hidden_while_submitting() {
        let mut form = demo_controller();
        form.set_field(Field::Username, "demo");
        form.set_field(Field::Password, "wrong!");
        form.begin_submit().unwrap();
        form.complete(Ok(AuthOutcome::rejected(REJECTION_REASON)));
        assert_eq!(form.message().unwrap().text, REJECTION_REASON);

        form.set_field(Field::Password, "password");
        assert!(form.begin_submit().is_some());

        assert_eq!(form.state(), AttemptState::Submitting);
        assert!(form.message().is_none());
        assert!(form.view().message.is_none());
    }

    #[test]
    fn resubmit_after_success_cancels_its_redirect() {
        let mut form = demo_controller();
        form.set_field(Field::Username, "demo");
        form.set_field(Field::Password, "password");
        form.begin_submit().unwrap();
        form.complete(Ok(AuthOutcome::Accepted));
        assert!(form.navigator().pending().is_some());
        assert_eq!(form.signed_in_user(), Some("demo"));

        form.set_field(Field::Username, "mallory");
        form.set_field(Field::Password, "not-the-password");
        assert!(form.begin_submit().is_some());

        assert!(form.navigator().pending().is_none());
        assert_eq!(form.signed_in_user(), None);

        form.complete(Ok(AuthOutcome::rejected(REJECTION_REASON)));
        assert!(form.navigator().pending().is_none());
        assert_eq!(form.signed_in_user(), None);
    }

    #[test]
    fn view_derives_class_names() {
        let mut form = demo_controller();
        assert_eq!(form.view().fields[Field::Username].class_name(), None);
        assert_eq!(form.view().submit_class(), None);

        form.set_field(Field::Username, "a!");
        form.set_field(Field::Password, "password");
        assert_eq!(
            form.view().fields[Field::Username].class_name(),
            Some("invalid")
        );

        form.set_field(Field::Username, "demo");
        form.begin_submit().unwrap();
        let view = form.view();
        assert_eq!(view.fields[Field::Username].class_name(), Some("valid"));
        assert_eq!(view.fields[Field::Password].class_name(), Some("valid"));
        assert_eq!(view.submit_class(), Some("loading"));
    }

    #[test]
    fn username_is_trimmed_for_submission() {
        let mut form = demo_controller();
        form.set_field(Field::Username, "  demo ");
        form.set_field(Field::Password, "password");
        let creds = form.begin_submit().unwrap();
        assert_eq!(creds.username, "demo");
    }

    #[test]
    fn toggling_twice_restores_masking() {
        let mut form = demo_controller();
        assert!(form.password_visibility().is_masked());
        form.dispatch(FormAction::TogglePassword);
        assert_eq!(form.view().password, PasswordVisibility::Plain);
        assert_eq!(form.view().password.icon(), "eye-slash");
        form.dispatch(FormAction::TogglePassword);
        assert!(form.password_visibility().is_masked());
        assert_eq!(form.view().password.icon(), "eye");
    }

    #[test]
    fn social_login_shows_placeholder_notice() {
        let mut form = demo_controller();
        form.dispatch(FormAction::SocialLogin(SocialProvider::GitHub));
        let toast = form.notifications().current().unwrap();
        assert_eq!(toast.message, "GitHub login would be implemented here");
        assert_eq!(toast.kind, NotificationKind::Info);
    }

    #[test]
    fn clear_form_empties_fields_and_errors() {
        let mut form = demo_controller();
        form.set_field(Field::Username, "x");
        form.set_field(Field::Password, "y");
        form.dispatch(FormAction::ClearForm);

        assert_eq!(form.value(Field::Username), "");
        assert_eq!(form.value(Field::Password), "");
        assert!(!form.field_display().has_errors());
        assert_eq!(form.view().fields[Field::Username], FieldStatus::Untouched);
    }

    #[tokio::test]
    async fn form_message_expires() {
        let mut form = demo_controller();
        form.submit("demo", "wrong!").await;
        let shown_at = form.message().unwrap().shown_at;

        assert!(!form.expire_message(shown_at + Duration::from_secs(1)));
        assert!(form.expire_message(shown_at + Duration::from_secs(5)));
        assert!(form.message().is_none());
    }
}
