//! Presentation derived from controller state.
//!
//! Every visual flag (submit enabled, spinner, valid/invalid markers) is
//! computed here from the attempt state and field results, so front ends
//! never toggle presentation state on their own.

use enum_map::EnumMap;

use super::state::{AttemptState, FormMessage, PasswordVisibility};
use crate::validation::{Field, FieldValidationResult};

/// Visual validity of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Not validated yet (no input event, no submit).
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl FieldStatus {
    pub fn from_result(result: Option<&FieldValidationResult>) -> Self {
        match result {
            None => FieldStatus::Untouched,
            Some(r) if r.valid => FieldStatus::Valid,
            Some(_) => FieldStatus::Invalid,
        }
    }

    pub fn class_name(self) -> Option<&'static str> {
        match self {
            FieldStatus::Untouched => None,
            FieldStatus::Valid => Some("valid"),
            FieldStatus::Invalid => Some("invalid"),
        }
    }
}

/// Snapshot read by renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub state: AttemptState,
    pub submit_enabled: bool,
    pub loading: bool,
    pub fields: EnumMap<Field, FieldStatus>,
    pub password: PasswordVisibility,
    pub message: Option<FormMessage>,
}

impl FormView {
    pub(crate) fn derive(
        state: AttemptState,
        results: &EnumMap<Field, Option<FieldValidationResult>>,
        password: PasswordVisibility,
        message: Option<&FormMessage>,
    ) -> Self {
        let submitting = state.is_submitting();
        Self {
            state,
            submit_enabled: !submitting,
            loading: submitting,
            fields: EnumMap::from_fn(|field| FieldStatus::from_result(results[field].as_ref())),
            password,
            message: message.cloned(),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Signing In..."
        } else {
            "Sign In"
        }
    }

    pub fn submit_class(&self) -> Option<&'static str> {
        self.loading.then_some("loading")
    }
}
