//! Field validation rules.
//!
//! Rules are static, process-wide configuration. Each field is checked in a
//! fixed order (required, minimum length, pattern) and the first failing
//! rule decides the message.

use std::sync::LazyLock;

use enum_map::{Enum, EnumMap, enum_map};
use regex::Regex;

/// Username characters accepted by the login form.
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9@._-]+$";

/// A configured login form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    /// Fields in form order.
    pub const ALL: [Field; 2] = [Field::Username, Field::Password];

    /// Human label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
        }
    }

    /// Stable identifier (used in logs and console output).
    pub fn id(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
        }
    }

    /// Returns the value as it is validated and submitted.
    ///
    /// Surrounding whitespace is dropped from usernames; passwords are
    /// taken verbatim.
    pub fn normalize(self, raw: &str) -> &str {
        match self {
            Field::Username => raw.trim(),
            Field::Password => raw,
        }
    }
}

/// Which rule a field value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    TooShort { min_length: usize },
    InvalidCharacters,
}

impl Violation {
    fn message(self, field: Field) -> String {
        let label = field.label();
        match self {
            Violation::Required => format!("{label} is required"),
            Violation::TooShort { min_length } => {
                format!("{label} must be at least {min_length} characters")
            }
            Violation::InvalidCharacters => format!("{label} contains invalid characters"),
        }
    }
}

/// Outcome of validating one field. Always derived fresh from the field text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationResult {
    pub valid: bool,
    pub message: Option<String>,
    pub violation: Option<Violation>,
}

impl FieldValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            violation: None,
        }
    }

    pub fn failed(field: Field, violation: Violation) -> Self {
        Self {
            valid: false,
            message: Some(violation.message(field)),
            violation: Some(violation),
        }
    }
}

/// Per-field policy.
#[derive(Debug)]
pub struct ValidationRule {
    pub required: bool,
    /// Minimum length in characters.
    pub min_length: usize,
    pub pattern: Option<Regex>,
}

impl ValidationRule {
    /// Checks a (normalized) value against this rule.
    pub fn check(&self, field: Field, value: &str) -> FieldValidationResult {
        if value.is_empty() {
            return if self.required {
                FieldValidationResult::failed(field, Violation::Required)
            } else {
                FieldValidationResult::ok()
            };
        }

        if value.chars().count() < self.min_length {
            return FieldValidationResult::failed(
                field,
                Violation::TooShort {
                    min_length: self.min_length,
                },
            );
        }

        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            return FieldValidationResult::failed(field, Violation::InvalidCharacters);
        }

        FieldValidationResult::ok()
    }
}

/// The login form's rules, read-only after first use.
pub static RULES: LazyLock<EnumMap<Field, ValidationRule>> = LazyLock::new(|| {
    enum_map! {
        Field::Username => ValidationRule {
            required: true,
            min_length: 3,
            pattern: Some(Regex::new(USERNAME_PATTERN).expect("username pattern is a valid regex")),
        },
        Field::Password => ValidationRule {
            required: true,
            min_length: 6,
            pattern: None,
        },
    }
});

/// Validates a raw field value against the static rules.
pub fn validate(field: Field, raw: &str) -> FieldValidationResult {
    RULES[field].check(field, field.normalize(raw))
}
