use thiserror::Error;

use crate::validation::Field;

/// Why a login attempt did not succeed.
///
/// Neither kind is fatal: validation errors are corrected inline and
/// authentication errors by resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("{}: {message}", .field.id())]
    Validation { field: Field, message: String },

    #[error("{0}")]
    Authentication(String),
}
