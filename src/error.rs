//! Error types for the form engine

use thiserror::Error;

/// Errors raised when a caller addresses the form in a way its shape does not allow.
///
/// Validation failures are never reported through this type; they are
/// recorded in the form state as per-field messages instead.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` expects a {expected} value, got {found}")]
    KindMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` received non-numeric input `{input}`")]
    InvalidNumber { field: String, input: String },

    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
