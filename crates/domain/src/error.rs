use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid resource name: {0}")]
    InvalidResourceName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Metadata service error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Field '{field}': cannot parse '{value}' as month/day/year: {reason}")]
    InvalidTimestamp {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field '{field}': cannot convert {value} to a number")]
    InvalidNumber { field: String, value: String },

    #[error("Field '{field}': cannot convert {value} to a boolean")]
    InvalidBoolean { field: String, value: String },

    #[error("Field '{field}': '{value}' is not one of {allowed:?}")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
