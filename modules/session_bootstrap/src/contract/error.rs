use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionBootstrapError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Backend call '{operation}' timed out")]
    Timeout { operation: String },
}

impl SessionBootstrapError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for SessionBootstrapError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            MissingField { field } => Self::validation(format!("{field} is required")),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            Backend { operation, message } => Self::backend(format!("{operation}: {message}")),
            BackendTimeout { operation, .. } => Self::timeout(operation),
        }
    }
}
