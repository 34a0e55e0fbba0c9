use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Backend call '{operation}' failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    #[error("Backend call '{operation}' exceeded {timeout_ms}ms")]
    BackendTimeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

impl DomainError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }

    pub fn backend_timeout(operation: &'static str, limit: Duration) -> Self {
        Self::BackendTimeout {
            operation,
            timeout_ms: limit.as_millis() as u64,
        }
    }

    /// Client-correctable input problem (as opposed to an upstream fault).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::Validation { .. })
    }
}
