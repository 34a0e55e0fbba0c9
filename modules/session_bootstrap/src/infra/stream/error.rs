use thiserror::Error;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("invalid request: {0}")]
    Request(String),
}

impl StreamError {
    pub fn into_domain(self, operation: &'static str) -> DomainError {
        DomainError::backend(operation, self.to_string())
    }
}
