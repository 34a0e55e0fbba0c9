//! Adapter for the Stream Chat REST API implementing [`DirectoryBackend`].
//!
//! [`DirectoryBackend`]: crate::domain::ports::DirectoryBackend

mod client;
mod error;
mod token;
mod wire;

pub use client::{DeleteOptions, StreamDirectoryClient};
pub use error::StreamError;
pub use token::TokenSigner;
