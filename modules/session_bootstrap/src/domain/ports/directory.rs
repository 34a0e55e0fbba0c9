use async_trait::async_trait;

use crate::contract::model::{AuthToken, DirectoryEntry, UserFilter};
use crate::domain::error::DomainError;

/// Transport-agnostic port to the messaging backend that owns the user
/// directory and signs client tokens. Any backend exposing these three
/// operations is substitutable.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
    /// Mint a signed token bound to `user_id`.
    async fn create_token(&self, user_id: &str) -> Result<AuthToken, DomainError>;

    /// Return every directory entry matching `filter` in a single page.
    async fn query_users(&self, filter: &UserFilter) -> Result<Vec<DirectoryEntry>, DomainError>;

    /// Remove one user from the directory.
    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError>;
}
