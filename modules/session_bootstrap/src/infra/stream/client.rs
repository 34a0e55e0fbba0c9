use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;
use url::Url;

use super::token::TokenSigner;
use super::wire::{ApiErrorBody, QueryUsersPayload, QueryUsersResponse};
use super::StreamError;
use crate::contract::model::{AuthToken, DirectoryEntry, UserFilter};
use crate::domain::error::DomainError;
use crate::domain::ports::DirectoryBackend;
use modkit::TracedClient;

const CLIENT_HEADER: &str = concat!("session-bootstrap-", env!("CARGO_PKG_VERSION"));

/// How users are removed from the directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Purge the user instead of soft-deleting it.
    pub hard_delete: bool,
    pub mark_messages_deleted: bool,
}

/// Stream Chat backend: signs tokens locally and manages the user
/// directory through the server-side REST API.
pub struct StreamDirectoryClient {
    http: TracedClient,
    base_url: Url,
    api_key: String,
    signer: TokenSigner,
    delete: DeleteOptions,
}

impl StreamDirectoryClient {
    pub fn new(
        http: TracedClient,
        base_url: Url,
        api_key: impl Into<String>,
        api_secret: &str,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key: api_key.into(),
            signer: TokenSigner::new(api_secret),
            delete: DeleteOptions::default(),
        }
    }

    pub fn with_delete_options(mut self, delete: DeleteOptions) -> Self {
        self.delete = delete;
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StreamError::Request(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request builder carrying API key and server credentials.
    fn authed(&self, method: Method, url: &Url) -> Result<reqwest::RequestBuilder, StreamError> {
        let token = self.signer.server_token()?;
        Ok(self
            .http
            .request(method, url.as_str())
            .query(&[("api_key", self.api_key.as_str())])
            .header("Authorization", token)
            .header("stream-auth-type", "jwt")
            .header("X-Stream-Client", CLIENT_HEADER))
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, StreamError> {
        let response = self.http.send(builder).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(StreamError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }

    async fn fetch_users(&self, filter: &UserFilter) -> Result<Vec<DirectoryEntry>, StreamError> {
        let payload = serde_json::to_string(&QueryUsersPayload {
            filter_conditions: filter.conditions(),
        })
        .map_err(|e| StreamError::Request(e.to_string()))?;

        let url = self.endpoint(&["users"])?;
        let builder = self
            .authed(Method::GET, &url)?
            .query(&[("payload", payload.as_str())]);

        let body = self.send(builder).await?;
        let parsed: QueryUsersResponse =
            serde_json::from_str(&body).map_err(|e| StreamError::Decode(e.to_string()))?;
        Ok(parsed.users.into_iter().map(DirectoryEntry::from).collect())
    }

    async fn remove_user(&self, user_id: &str) -> Result<(), StreamError> {
        let url = self.endpoint(&["users", user_id])?;
        let builder = self.authed(Method::DELETE, &url)?.query(&[
            ("hard_delete", bool_param(self.delete.hard_delete)),
            (
                "mark_messages_deleted",
                bool_param(self.delete.mark_messages_deleted),
            ),
        ]);
        self.send(builder).await.map(|_| ())
    }
}

fn bool_param(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

#[async_trait]
impl DirectoryBackend for StreamDirectoryClient {
    #[instrument(
        name = "session_bootstrap.stream.create_token",
        skip_all,
        fields(user_id = %user_id)
    )]
    async fn create_token(&self, user_id: &str) -> Result<AuthToken, DomainError> {
        self.signer
            .user_token(user_id)
            .map(AuthToken::new)
            .map_err(|e| e.into_domain("create_token"))
    }

    #[instrument(
        name = "session_bootstrap.http.stream.query_users",
        skip_all,
        fields(base = %self.base_url)
    )]
    async fn query_users(&self, filter: &UserFilter) -> Result<Vec<DirectoryEntry>, DomainError> {
        self.fetch_users(filter)
            .await
            .map_err(|e| e.into_domain("query_users"))
    }

    #[instrument(
        name = "session_bootstrap.http.stream.delete_user",
        skip_all,
        fields(user_id = %user_id)
    )]
    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError> {
        self.remove_user(user_id)
            .await
            .map_err(|e| e.into_domain("delete_user"))
    }
}
