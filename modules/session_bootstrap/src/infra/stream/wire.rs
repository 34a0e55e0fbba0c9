use serde::{Deserialize, Serialize};

use crate::contract::model::{DirectoryEntry, Role};

/// `payload` query parameter of `GET /users`.
#[derive(Debug, Serialize)]
pub(super) struct QueryUsersPayload<'a> {
    pub filter_conditions: &'a serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QueryUsersResponse {
    #[serde(default)]
    pub users: Vec<StreamUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StreamUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub online: bool,
}

impl From<StreamUser> for DirectoryEntry {
    fn from(u: StreamUser) -> Self {
        Self {
            id: u.id,
            online: u.online,
            // No role on the wire is not the `user` role; such entries are never stale.
            role: u
                .role
                .as_deref()
                .map(Role::from)
                .unwrap_or_else(|| Role::Other(String::new())),
        }
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
