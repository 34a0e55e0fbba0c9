use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity handed to a player for one session. Never mutated after issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: String,
    pub player_number: PlayerNumber,
}

/// Caller-supplied player slot, echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerNumber {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerNumber::Number(n) => write!(f, "{n}"),
            PlayerNumber::Text(s) => f.write_str(s),
        }
    }
}

/// Signed backend credential bound to exactly one [`UserIdentity::id`].
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens end up in logs through `?` formatting; keep them out.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Raw input for identity issuance. Fields are optional because clients
/// may omit them; the issuer rejects incomplete requests.
#[derive(Debug, Clone, Default)]
pub struct IdentityRequest {
    pub player_name: Option<String>,
    pub player_number: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub identity: UserIdentity,
    pub token: AuthToken,
}

/// Backend-side role of a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Other(s) => s,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "user" => Role::User,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

/// A user record as known to the messaging backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: String,
    pub online: bool,
    pub role: Role,
}

impl DirectoryEntry {
    /// Offline entries with the default role are removed by reconciliation.
    pub fn is_stale(&self) -> bool {
        !self.id.is_empty() && !self.online && self.role == Role::User
    }
}

/// Filter conditions forwarded verbatim to the backend's user query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter(serde_json::Map<String, serde_json::Value>);

impl UserFilter {
    /// Match every user.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, condition: serde_json::Value) -> Self {
        self.0.insert(field.into(), condition);
        self
    }

    pub fn conditions(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub scanned: usize,
    pub deleted: usize,
    pub failures: Vec<DeleteFailure>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub id: String,
    pub reason: String,
}
