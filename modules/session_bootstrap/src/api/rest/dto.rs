use serde::{Deserialize, Serialize};

use crate::contract::model::{
    DeleteFailure, DirectoryEntry, IdentityRequest, IssuedSession, PlayerNumber,
    ReconciliationReport,
};

/// `POST /setup` request body. Everything is optional on the wire so that
/// incomplete requests reach the issuer's validation instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupReq {
    #[serde(default)]
    pub game_states: Option<GameStatesDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatesDto {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_number: Option<serde_json::Value>,
}

/// `POST /setup` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupResp {
    pub user_props: UserPropsDto,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPropsDto {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub player_name: String,
    pub player_number: PlayerNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntryDto {
    pub id: String,
    pub online: bool,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryDto {
    pub users: Vec<DirectoryEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFailureDto {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReportDto {
    pub scanned: usize,
    pub deleted: usize,
    pub failures: Vec<DeleteFailureDto>,
}

// Conversion implementations between REST DTOs and contract models

impl From<SetupReq> for IdentityRequest {
    fn from(req: SetupReq) -> Self {
        let states = req.game_states.unwrap_or_default();
        Self {
            player_name: states.player_name,
            player_number: states.player_number,
        }
    }
}

impl From<IssuedSession> for SetupResp {
    fn from(session: IssuedSession) -> Self {
        Self {
            user_props: UserPropsDto {
                user_id: session.identity.id,
                player_name: session.identity.display_name,
                player_number: session.identity.player_number,
            },
            token: session.token.into_inner(),
        }
    }
}

impl From<DirectoryEntry> for DirectoryEntryDto {
    fn from(e: DirectoryEntry) -> Self {
        Self {
            role: e.role.as_str().to_string(),
            id: e.id,
            online: e.online,
        }
    }
}

impl From<DeleteFailure> for DeleteFailureDto {
    fn from(f: DeleteFailure) -> Self {
        Self {
            id: f.id,
            reason: f.reason,
        }
    }
}

impl From<ReconciliationReport> for ReconcileReportDto {
    fn from(r: ReconciliationReport) -> Self {
        Self {
            scanned: r.scanned,
            deleted: r.deleted,
            failures: r.failures.into_iter().map(Into::into).collect(),
        }
    }
}
