use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{IdentityRequest, IssuedSession, PlayerNumber, UserIdentity};
use crate::domain::deadline::bounded;
use crate::domain::error::DomainError;
use crate::domain::ports::DirectoryBackend;

/// Allocates fresh player identities and binds a backend token to each.
///
/// Stateless across calls: concurrent requests share nothing but the
/// backend handle.
#[derive(Clone)]
pub struct IdentityIssuer {
    backend: Arc<dyn DirectoryBackend>,
    call_timeout: Duration,
}

impl IdentityIssuer {
    pub fn new(backend: Arc<dyn DirectoryBackend>, call_timeout: Duration) -> Self {
        Self {
            backend,
            call_timeout,
        }
    }

    #[instrument(name = "session_bootstrap.service.issue", skip_all)]
    pub async fn issue(&self, request: IdentityRequest) -> Result<IssuedSession, DomainError> {
        let (display_name, player_number) = validate(request)?;

        let id = Uuid::new_v4().to_string();
        debug!(user_id = %id, "allocated identity");

        let token = bounded(
            "create_token",
            self.call_timeout,
            self.backend.create_token(&id),
        )
        .await?;

        info!(user_id = %id, player_number = %player_number, "issued session token");
        Ok(IssuedSession {
            identity: UserIdentity {
                id,
                display_name,
                player_number,
            },
            token,
        })
    }
}

fn validate(request: IdentityRequest) -> Result<(String, PlayerNumber), DomainError> {
    let display_name = request
        .player_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| DomainError::missing_field("playerName"))?;

    let player_number = match request.player_number {
        None | Some(serde_json::Value::Null) => {
            return Err(DomainError::missing_field("playerNumber"))
        }
        Some(serde_json::Value::Number(n)) => PlayerNumber::Number(n),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
            return Err(DomainError::missing_field("playerNumber"))
        }
        Some(serde_json::Value::String(s)) => PlayerNumber::Text(s),
        Some(_) => {
            return Err(DomainError::validation(
                "playerNumber",
                "must be a number or a string",
            ))
        }
    };

    Ok((display_name, player_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn req(name: Option<&str>, number: Option<serde_json::Value>) -> IdentityRequest {
        IdentityRequest {
            player_name: name.map(str::to_string),
            player_number: number,
        }
    }

    #[test]
    fn accepts_numeric_and_text_player_numbers() {
        let (name, number) = validate(req(Some("Ada"), Some(json!(2)))).unwrap();
        assert_eq!(name, "Ada");
        assert_eq!(number, PlayerNumber::Number(serde_json::Number::from(2u64)));

        let (_, number) = validate(req(Some("Ada"), Some(json!("X")))).unwrap();
        assert_eq!(number, PlayerNumber::Text("X".into()));
    }

    #[test]
    fn zero_is_a_valid_player_number() {
        let (_, number) = validate(req(Some("Ada"), Some(json!(0)))).unwrap();
        assert_eq!(number.to_string(), "0");
    }

    #[test]
    fn rejects_missing_or_blank_name() {
        for name in [None, Some(""), Some("   ")] {
            assert_eq!(
                validate(req(name, Some(json!(1)))),
                Err(DomainError::missing_field("playerName"))
            );
        }
    }

    #[test]
    fn rejects_missing_player_number() {
        for number in [None, Some(json!(null)), Some(json!("")), Some(json!(" "))] {
            assert_eq!(
                validate(req(Some("Ada"), number)),
                Err(DomainError::missing_field("playerNumber"))
            );
        }
    }

    #[test]
    fn rejects_structured_player_number() {
        for number in [json!(true), json!([1]), json!({"n": 1})] {
            let err = validate(req(Some("Ada"), Some(number))).unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation {
                    field: "playerNumber",
                    ..
                }
            ));
        }
    }
}
