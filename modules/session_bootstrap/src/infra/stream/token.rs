use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use super::StreamError;

/// Client token claims: binds a connection to one user id.
#[derive(Debug, Serialize)]
struct UserClaims<'a> {
    user_id: &'a str,
}

/// Server-side claims used to authenticate REST calls.
#[derive(Debug, Serialize)]
struct ServerClaims {
    server: bool,
}

/// HS256 signer keyed by the API secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: EncodingKey,
}

impl TokenSigner {
    pub fn new(api_secret: &str) -> Self {
        Self {
            key: EncodingKey::from_secret(api_secret.as_bytes()),
        }
    }

    /// Token handed to a client for `user_id`. Pure function of id and secret.
    pub fn user_token(&self, user_id: &str) -> Result<String, StreamError> {
        if user_id.is_empty() {
            return Err(StreamError::Request("user id must not be empty".into()));
        }
        Ok(encode(&Header::default(), &UserClaims { user_id }, &self.key)?)
    }

    /// Token for server-to-backend REST calls.
    pub fn server_token(&self) -> Result<String, StreamError> {
        Ok(encode(
            &Header::default(),
            &ServerClaims { server: true },
            &self.key,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use std::collections::HashSet;

    fn validation() -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.required_spec_claims = HashSet::new();
        v.validate_exp = false;
        v
    }

    #[test]
    fn user_token_carries_user_id_and_verifies_with_secret() {
        let signer = TokenSigner::new("s3cret");
        let token = signer.user_token("player-1").unwrap();

        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"s3cret"),
            &validation(),
        )
        .unwrap();
        assert_eq!(data.claims["user_id"], "player-1");
        assert_eq!(data.header.alg, Algorithm::HS256);
    }

    #[test]
    fn user_token_is_deterministic_per_id() {
        let signer = TokenSigner::new("s3cret");
        assert_eq!(
            signer.user_token("a").unwrap(),
            signer.user_token("a").unwrap()
        );
        assert_ne!(
            signer.user_token("a").unwrap(),
            signer.user_token("b").unwrap()
        );
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = TokenSigner::new("right").user_token("p").unwrap();
        let res = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"wrong"),
            &validation(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn server_token_has_server_claim() {
        let token = TokenSigner::new("k").server_token().unwrap();
        let data =
            decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b"k"), &validation())
                .unwrap();
        assert_eq!(data.claims["server"], true);
    }

    #[test]
    fn empty_user_id_is_rejected() {
        assert!(matches!(
            TokenSigner::new("k").user_token(""),
            Err(StreamError::Request(_))
        ));
    }
}
