//! Bearer token issuing and validation.
//!
//! Tokens are HS256 JWTs carrying the account id, display name, role, and
//! — for managers — the canteen the account is bound to. The canteen id in
//! the token is what scopes every `/manager` request; it is never taken
//! from the request body.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use ceats_sdk::objects::auth::Role;

/// Claims stored in the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: Uuid,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Bound canteen, for manager accounts.
    pub canteen_id: Option<Uuid>,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issued at timestamp.
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Issues and validates bearer tokens. One instance lives behind the
/// shared config so a SIGHUP can rotate the secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issue a token for a signed-in account.
    pub fn issue(
        &self,
        user_id: Uuid,
        name: &str,
        role: Role,
        canteen_id: Option<Uuid>,
    ) -> Result<String, TokenError> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: user_id,
            name: name.to_owned(),
            role,
            canteen_id,
            exp: now + self.ttl_minutes * 60,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    /// Pull the raw token out of an `Authorization` header value.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-at-least-32-bytes-long!", 60)
    }

    #[test]
    fn issued_tokens_verify_with_their_claims() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let canteen_id = Uuid::new_v4();

        let token = svc
            .issue(user_id, "Nook Manager", Role::Manager, Some(canteen_id))
            .unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.name, "Nook Manager");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.canteen_id, Some(canteen_id));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = service()
            .issue(Uuid::new_v4(), "Asha", Role::Customer, None)
            .unwrap();
        let other = TokenService::new("another-secret-also-32-bytes-long!!!", 60);
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_tokens_are_invalid() {
        assert!(matches!(
            service().verify("not.a.jwt"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(
            TokenService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(TokenService::extract_from_header("Basic abc"), None);
    }
}
