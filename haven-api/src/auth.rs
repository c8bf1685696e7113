//! Bearer token handling.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the actor id. They are issued
//! by the authentication service that owns registration and login; this crate
//! only verifies them and resolves the actor they name.
use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use chrono::{Duration, Utc};
use haven_ledger::LedgerError;
use haven_shared::types::{Actor, ActorId};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ApiError;
use crate::server::state::AppState;

const TOKEN_TTL_HOURS: i64 = 24;

/// Payload stored in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: ActorId,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtAuthenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuthenticator {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a token for `actor`, valid for a day.
    pub fn issue(&self, actor: ActorId) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: actor,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Checks signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

/// The authenticated actor; rejects the request when no valid token is sent.
pub struct RequireActor(pub Actor);

/// The authenticated actor when a token is sent; anonymous otherwise.
///
/// A token that is present but invalid still rejects the request.
pub struct MaybeActor(pub Option<Actor>);

async fn resolve_actor(parts: &Parts, state: &AppState) -> Result<Option<Actor>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(ApiError::unauthenticated)?;

    let claims = state.authenticator.verify(token).map_err(|err| {
        debug!(error = %err, "Rejected bearer token");
        ApiError::unauthenticated()
    })?;

    let actor = state
        .repository
        .get_actor(claims.sub)
        .await
        .map_err(LedgerError::from)?;

    match actor {
        Some(actor) => Ok(Some(actor)),
        None => {
            debug!(actor = %claims.sub, "Bearer token names an unknown actor");
            Err(ApiError::unauthenticated())
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_actor(parts, state)
            .await?
            .map(RequireActor)
            .ok_or_else(ApiError::unauthenticated)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeActor(resolve_actor(parts, state).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const SECRET: &str = "a-test-secret-that-is-long-enough-to-sign";

    #[test]
    fn test_issue_then_verify() {
        let authenticator = JwtAuthenticator::new(SECRET);
        let actor = Uuid::new_v4();

        let token = authenticator.issue(actor).unwrap();
        let claims = authenticator.verify(&token).unwrap();
        assert_eq!(claims.sub, actor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = JwtAuthenticator::new("another-secret-that-is-also-long-enough")
            .issue(Uuid::new_v4())
            .unwrap();
        assert!(JwtAuthenticator::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let authenticator = JwtAuthenticator::new(SECRET);
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(30)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &authenticator.encoding).unwrap();
        assert!(authenticator.verify(&token).is_err());
    }
}
