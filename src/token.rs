//! Signed-token issuance and verification.
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 over a shared secret.
//! Claims carry a free-form identity payload next to the standard issuer and
//! timestamp fields. Access and refresh tokens share one secret and one
//! validation path; nothing inside a token marks its purpose, only the
//! header that carried it does. That asymmetry is deliberate and documented
//! rather than fixed, since binding purpose into the claims would invalidate
//! every outstanding token.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::credential::{AuthMode, AuthResponse, Credential};
use crate::error::{AuthError, Result};
use crate::store::UserStore;

/// Issuer claim stamped into every token.
pub const TOKEN_ISSUER: &str = "keyport";

/// Signed payload of a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Free-form identity attributes. Carries at least the user id under
    /// `"id"`.
    pub payload: serde_json::Value,

    /// Issuer.
    pub iss: String,

    /// Issued at (unix seconds).
    pub iat: i64,

    /// Expires at (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// User id carried in the identity payload, if present and well formed.
    pub fn user_id(&self) -> Option<Uuid> {
        self.payload
            .get("id")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

/// Issues and verifies signed tokens, and resolves their owners.
pub struct TokenVerifier {
    secret: String,
    decoding_key: DecodingKey,
    access_ttl: String,
    refresh_ttl: String,
    users: Arc<dyn UserStore>,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            secret: config.token_secret.clone(),
            access_ttl: config.access_token_ttl.clone(),
            refresh_ttl: config.refresh_token_ttl.clone(),
            users,
        }
    }

    /// Sign a token for `payload` expiring after `expires_in`.
    ///
    /// `expires_in` is a compact spec: an integer followed by `h`, `m` or
    /// `d`. Issued-at and expires-at come from one clock read, so the spread
    /// equals the spec exactly.
    pub fn issue(
        &self,
        payload: &serde_json::Value,
        expires_in: &str,
        secret: &str,
    ) -> Result<String> {
        let ttl = parse_ttl(expires_in)?;
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(AuthError::InvalidExpiresIn)?;

        let claims = Claims {
            payload: payload.clone(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Sign a short-lived access token with the configured TTL and secret.
    pub fn issue_access(&self, payload: &serde_json::Value) -> Result<String> {
        self.issue(payload, &self.access_ttl, &self.secret)
    }

    /// Sign a refresh token with the configured TTL and secret.
    pub fn issue_refresh(&self, payload: &serde_json::Value) -> Result<String> {
        self.issue(payload, &self.refresh_ttl, &self.secret)
    }

    /// Verify signature, algorithm and expiry, returning the parsed token.
    ///
    /// Only the HMAC family is accepted; a token claiming any other
    /// algorithm is rejected before signature verification.
    pub fn validate(&self, token: &str) -> Result<TokenData<Claims>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data)
    }

    /// Verify exactly as [`validate`](Self::validate) and yield the claims.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        Ok(self.validate(token)?.claims)
    }

    /// Verify a token credential and resolve its owner.
    ///
    /// Access and refresh credentials go through identical validation; the
    /// kind only reflects which header carried the token.
    pub async fn authenticate(&self, credential: &Credential) -> Result<AuthResponse> {
        let token = match credential {
            Credential::Token { token } | Credential::RefreshToken { token } => token.as_str(),
            Credential::ApiKey { .. } => return Err(AuthError::NotTokenCredential),
        };

        let claims = self.decode(token)?;
        let user_id = claims.user_id().ok_or(AuthError::MissingIdentity)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        debug!(user_id = %user.id, kind = %credential.kind(), "token verified");

        Ok(AuthResponse {
            mode: AuthMode::Token,
            credential: credential.clone(),
            user,
        })
    }
}

/// Parse a compact TTL spec (`<integer><h|m|d>`) into a duration.
fn parse_ttl(spec: &str) -> Result<Duration> {
    let unit = match spec.chars().last() {
        Some(unit) => unit,
        None => return Err(AuthError::InvalidExpiresIn),
    };
    let value: i64 = spec[..spec.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| AuthError::InvalidExpiresIn)?;
    if value < 1 {
        return Err(AuthError::InvalidExpiresIn);
    }
    match unit {
        'h' => Duration::try_hours(value),
        'm' => Duration::try_minutes(value),
        'd' => Duration::try_days(value),
        _ => None,
    }
    .ok_or(AuthError::InvalidExpiresIn)
}
