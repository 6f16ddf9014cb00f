//! Failure taxonomy for the authentication realm.
//!
//! Verifiers return these variants directly and the realm dispatcher never
//! reclassifies them. The HTTP boundary collapses every variant into a
//! uniform 401 so the internal distinctions stay in logs and tests only.

use crate::store::StoreError;

/// Result alias for realm operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Every way an authentication attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Header value is not exactly `<scheme> <token>`.
    #[error("invalid auth header structure")]
    MalformedHeader,

    /// A recognized scheme carried an empty token.
    #[error("token cannot be empty")]
    EmptyToken,

    /// The scheme is neither `Bearer` nor `X-Refresh-Token`.
    #[error("unknown credential authorization type: {0}")]
    UnknownScheme(String),

    /// The API-key verifier was handed a non-key credential.
    #[error("credential must be of api key type")]
    NotApiKeyCredential,

    /// The token verifier was handed a non-token credential.
    #[error("credential must be of token type")]
    NotTokenCredential,

    /// Presented key does not split into prefix, mask and secret.
    #[error("invalid api key length")]
    InvalidKeyLength,

    /// No record matches the presented mask.
    #[error("api key does not exist")]
    KeyNotFound,

    /// Stored hash failed to base64-decode. Record corruption, not bad input.
    #[error("failed to decode api key hash")]
    CorruptKeyHash,

    /// Derived digest does not match the stored hash.
    #[error("invalid api key")]
    InvalidKey,

    #[error("api key is expired")]
    KeyExpired,

    #[error("api key is revoked")]
    KeyRevoked,

    /// Requested expiry for a new key is not in the future.
    #[error("api key expires_at cannot be before now")]
    ExpiryInPast,

    /// Key record or token payload references a user that does not exist.
    #[error("user not found")]
    UserNotFound,

    /// TTL spec is not `<integer><h|m|d>`.
    #[error("invalid expires in")]
    InvalidExpiresIn,

    /// Token is past its expiry.
    #[error("token is expired")]
    TokenExpired,

    /// Token failed signature, structure or claim checks.
    #[error("error parsing token: {0}")]
    InvalidToken(String),

    /// Token payload carries no usable user id.
    #[error("token payload has no user id")]
    MissingIdentity,

    /// Persistence collaborator failed outright (distinct from a miss).
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}
