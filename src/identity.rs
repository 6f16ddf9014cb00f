//! Identity and API-key records as the realm reads them.
//!
//! Both types are owned by the persistence layer; the realm only reads them
//! through the `store` traits and never mutates a record in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identity resolved by a successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub email: String,

    /// Display name.
    pub name: String,

    /// Whether the account's email has been verified.
    pub verified: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Persisted API-key record.
///
/// `mask` is the public lookup handle and the only value that ever travels
/// to the store as a query key. `hash` is the base64 (URL-safe, padded)
/// PBKDF2 digest of the full raw key under `salt`; the plaintext secret is
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: Uuid,

    /// Owning user.
    pub user_id: Uuid,

    /// Human-readable label chosen at issuance.
    pub name: String,

    /// 16-char public lookup handle embedded in the raw key.
    pub mask: String,

    /// 24-char random string fixed at issuance.
    pub salt: String,

    /// Base64-encoded derived digest of the raw key.
    pub hash: String,

    pub revoked: bool,

    /// `None` means the key never expires.
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}
