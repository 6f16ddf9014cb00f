//! API-key verification and issuance.
//!
//! Keys are formatted as `KP.<16-char-mask>.<48-char-secret>`. The mask is a
//! public lookup handle; only it is ever sent to the store as a query key.
//! Verification derives a PBKDF2 digest over the entire presented key string
//! and the record's salt, then compares it to the stored hash in constant
//! time. Issuance is the other half of the same scheme: it mints the pair,
//! derives the hash once and hands the caller a record to persist.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, Utc};
use pbkdf2::pbkdf2_hmac;
use rand::{distributions::Alphanumeric, Rng};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;
use uuid::Uuid;

use crate::credential::{AuthMode, AuthResponse, Credential};
use crate::error::{AuthError, Result};
use crate::identity::ApiKeyRecord;
use crate::store::{ApiKeyStore, UserStore};

/// Prefix identifying an API key among bearer tokens.
pub const API_KEY_PREFIX: &str = "KP";

/// Separator between the prefix, mask and secret segments.
pub const API_KEY_SEPARATOR: char = '.';

/// Length of the public mask segment.
pub const MASK_LEN: usize = 16;

/// Length of the secret segment.
pub const SECRET_LEN: usize = 48;

/// Length of a per-record salt.
pub const SALT_LEN: usize = 24;

/// PBKDF2-HMAC-SHA256 iteration count. Fixed for compatibility with every
/// previously issued key.
const PBKDF2_ROUNDS: u32 = 4096;

/// Derived digest length in bytes.
const DIGEST_LEN: usize = 32;

/// Verifies API-key credentials against stored records.
pub struct ApiKeyVerifier {
    keys: Arc<dyn ApiKeyStore>,
    users: Arc<dyn UserStore>,
}

impl ApiKeyVerifier {
    pub fn new(keys: Arc<dyn ApiKeyStore>, users: Arc<dyn UserStore>) -> Self {
        Self { keys, users }
    }

    /// Generate a fresh `(mask, raw_key)` pair.
    ///
    /// The raw key is the full `KP.<mask>.<secret>` string shown to the user
    /// exactly once; only its derived hash is ever stored.
    pub fn generate_key_pair() -> (String, String) {
        let mask = random_alphanumeric(MASK_LEN);
        let secret = random_alphanumeric(SECRET_LEN);
        let raw_key = format!(
            "{}{}{}{}{}",
            API_KEY_PREFIX, API_KEY_SEPARATOR, mask, API_KEY_SEPARATOR, secret
        );
        (mask, raw_key)
    }

    /// Generate a per-record salt.
    pub fn generate_salt() -> String {
        random_alphanumeric(SALT_LEN)
    }

    /// Derive the storage digest for a raw key under a salt.
    ///
    /// Covers the entire presented key string, not just the secret segment,
    /// so a known mask alone never shortcuts the derivation cost.
    pub fn derive_hash(raw_key: &str, salt: &str) -> [u8; DIGEST_LEN] {
        let mut digest = [0u8; DIGEST_LEN];
        pbkdf2_hmac::<Sha256>(
            raw_key.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            &mut digest,
        );
        digest
    }

    /// Mint a new key for `user_id`.
    ///
    /// Returns the record to persist and the plaintext key. The plaintext is
    /// not recoverable afterwards. An expiry, when given, must be in the
    /// future.
    pub fn issue(
        user_id: Uuid,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(ApiKeyRecord, String)> {
        if let Some(expiry) = expires_at {
            if expiry <= Utc::now() {
                return Err(AuthError::ExpiryInPast);
            }
        }

        let (mask, raw_key) = Self::generate_key_pair();
        let salt = Self::generate_salt();
        let hash = URL_SAFE.encode(Self::derive_hash(&raw_key, &salt));

        let now = Utc::now();
        let record = ApiKeyRecord {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            mask,
            salt,
            hash,
            revoked: false,
            expires_at,
            created_at: now,
            updated_at: now,
        };

        Ok((record, raw_key))
    }

    /// Verify an API-key credential and resolve its owner.
    ///
    /// Check order is fixed: shape, mask lookup, stored-hash decode, digest
    /// compare, expiry, revocation, user resolution. A wrong secret is
    /// reported even when the record is also expired or revoked.
    pub async fn authenticate(&self, credential: &Credential) -> Result<AuthResponse> {
        let raw_key = match credential {
            Credential::ApiKey { key } => key.as_str(),
            _ => return Err(AuthError::NotApiKeyCredential),
        };

        let parts: Vec<&str> = raw_key.split(API_KEY_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(AuthError::InvalidKeyLength);
        }
        let mask = parts[1];

        let record = self
            .keys
            .find_by_mask(mask)
            .await?
            .ok_or(AuthError::KeyNotFound)?;

        let stored_hash = URL_SAFE
            .decode(record.hash.as_bytes())
            .map_err(|_| AuthError::CorruptKeyHash)?;

        let derived = Self::derive_hash(raw_key, &record.salt);
        if !bool::from(derived.as_slice().ct_eq(stored_hash.as_slice())) {
            return Err(AuthError::InvalidKey);
        }

        if let Some(expires_at) = record.expires_at {
            if expires_at < Utc::now() {
                return Err(AuthError::KeyExpired);
            }
        }

        if record.revoked {
            return Err(AuthError::KeyRevoked);
        }

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        debug!(user_id = %user.id, mask = %record.mask, "api key verified");

        Ok(AuthResponse {
            mode: AuthMode::ApiKey,
            credential: credential.clone(),
            user,
        })
    }
}

fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}
