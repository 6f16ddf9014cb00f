//! Persistence seams consumed by the verifiers.
//!
//! The realm is allowed exactly two lookups: a key record by its public mask
//! and a user by id. Both are read-only snapshots; issuing, revoking and
//! deleting records belong to the owning service, not to verification, so
//! the traits expose no write path.

mod memory;

pub use memory::{MemoryApiKeyStore, MemoryUserStore};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::identity::{ApiKeyRecord, User};

/// Persistence-layer failure. A miss is `Ok(None)`, never an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to user identities.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Read access to API-key records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Fetch a key record by its public mask.
    ///
    /// The mask is the only value that ever travels to the store as a query
    /// key; secrets and hashes stay out of queries entirely.
    async fn find_by_mask(&self, mask: &str) -> Result<Option<ApiKeyRecord>, StoreError>;
}
