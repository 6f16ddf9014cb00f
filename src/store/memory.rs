//! In-memory stores for development and tests.
//!
//! Production deployments put a database behind the same traits; these keep
//! the realm runnable without one.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::identity::{ApiKeyRecord, User};

use super::{ApiKeyStore, StoreError, UserStore};

/// `RwLock<HashMap>`-backed user store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user, replacing any previous entry with the same id.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

/// `RwLock<HashMap>`-backed key store, indexed by mask.
#[derive(Default)]
pub struct MemoryApiKeyStore {
    keys: RwLock<HashMap<String, ApiKeyRecord>>,
}

impl MemoryApiKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key record under its mask.
    pub async fn insert(&self, record: ApiKeyRecord) {
        self.keys.write().await.insert(record.mask.clone(), record);
    }

    /// Flip the revoked flag on a stored record. No-op on a miss.
    pub async fn revoke(&self, mask: &str) {
        if let Some(record) = self.keys.write().await.get_mut(mask) {
            record.revoked = true;
        }
    }
}

#[async_trait]
impl ApiKeyStore for MemoryApiKeyStore {
    async fn find_by_mask(&self, mask: &str) -> Result<Option<ApiKeyRecord>, StoreError> {
        Ok(self.keys.read().await.get(mask).cloned())
    }
}
