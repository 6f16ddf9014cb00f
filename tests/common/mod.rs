//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use keyport_auth::{
    ApiKeyVerifier, AuthConfig, AuthRealm, MemoryApiKeyStore, MemoryUserStore, User,
};

/// Signing secret shared by every integration-test realm.
pub const TEST_SECRET: &str = "integration-test-secret-key";

/// Fixed test user ID
pub fn test_user_id() -> Uuid {
    Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
}

/// Second fixed user ID, for cross-user cases
pub fn other_user_id() -> Uuid {
    Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap()
}

pub fn test_user() -> User {
    User {
        id: test_user_id(),
        email: "owner@keyport.dev".to_string(),
        name: "Integration Owner".to_string(),
        verified: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        token_secret: TEST_SECRET.to_string(),
        access_token_ttl: "15m".to_string(),
        refresh_token_ttl: "7d".to_string(),
    }
}

/// A realm over seeded memory stores. The stores stay reachable so tests
/// can add keys or revoke them mid-scenario.
pub struct TestRealm {
    pub realm: Arc<AuthRealm>,
    pub keys: Arc<MemoryApiKeyStore>,
    pub users: Arc<MemoryUserStore>,
}

/// Route library tracing to the test writer when `RUST_LOG` is set.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a realm seeded with `user`.
pub async fn realm_with_user(user: &User) -> TestRealm {
    init_test_tracing();

    let keys = Arc::new(MemoryApiKeyStore::new());
    let users = Arc::new(MemoryUserStore::new());
    users.insert(user.clone()).await;

    let realm = Arc::new(AuthRealm::new(&test_config(), keys.clone(), users.clone()));

    TestRealm { realm, keys, users }
}

/// Mint a key for `user`, persist its record, and return the raw key.
pub async fn mint_key(fixture: &TestRealm, user: &User) -> String {
    let (record, raw_key) = ApiKeyVerifier::issue(user.id, "integration", None)
        .expect("issuing a key without expiry cannot fail");
    fixture.keys.insert(record).await;
    raw_key
}

/// Mask segment of a raw `KP.<mask>.<secret>` key.
pub fn mask_of(raw_key: &str) -> &str {
    raw_key.split('.').nth(1).expect("raw key has three segments")
}
