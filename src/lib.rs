//! Keyport Authentication Realm
//!
//! Turns an inbound raw credential (a bearer string from an HTTP header)
//! into a verified identity, across two credential kinds: long-lived API
//! keys (`KP.<mask>.<secret>`) and short-lived signed tokens
//! (access/refresh), behind one dispatch contract.
//!
//! ## Modules
//!
//! - [`credential`] - Credential model and header extraction
//! - [`apikey`] - API-key verification and issuance
//! - [`token`] - Signed-token issuance and verification
//! - [`realm`] - Dispatch by credential kind
//! - [`store`] - Persistence seams and in-memory stores
//! - [`identity`] - User and key-record models
//! - [`middleware`] - Axum request guards
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Failure taxonomy

pub mod apikey;
pub mod config;
pub mod credential;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod realm;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use apikey::{ApiKeyVerifier, API_KEY_PREFIX, API_KEY_SEPARATOR};
pub use config::AuthConfig;
pub use credential::{extract_credential, AuthMode, AuthResponse, Credential, CredentialKind};
pub use error::{AuthError, Result};
pub use identity::{ApiKeyRecord, User};
pub use middleware::{
    require_auth, require_refresh, AuthState, AuthenticatedUser, REFRESH_TOKEN_HEADER,
};
pub use realm::AuthRealm;
pub use store::{ApiKeyStore, MemoryApiKeyStore, MemoryUserStore, StoreError, UserStore};
pub use token::{Claims, TokenVerifier, TOKEN_ISSUER};
