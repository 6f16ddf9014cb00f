//! Credential dispatch.

use std::sync::Arc;

use crate::apikey::ApiKeyVerifier;
use crate::config::AuthConfig;
use crate::credential::{AuthResponse, Credential};
use crate::error::Result;
use crate::store::{ApiKeyStore, UserStore};
use crate::token::TokenVerifier;

/// Routes a credential to the verifier matching its kind.
///
/// Holds nothing but the two verifiers: no caching, no rate limiting, no
/// audit trail. Verifier failures pass through unchanged.
pub struct AuthRealm {
    api_keys: ApiKeyVerifier,
    tokens: TokenVerifier,
}

impl AuthRealm {
    /// Build a realm with both verifiers over the given stores.
    pub fn new(
        config: &AuthConfig,
        keys: Arc<dyn ApiKeyStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            api_keys: ApiKeyVerifier::new(keys, Arc::clone(&users)),
            tokens: TokenVerifier::new(config, users),
        }
    }

    /// The token verifier, for issuing at login and refresh endpoints.
    pub fn tokens(&self) -> &TokenVerifier {
        &self.tokens
    }

    /// Authenticate a credential with the verifier matching its kind.
    ///
    /// The match is exhaustive over the closed credential enum, so a new
    /// kind fails compilation here until it is routed.
    pub async fn authenticate(&self, credential: &Credential) -> Result<AuthResponse> {
        match credential {
            Credential::ApiKey { .. } => self.api_keys.authenticate(credential).await,
            Credential::Token { .. } | Credential::RefreshToken { .. } => {
                self.tokens.authenticate(credential).await
            }
        }
    }
}
