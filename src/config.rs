//! Environment-driven realm configuration.

/// Signing secret and token lifetimes, read once at startup and treated as
/// immutable for the process lifetime. Verifiers receive this by value at
/// construction; there is no ambient global state.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret shared by access- and refresh-token signing.
    pub token_secret: String,

    /// Access-token TTL spec (`<int><h|m|d>`), e.g. `15m`.
    pub access_token_ttl: String,

    /// Refresh-token TTL spec, e.g. `7d`.
    pub refresh_token_ttl: String,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// `TOKEN_SECRET_KEY` has no usable default; deployments must set it.
    /// TTL specs are validated when a token is issued, not here, so a bad
    /// value surfaces as an issue-time error.
    pub fn from_env() -> Self {
        Self {
            token_secret: std::env::var("TOKEN_SECRET_KEY").unwrap_or_default(),
            access_token_ttl: std::env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "15m".to_string()),
            refresh_token_ttl: std::env::var("REFRESH_TOKEN_TTL")
                .unwrap_or_else(|_| "7d".to_string()),
        }
    }
}
