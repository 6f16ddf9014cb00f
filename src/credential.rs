//! Credential model and header extraction.
//!
//! A [`Credential`] is a caller-presented proof of identity before any
//! verification has happened. The enum is closed on purpose: the realm
//! matches it exhaustively, so adding a credential kind is a compile-time
//! decision point rather than a runtime fallthrough.

use serde::{Deserialize, Serialize};

use crate::apikey::{API_KEY_PREFIX, API_KEY_SEPARATOR};
use crate::error::{AuthError, Result};
use crate::identity::User;

/// Raw credential extracted from a request, prior to verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Full raw API key (`KP.<mask>.<secret>`).
    ApiKey { key: String },

    /// Signed access token carried by `Authorization: Bearer`.
    Token { token: String },

    /// Signed refresh token carried by the `X-Refresh-Token` channel.
    ///
    /// Structurally identical to an access token; only the carrying header
    /// tags it as refresh.
    RefreshToken { token: String },
}

impl Credential {
    /// The kind tag, for dispatch and logging.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credential::ApiKey { .. } => CredentialKind::ApiKey,
            Credential::Token { .. } => CredentialKind::Token,
            Credential::RefreshToken { .. } => CredentialKind::RefreshToken,
        }
    }
}

/// Kind tag of a [`Credential`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    ApiKey,
    Token,
    RefreshToken,
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CredentialKind::ApiKey => "api_key",
            CredentialKind::Token => "token",
            CredentialKind::RefreshToken => "refresh_token",
        };
        f.write_str(s)
    }
}

/// Which verifier authenticated the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    ApiKey,
    Token,
}

/// Successful authentication result.
///
/// Only constructed by a verifier after every check has passed; never
/// partially populated.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResponse {
    /// Which verifier succeeded.
    pub mode: AuthMode,

    /// The credential as presented.
    pub credential: Credential,

    /// The resolved identity.
    pub user: User,
}

/// Parse an `Authorization` header value into a typed credential.
///
/// The value must be exactly `<scheme> <token>` (one space). Scheme matching
/// is case-insensitive. Under `Bearer`, a token starting with `KP.` is an
/// API key and anything else is an access token; the `X-Refresh-Token`
/// scheme always yields a refresh credential.
pub fn extract_credential(header_value: &str) -> Result<Credential> {
    let fields: Vec<&str> = header_value.split(' ').collect();
    if fields.len() != 2 {
        return Err(AuthError::MalformedHeader);
    }

    let scheme = fields[0].to_uppercase();
    let token = fields[1];

    match scheme.as_str() {
        "BEARER" => {
            if token.is_empty() {
                return Err(AuthError::EmptyToken);
            }
            let key_prefix = format!("{}{}", API_KEY_PREFIX, API_KEY_SEPARATOR);
            if token.starts_with(&key_prefix) {
                Ok(Credential::ApiKey {
                    key: token.to_string(),
                })
            } else {
                Ok(Credential::Token {
                    token: token.to_string(),
                })
            }
        }
        "X-REFRESH-TOKEN" => {
            if token.is_empty() {
                return Err(AuthError::EmptyToken);
            }
            Ok(Credential::RefreshToken {
                token: token.to_string(),
            })
        }
        _ => Err(AuthError::UnknownScheme(scheme)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_api_key_prefix_classifies_as_api_key() {
        let cred = extract_credential("Bearer KP.Ml7nXwRH3Nw3uX3x.secretsecret").unwrap();
        assert_eq!(
            cred,
            Credential::ApiKey {
                key: "KP.Ml7nXwRH3Nw3uX3x.secretsecret".to_string()
            }
        );
        assert_eq!(cred.kind(), CredentialKind::ApiKey);
    }

    #[test]
    fn bearer_without_key_prefix_classifies_as_access_token() {
        let cred = extract_credential("Bearer eyJhbGciOiJIUzI1NiJ9.e30.sig").unwrap();
        assert_eq!(cred.kind(), CredentialKind::Token);
    }

    #[test]
    fn refresh_scheme_classifies_as_refresh_token() {
        let cred = extract_credential("X-Refresh-Token abc.def.ghi").unwrap();
        assert_eq!(
            cred,
            Credential::RefreshToken {
                token: "abc.def.ghi".to_string()
            }
        );
    }

    #[test]
    fn scheme_matching_is_case_insensitive() {
        assert_eq!(
            extract_credential("bearer sometoken").unwrap().kind(),
            CredentialKind::Token
        );
        assert_eq!(
            extract_credential("x-refresh-token sometoken").unwrap().kind(),
            CredentialKind::RefreshToken
        );
    }

    #[test]
    fn missing_token_field_is_malformed() {
        assert!(matches!(
            extract_credential("Bearer"),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn extra_fields_are_malformed() {
        assert!(matches!(
            extract_credential("Bearer one two"),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn empty_header_is_malformed() {
        assert!(matches!(
            extract_credential(""),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn empty_bearer_token_is_rejected() {
        assert!(matches!(
            extract_credential("Bearer "),
            Err(AuthError::EmptyToken)
        ));
    }

    #[test]
    fn empty_refresh_token_is_rejected() {
        assert!(matches!(
            extract_credential("X-Refresh-Token "),
            Err(AuthError::EmptyToken)
        ));
    }

    #[test]
    fn unknown_scheme_carries_its_name() {
        match extract_credential("Basic dXNlcjpwYXNz") {
            Err(AuthError::UnknownScheme(scheme)) => assert_eq!(scheme, "BASIC"),
            other => panic!("expected unknown scheme error, got {:?}", other),
        }
    }
}
