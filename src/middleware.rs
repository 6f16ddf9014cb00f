//! Request authentication middleware for axum.
//!
//! The boundary collapses every internal failure into one uniform 401 body
//! so callers cannot probe which check failed; the specific error kind is
//! logged instead.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::credential::{extract_credential, AuthResponse, Credential};
use crate::realm::AuthRealm;

/// Header carrying refresh tokens to the refresh endpoint.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub realm: Arc<AuthRealm>,
}

impl AuthState {
    pub fn new(realm: Arc<AuthRealm>) -> Self {
        Self { realm }
    }
}

/// Successful authentication, attached to request extensions for handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthResponse);

/// Middleware guarding routes behind the `Authorization` header.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let credential = match extract_credential(header) {
        Ok(credential) => credential,
        Err(err) => {
            warn!(error = %err, "failed to get credential from request");
            return unauthorized_response();
        }
    };

    let response = match state.realm.authenticate(&credential).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, kind = %credential.kind(), "authentication failed");
            return unauthorized_response();
        }
    };

    request.extensions_mut().insert(AuthenticatedUser(response));
    next.run(request).await
}

/// Middleware guarding the refresh endpoint behind the `x-refresh-token`
/// header.
pub async fn require_refresh(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    // Shape check before any verification work; also catches the missing
    // header, which reads as an empty token.
    if token.split('.').count() != 3 {
        warn!("invalid refresh token structure");
        return unauthorized_response();
    }

    let credential = Credential::RefreshToken {
        token: token.to_string(),
    };
    let response = match state.realm.authenticate(&credential).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "refresh token authentication failed");
            return unauthorized_response();
        }
    };

    request.extensions_mut().insert(AuthenticatedUser(response));
    next.run(request).await
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(serde_json::json!({ "error": "unauthorized" })),
    )
        .into_response()
}
