// SPDX-License-Identifier: MIT

//! Bearer token authentication middleware.
//!
//! Extracts the `Authorization: Bearer` token, verifies it against the
//! identity provider's published keys and attaches the resulting identity
//! claims to the request for downstream handlers.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated user extracted from a verified ID token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    /// Raw bearer token, reused for identity-record updates on behalf of
    /// the caller.
    pub id_token: String,
}

/// Middleware that requires a valid identity provider ID token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers().get(header::AUTHORIZATION))?;

    let identity = state.token_verifier.verify_id_token(&token).await?;

    let auth_user = AuthUser {
        uid: identity.uid,
        email: identity.email,
        id_token: token,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Pull the bearer token out of an `Authorization` header value.
///
/// A missing, non-Bearer or empty header is a missing token; only
/// verification failures count as invalid.
fn extract_bearer_token(auth_header: Option<&HeaderValue>) -> Result<String, AppError> {
    let value = auth_header
        .ok_or(AppError::MissingToken)?
        .to_str()
        .map_err(|_| AppError::MissingToken)?;

    let token = value.strip_prefix("Bearer ").ok_or(AppError::MissingToken)?;

    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_errors() {
        assert!(matches!(
            extract_bearer_token(None),
            Err(AppError::MissingToken)
        ));

        let bad = HeaderValue::from_static("Basic abc");
        assert!(matches!(
            extract_bearer_token(Some(&bad)),
            Err(AppError::MissingToken)
        ));

        let empty = HeaderValue::from_static("Bearer ");
        assert!(matches!(
            extract_bearer_token(Some(&empty)),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn extract_bearer_token_success() {
        let ok = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(Some(&ok)).unwrap(), "abc.def.ghi");
    }
}
