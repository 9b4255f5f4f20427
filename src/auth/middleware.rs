// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Apply with `axum::middleware::from_fn_with_state(state, require_auth)` on
//! the router subtree that needs a valid bearer token. On success the
//! validated claims are stored in the request extensions, where the
//! [`Claims`](super::Claims) extractor hands them to the downstream handler;
//! on failure the request is rejected without reaching the handler.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::AuthError;
use crate::state::AppState;

/// Require a valid bearer token for every request passing through.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(token) => token.to_owned(),
        Err(err) => return err.into_response(),
    };

    match state.validator.validate(&token).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Extract the bearer token from the Authorization header.
///
/// The header value must be exactly `Bearer <token>`; anything else,
/// including a missing header or an empty token, is rejected.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let headers = headers_with("Token abc123");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn lowercase_scheme_is_rejected() {
        let headers = headers_with("bearer abc123");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        let headers = headers_with("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn bare_scheme_is_rejected() {
        let headers = headers_with("Bearer");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn well_formed_header_yields_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
