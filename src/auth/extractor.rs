// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor that threads validated claims into handlers.
//!
//! Handlers receive the claims as an explicit parameter instead of digging
//! them out of the request context themselves:
//!
//! ```rust,ignore
//! async fn my_handler(Claims(claims): Claims) -> impl IntoResponse {
//!     // claims is ValidatedClaims
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::ValidatedClaims;
use super::error::AuthError;
use super::middleware::bearer_token;
use crate::state::AppState;

/// Extractor for the validated claims of the current request.
///
/// When the route sits behind [`require_auth`](super::require_auth) the
/// claims are already in the request extensions and are handed out directly.
/// On a route without the middleware the extractor validates the bearer
/// token itself, so protected handlers stay protected either way.
pub struct Claims(pub ValidatedClaims);

impl FromRequestParts<AppState> for Claims {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<ValidatedClaims>().cloned() {
            return Ok(Claims(claims));
        }

        let token = bearer_token(&parts.headers)?;
        let claims = state.validator.validate(token).await?;

        Ok(Claims(claims))
    }
}
