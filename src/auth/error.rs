// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! The external signal is intentionally coarse: every authentication failure
//! produces the same 401 body, and a missing scope produces the same 403
//! body, so clients cannot distinguish a bad signature from an unknown key.
//! The precise kind is logged server-side before the response is built.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Token validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header present
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Token is structurally invalid
    MalformedToken,
    /// No key in the provider's key set matches the token's key ID
    KeyNotFound,
    /// The provider's key set could not be fetched
    KeyFetchFailed(String),
    /// Token signature does not verify
    SignatureInvalid,
    /// Token has expired (beyond the clock skew tolerance)
    Expired,
    /// Token issuer does not match the expected issuer
    IssuerMismatch,
    /// Token audience does not contain the expected audience
    AudienceMismatch,
    /// Token is valid but lacks a required scope
    InsufficientScope,
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: &'static str,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    ///
    /// Everything except a missing scope is 401: key fetch failures fail
    /// closed and are indistinguishable from any other rejected token.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InsufficientScope => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            AuthError::InsufficientScope => "Insufficient scope.",
            _ => "Unauthorized.",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::KeyNotFound => write!(f, "No matching key found in JWKS"),
            AuthError::KeyFetchFailed(msg) => write!(f, "Failed to fetch JWKS: {msg}"),
            AuthError::SignatureInvalid => write!(f, "Token signature is invalid"),
            AuthError::Expired => write!(f, "Token has expired"),
            AuthError::IssuerMismatch => write!(f, "Token issuer is invalid"),
            AuthError::AudienceMismatch => write!(f, "Token audience is invalid"),
            AuthError::InsufficientScope => write!(f, "Token lacks a required scope"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request rejected");
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            message: self.body(),
        });
        (status, body).into_response()
    }
}
