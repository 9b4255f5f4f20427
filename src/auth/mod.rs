// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! JWT bearer authentication for the messages API.
//!
//! ## Auth Flow
//!
//! 1. Client obtains an access token from the OIDC provider
//! 2. Client sends `Authorization: Bearer <JWT>`
//! 3. Server:
//!    - Fetches the provider JWKS via HTTPS (cached with TTL)
//!    - Verifies JWT signature, expiry, issuer, audience
//!    - Parses the space-delimited `scope` claim into a scope set
//!
//! ## Security
//!
//! - RS256 is pinned server-side; the token's `alg` header is not trusted
//! - Key fetch failures fail closed (the request is rejected)
//! - Clients see a fixed 401/403 body; the failure kind is only logged
//! - Clock skew tolerance is 30 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod validator;

pub use claims::{ScopeSet, ValidatedClaims};
pub use error::AuthError;
pub use extractor::Claims;
pub use jwks::JwksManager;
pub use middleware::require_auth;
pub use validator::TokenValidator;
