// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token validation against the provider's signing keys.

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::claims::{RawClaims, ValidatedClaims};
use super::error::AuthError;
use super::jwks::JwksManager;

/// Clock skew tolerance (30 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 30;

/// Validates bearer tokens: signature, expiry, issuer, audience, and the
/// custom `scope` claim.
///
/// Validation is synchronous per request (no retries) and fails closed on
/// any step.
pub struct TokenValidator {
    jwks: JwksManager,
    issuer: String,
    audience: String,
}

impl TokenValidator {
    pub fn new(jwks: JwksManager, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            jwks,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// The key provider backing this validator.
    pub fn jwks(&self) -> &JwksManager {
        &self.jwks
    }

    /// Validate a bearer token and return its claims.
    ///
    /// Steps: decode the header for the key ID, resolve the signing key via
    /// the JWKS cache, verify signature/expiry/issuer/audience, then parse
    /// the `scope` claim.
    pub async fn validate(&self, token: &str) -> Result<ValidatedClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MalformedToken)?;

        let decoding_key = self.jwks.get_decoding_key(&kid).await?;

        // RS256 is the one accepted algorithm. The token's `alg` header has
        // no say, which rules out algorithm-confusion attacks.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let token_data =
            decode::<RawClaims>(token, &decoding_key, &validation).map_err(map_decode_error)?;

        Ok(ValidatedClaims::from_raw(token_data.claims))
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
        ErrorKind::InvalidIssuer => AuthError::IssuerMismatch,
        ErrorKind::InvalidAudience => AuthError::AudienceMismatch,
        ErrorKind::MissingRequiredClaim(claim) if claim == "aud" => AuthError::AudienceMismatch,
        ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => AuthError::IssuerMismatch,
        _ => AuthError::MalformedToken,
    }
}
