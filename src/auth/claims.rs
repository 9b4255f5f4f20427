// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and the validated-claims representation.
//!
//! Custom claims get one small parser per claim shape instead of dynamic
//! inspection of the payload: the `scope` claim is parsed by
//! [`ScopeSet::from_delimited`], and further claim shapes would get their
//! own parser next to it.

use serde::Deserialize;

/// Ordered set of OAuth2 scopes.
///
/// Parsed from a space-delimited claim value. Order of first appearance is
/// preserved; duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(Vec<String>);

impl ScopeSet {
    /// Parse a space-delimited scope string (e.g. `"openid read:messages"`).
    pub fn from_delimited(value: &str) -> Self {
        let mut scopes: Vec<String> = Vec::new();
        for scope in value.split_whitespace() {
            if !scopes.iter().any(|s| s == scope) {
                scopes.push(scope.to_string());
            }
        }
        Self(scopes)
    }

    /// Check whether a scope is present.
    pub fn contains(&self, scope: &str) -> bool {
        self.0.iter().any(|s| s == scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl std::fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// The `aud` claim: a single string or a list of strings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Check whether the claim contains the given audience.
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Multiple(auds) => auds.iter().any(|a| a == audience),
        }
    }
}

/// Raw JWT payload as deserialized during validation.
///
/// `iss`, `aud` and `exp` are required spec claims; the validator rejects
/// tokens without them before this struct is handed out.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
    /// Space-delimited scope claim, absent for tokens without scopes.
    #[serde(default)]
    pub scope: Option<String>,
}

/// Claims of a successfully validated token.
///
/// Produced once per request by the validator and never mutated afterwards;
/// scope checks only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedClaims {
    /// Subject (end-user or client identifier)
    pub subject: String,
    /// Token issuer
    pub issuer: String,
    /// Token audience(s)
    pub audience: Audience,
    /// Expiration (Unix timestamp)
    pub expires_at: i64,
    /// Issued-at (Unix timestamp)
    pub issued_at: i64,
    /// Granted scopes
    pub scope: ScopeSet,
}

impl ValidatedClaims {
    pub(crate) fn from_raw(raw: RawClaims) -> Self {
        let scope = raw
            .scope
            .as_deref()
            .map(ScopeSet::from_delimited)
            .unwrap_or_default();

        Self {
            subject: raw.sub,
            issuer: raw.iss,
            audience: raw.aud,
            expires_at: raw.exp,
            issued_at: raw.iat,
            scope,
        }
    }

    /// Check whether the token grants the given scope.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.contains(scope)
    }
}
