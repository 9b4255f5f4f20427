// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Security
//!
//! - The JWKS is fetched via HTTPS only
//! - Keys are cached with a configurable TTL and replaced wholesale on
//!   refresh; a cached set is never mutated
//! - Fetch failures fail closed: the triggering request is rejected
//!
//! Concurrent requests that both observe an expired cache may race to fetch.
//! The fetch is idempotent and the last write wins, so no coordination is
//! needed beyond the lock around the cache slot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;

use super::error::AuthError;

/// Default JWKS cache TTL (5 minutes).
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Timeout for a single JWKS fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// JWKS cache entry: the full key set plus its fetch time.
struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// Caching provider for the identity provider's signing keys.
///
/// At most one network fetch happens per TTL window in the common case;
/// everything else is served from the in-memory cache.
#[derive(Clone)]
pub struct JwksManager {
    /// JWKS endpoint URL
    jwks_url: String,
    /// Cache TTL
    cache_ttl: Duration,
    /// Cached key set, replaced wholesale on refresh
    cache: Arc<RwLock<Option<CacheEntry>>>,
    /// HTTP client
    client: reqwest::Client,
}

impl JwksManager {
    /// Create a new JWKS manager for the given endpoint
    /// (e.g. `https://your-tenant.auth0.com/.well-known/jwks.json`).
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Arc::new(RwLock::new(None)),
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create with a custom cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Get the decoding key for the given key ID.
    ///
    /// Serves from the cache when it holds a non-expired entry; otherwise
    /// refetches the key set first. A key ID absent from a fresh set is
    /// [`AuthError::KeyNotFound`].
    pub async fn get_decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let jwks = self.get_jwks().await?;

        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))
            .ok_or(AuthError::KeyNotFound)?;

        rsa_decoding_key(jwk)
    }

    /// Force a refresh of the key set, replacing the cache.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let jwks = self.fetch_jwks().await?;
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            jwks,
            fetched_at: Instant::now(),
        });
        Ok(())
    }

    /// Check whether a non-expired key set is cached.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        match &*cache {
            Some(entry) => entry.fetched_at.elapsed() < self.cache_ttl,
            None => false,
        }
    }

    /// Fetch the key set, serving from the cache within the TTL window.
    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CacheEntry {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(jwks)
    }

    /// Fetch the key set from the endpoint.
    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeyFetchFailed(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::KeyFetchFailed(e.to_string()))
    }
}

/// Convert an RSA JWK into a decoding key.
///
/// Only RSA keys are usable: RS256 is the single accepted algorithm, so a
/// key of any other type can never verify a token here.
fn rsa_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|_| AuthError::KeyNotFound),
        _ => Err(AuthError::KeyNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_records_endpoint() {
        let manager = JwksManager::new("https://tenant.eu.auth0.com/.well-known/jwks.json");
        assert_eq!(
            manager.jwks_url(),
            "https://tenant.eu.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn custom_cache_ttl() {
        let manager = JwksManager::new("https://tenant.eu.auth0.com/.well-known/jwks.json")
            .with_cache_ttl(Duration::from_secs(60));
        assert_eq!(manager.cache_ttl, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn cache_starts_empty() {
        let manager = JwksManager::new("https://tenant.eu.auth0.com/.well-known/jwks.json");
        assert!(!manager.is_cached().await);
    }

    #[test]
    fn non_rsa_keys_are_rejected() {
        let jwk: Jwk = serde_json::from_value(serde_json::json!({
            "kty": "oct",
            "kid": "sym-1",
            "k": "c2VjcmV0",
        }))
        .unwrap();
        assert!(matches!(
            rsa_decoding_key(&jwk),
            Err(AuthError::KeyNotFound)
        ));
    }
}
