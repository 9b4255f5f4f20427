// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. A missing
//! provider domain or audience is a fatal error: the process exits before
//! serving traffic.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Identity provider domain (e.g. `your-tenant.auth0.com`) | Required |
//! | `AUTH0_AUDIENCE` | Expected JWT audience claim | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use thiserror::Error;
use url::Url;

/// Environment variable name for the identity provider domain.
pub const DOMAIN_ENV: &str = "AUTH0_DOMAIN";

/// Environment variable name for the expected audience claim.
pub const AUDIENCE_ENV: &str = "AUTH0_AUDIENCE";

/// Environment variable name for the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Configuration errors. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set or empty.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    /// An environment variable holds a value that cannot be used.
    #[error("environment variable {0} has an invalid value: {1}")]
    InvalidVar(&'static str, String),
}

/// Server configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity provider domain. Issuer and JWKS URLs are derived from it.
    pub domain: String,
    /// Expected `aud` claim of accepted tokens.
    pub audience: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let domain = require(DOMAIN_ENV)?;
        let audience = require(AUDIENCE_ENV)?;

        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var(PORT_ENV) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidVar(PORT_ENV, value))?,
            Err(_) => 8080,
        };

        let config = Self {
            domain,
            audience,
            host,
            port,
        };

        // A domain that does not yield a well-formed issuer URL is rejected
        // at startup rather than failing every token validation later.
        if Url::parse(&config.issuer()).is_err() {
            return Err(ConfigError::InvalidVar(DOMAIN_ENV, config.domain));
        }

        Ok(config)
    }

    /// Issuer URL derived from the provider domain.
    ///
    /// The trailing slash is significant: the `iss` claim issued by the
    /// provider carries it, and issuer comparison is exact.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// JWKS endpoint published by the provider.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            domain: "tenant.eu.auth0.com".to_string(),
            audience: "https://api.example.com".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn issuer_has_trailing_slash() {
        let config = sample_config();
        assert_eq!(config.issuer(), "https://tenant.eu.auth0.com/");
    }

    #[test]
    fn jwks_url_is_well_known_path() {
        let config = sample_config();
        assert_eq!(
            config.jwks_url(),
            "https://tenant.eu.auth0.com/.well-known/jwks.json"
        );
    }

    // Environment mutations live in a single test so parallel execution
    // cannot interleave them.
    #[test]
    fn from_env_requires_domain_and_audience() {
        env::remove_var(DOMAIN_ENV);
        env::remove_var(AUDIENCE_ENV);
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar(DOMAIN_ENV))
        ));

        env::set_var(DOMAIN_ENV, "tenant.eu.auth0.com");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar(AUDIENCE_ENV))
        ));

        env::set_var(AUDIENCE_ENV, "https://api.example.com");
        env::remove_var(PORT_ENV);
        let config = Config::from_env().expect("config should load");
        assert_eq!(config.domain, "tenant.eu.auth0.com");
        assert_eq!(config.audience, "https://api.example.com");
        assert_eq!(config.port, 8080);

        env::set_var(PORT_ENV, "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidVar(PORT_ENV, _))
        ));

        env::remove_var(DOMAIN_ENV);
        env::remove_var(AUDIENCE_ENV);
        env::remove_var(PORT_ENV);
    }
}
