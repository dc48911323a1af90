//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ESHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `ESHOP_PORT` - Listen port (default: 3000)
//! - `ESHOP_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `ESHOP_CATALOG_URL` - Product catalog endpoint (default: `https://fakestoreapi.com/products`)
//! - `ESHOP_CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `ESHOP_REDIRECT_DELAY_SECS` - Delay before returning home after checkout (default: 10)
//! - `ESHOP_LOAD_MORE_BASIS` - `unfiltered` or `filtered` (default: unfiltered)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::listing::LoadMoreBasis;

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Product catalog configuration
    pub catalog: CatalogConfig,
    /// Delay between a placed order and the redirect home
    pub redirect_delay: Duration,
    /// What the "Load More" control compares the visible window against
    pub load_more_basis: LoadMoreBasis,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Endpoint returning the full product list
    pub url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let host = vars.parse("ESHOP_HOST", "127.0.0.1")?;
        let port = vars.parse("ESHOP_PORT", "3000")?;
        let base_url = vars.or_default("ESHOP_BASE_URL", "http://localhost:3000");
        let catalog = CatalogConfig {
            url: vars.parse("ESHOP_CATALOG_URL", DEFAULT_CATALOG_URL)?,
            timeout: Duration::from_secs(vars.parse("ESHOP_CATALOG_TIMEOUT_SECS", "10")?),
        };
        let redirect_delay = Duration::from_secs(vars.parse("ESHOP_REDIRECT_DELAY_SECS", "10")?);
        let load_more_basis = vars.parse("ESHOP_LOAD_MORE_BASIS", "unfiltered")?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            redirect_delay,
            load_more_basis,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for a local instance talking to the given catalog.
    #[must_use]
    pub fn local(catalog_url: Url) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog: CatalogConfig {
                url: catalog_url,
                timeout: Duration::from_secs(10),
            },
            redirect_delay: Duration::from_secs(10),
            load_more_basis: LoadMoreBasis::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with typed accessors.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional, non-empty variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable (or its default) into `T`.
    fn parse<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.catalog.url.as_str(), DEFAULT_CATALOG_URL);
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.redirect_delay, Duration::from_secs(10));
        assert_eq!(config.load_more_basis, LoadMoreBasis::Unfiltered);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ESHOP_HOST", "0.0.0.0"),
            ("ESHOP_PORT", "8080"),
            ("ESHOP_BASE_URL", "https://shop.example.com"),
            ("ESHOP_CATALOG_URL", "http://127.0.0.1:9000/products"),
            ("ESHOP_REDIRECT_DELAY_SECS", "3"),
            ("ESHOP_LOAD_MORE_BASIS", "filtered"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.catalog.url.port(), Some(9000));
        assert_eq!(config.redirect_delay, Duration::from_secs(3));
        assert_eq!(config.load_more_basis, LoadMoreBasis::Filtered);
        assert!(config.is_secure());
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("ESHOP_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("ESHOP_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ESHOP_PORT"));
    }

    #[test]
    fn test_invalid_catalog_url() {
        let err = load(&[("ESHOP_CATALOG_URL", "not a url")]).unwrap_err();
        assert!(err.to_string().contains("ESHOP_CATALOG_URL"));
    }

    #[test]
    fn test_invalid_load_more_basis() {
        assert!(load(&[("ESHOP_LOAD_MORE_BASIS", "sometimes")]).is_err());
    }
}
