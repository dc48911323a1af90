//! Application state shared across handlers.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::catalog::{CatalogClient, FetchError};
use crate::config::StorefrontConfig;
use crate::middleware::content_security_policy;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Per-visitor state lives in
/// the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    content_security_policy: HeaderValue,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, FetchError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let content_security_policy = content_security_policy(&config.catalog.url);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content_security_policy,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Content Security Policy sent with every response.
    #[must_use]
    pub fn content_security_policy(&self) -> &HeaderValue {
        &self.inner.content_security_policy
    }
}
