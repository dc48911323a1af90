//! Product catalog API client.
//!
//! # Architecture
//!
//! - One read-only GET returning the whole product list as JSON
//! - No caching and no internal retry - retrying is a user action on the
//!   listing page
//! - Pagination and search happen on the fetched list, not on the API
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.load().await?;
//! ```

mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Message shown when the catalog answers with a non-success status.
pub const FAILED_TO_FETCH: &str = "Failed to fetch products";

/// Errors that can occur when loading the catalog.
///
/// The display string is what the listing page shows after "Oops!".
#[derive(Debug, Error)]
pub enum FetchError {
    /// The catalog answered with a non-success status.
    #[error("Failed to fetch products")]
    Status(reqwest::StatusCode),

    /// The request never completed (connection refused, timeout, ...).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not a product list.
    #[error("{0}")]
    Decode(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), FAILED_TO_FETCH);
    }
}
