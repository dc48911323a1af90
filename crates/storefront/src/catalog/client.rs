//! Catalog client implementation.

use std::sync::Arc;

use eshop_core::Product;
use tracing::instrument;
use url::Url;

use super::FetchError;
use crate::config::CatalogConfig;

/// Client for the product catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint: config.url.clone(),
            }),
        })
    }

    /// The endpoint this client reads from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch the full product list.
    ///
    /// Issues exactly one request. The caller owns any state transitions.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` for a non-success response, otherwise
    /// an error carrying the underlying transport or decoding message.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn load(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Catalog request failed");
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "Catalog returned non-success status");
            return Err(FetchError::Status(status));
        }

        let products: Vec<Product> = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to decode catalog response");
            FetchError::Decode(e)
        })?;

        tracing::info!(count = products.len(), "Fetched products");
        Ok(products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::{Router, http::StatusCode, routing::get};
    use eshop_core::ProductId;

    use super::*;
    use crate::catalog::FAILED_TO_FETCH;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/products")).unwrap()
    }

    fn client(url: Url) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            url,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_success() {
        let body = r#"[
            {"id": 1, "title": "Product 1", "description": "Description", "price": 10, "image": "https://example.test/1.jpg"},
            {"id": 2, "title": "Product 2", "description": "Description", "price": 19.99, "image": "https://example.test/2.jpg"}
        ]"#;
        let url = serve(Router::new().route(
            "/products",
            get(move || async move { ([("content-type", "application/json")], body) }),
        ))
        .await;

        let products = client(url).load().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[1].price.to_string(), "$19.99");
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_fixed_message() {
        let url = serve(Router::new().route(
            "/products",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;

        let err = client(url).load().await.unwrap_err();
        assert!(
            matches!(err, FetchError::Status(status) if status == StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(err.to_string(), FAILED_TO_FETCH);
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let url = serve(Router::new().route("/products", get(|| async { "not json" }))).await;

        let err = client(url).load().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_ne!(err.to_string(), FAILED_TO_FETCH);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/products")).unwrap();
        let err = client(url).load().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
