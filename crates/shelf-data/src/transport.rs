//! Transport seam between the client and the catalog endpoint.

use async_trait::async_trait;
use http::StatusCode;
use shelf_commerce::search::CanonicalQuery;

use crate::NetworkError;

/// Default catalog listing path.
pub const DEFAULT_PRODUCTS_PATH: &str = "/api/products";

/// Raw response from the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// Final request URL, query included.
    pub url: String,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// A 200 response carrying `body`.
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, url, body)
    }
}

/// Issues one GET against the product listing.
///
/// Any HTTP status is a successful transport outcome; status handling
/// belongs to the client.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get(&self, query: &CanonicalQuery) -> Result<TransportResponse, NetworkError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Target `{base_url}{path}`.
    pub fn new(base_url: &str, path: &str) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| NetworkError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url, path))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            client,
            endpoint: format!("{}{}", base, path),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get(&self, query: &CanonicalQuery) -> Result<TransportResponse, NetworkError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query.as_wire_pairs())
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        let url = response.url().to_string();
        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        Ok(TransportResponse::new(status, url, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = reqwest::Client::new();
        let t = HttpTransport::with_client(client.clone(), "http://shop.test/", "/api/products");
        assert_eq!(t.endpoint(), "http://shop.test/api/products");

        let t = HttpTransport::with_client(client, "http://shop.test", "api/products");
        assert_eq!(t.endpoint(), "http://shop.test/api/products");
    }
}
