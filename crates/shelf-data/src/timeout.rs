//! Client configuration and the opt-in timeout wrapper.

use std::future::Future;
use std::time::Duration;

use crate::NetworkError;

/// Catalog client settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on one fetch. `None` waits for the transport.
    pub timeout: Option<Duration>,
    /// Treat a 404 from the catalog as an empty result.
    pub empty_on_not_found: bool,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_empty_on_not_found(mut self, enabled: bool) -> Self {
        self.empty_on_not_found = enabled;
        self
    }
}

/// Await `fut`, failing with `NetworkError::Timeout` once `limit` elapses.
pub(crate) async fn within<F, T>(limit: Option<Duration>, fut: F) -> Result<T, NetworkError>
where
    F: Future<Output = Result<T, NetworkError>>,
{
    match limit {
        None => fut.await,
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| NetworkError::Timeout(limit))?,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, None);
        assert!(!config.empty_on_not_found);
    }

    #[tokio::test]
    async fn within_reports_the_limit() {
        let limit = Duration::from_millis(10);
        let result: Result<(), _> = within(Some(limit), futures::future::pending()).await;
        assert_eq!(result, Err(NetworkError::Timeout(limit)));
    }

    #[tokio::test]
    async fn within_passes_through_without_limit() {
        let result = within(None, async { Ok::<_, NetworkError>(7) }).await;
        assert_eq!(result, Ok(7));
    }
}
