//! HTTP state fetcher

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info, instrument, warn};

use hostfold_core::Inventory;

use crate::config::ConnectionConfig;
use crate::error::{ClientError, Result};
use crate::inventory::read_inventory;
use crate::traits::StateSource;

const JSON: &str = "application/json";

/// Longest response body kept in an [`ClientError::UnexpectedStatus`]
pub const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Fetches state documents from the configured endpoint
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and clones share the
/// pool.
#[derive(Debug, Clone)]
pub struct StateFetcher {
    client: Client,
    config: ConnectionConfig,
}

impl StateFetcher {
    /// Create a fetcher for `config`
    ///
    /// The HTTP client is always built from `config`, so the TLS setting
    /// reported by [`is_degraded_security`](Self::is_degraded_security) is the
    /// one in effect.
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`] if the timeout is zero or the
    /// HTTP client cannot be built.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.insecure_skip_verify() {
            warn!(
                base_url = %config.base_url(),
                "TLS certificate verification disabled, connection is not authenticated"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = config.timeout() {
            if timeout.is_zero() {
                return Err(ClientError::Configuration(
                    "request timeout must be greater than zero".into(),
                ));
            }
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Whether this fetcher talks to the endpoint without verifying TLS
    #[must_use]
    pub fn is_degraded_security(&self) -> bool {
        self.config.insecure_skip_verify()
    }

    /// GET the document at `endpoint`, relative to the base URL
    ///
    /// # Errors
    /// - [`ClientError::Configuration`] if `endpoint` is `None` or blank
    /// - [`ClientError::Transport`] if the request or body read fails
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response
    #[instrument(skip(self), fields(base_url = %self.config.base_url()))]
    pub async fn get_state(&self, endpoint: Option<&str>) -> Result<Vec<u8>> {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ClientError::Configuration("missing mandatory state endpoint".into()))?;
        let url = self.config.endpoint_url(endpoint)?;

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);
        if let Some(credentials) = self.config.credentials() {
            request = request.basic_auth(credentials.username(), Some(credentials.password()));
        }

        debug!(
            url = %url,
            authenticated = self.config.credentials().is_some(),
            "fetching state document"
        );

        let transport = |source| ClientError::Transport {
            endpoint: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "state endpoint returned an error");
            return Err(ClientError::UnexpectedStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        info!(url = %url, bytes = body.len(), "fetched state document");

        Ok(body.to_vec())
    }

    /// Fetch the configured state endpoint and build the inventory
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`] if no state endpoint is
    /// configured, or any error from fetching and parsing.
    ///
    /// # Example
    /// ```no_run
    /// # use hostfold_client::{ConnectionConfig, StateFetcher};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConnectionConfig::new("http://localhost:8080")?
    ///     .with_state_endpoint("/api/state");
    /// let fetcher = StateFetcher::new(config)?;
    /// let inventory = fetcher.inventory().await?;
    /// for (group, members) in inventory.groups().iter() {
    ///     println!("{group}: {}", members.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn inventory(&self) -> Result<Inventory> {
        read_inventory(self, self.config.state_endpoint()).await
    }
}

#[async_trait]
impl StateSource for StateFetcher {
    async fn fetch(&self, endpoint: Option<&str>) -> Result<Vec<u8>> {
        self.get_state(endpoint).await
    }

    fn source_type(&self) -> &'static str {
        "http"
    }
}

/// Body text for error reports, cut at [`MAX_ERROR_BODY_BYTES`]
fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_ERROR_BODY_BYTES {
        return text.into_owned();
    }
    let mut cut = MAX_ERROR_BODY_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... ({} bytes truncated)", &text[..cut], text.len() - cut)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Credentials;

    fn fetcher(config: ConnectionConfig) -> StateFetcher {
        StateFetcher::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_configuration_error() {
        let fetcher = fetcher(ConnectionConfig::new("http://localhost:8080").unwrap());

        let err = fetcher.get_state(None).await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert!(!err.is_retryable());

        let err = fetcher.get_state(Some("  ")).await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_inventory_without_configured_endpoint() {
        let fetcher = fetcher(ConnectionConfig::new("http://localhost:8080").unwrap());
        let err = fetcher.inventory().await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_degraded_security_flag() {
        let secure = fetcher(ConnectionConfig::new("https://localhost").unwrap());
        assert!(!secure.is_degraded_security());

        let insecure = fetcher(
            ConnectionConfig::new("https://localhost")
                .unwrap()
                .with_insecure_skip_verify(true)
                .with_credentials(Some(Credentials::new("admin", "secret"))),
        );
        assert!(insecure.is_degraded_security());
        assert_eq!(insecure.source_type(), "http");
    }

    #[test]
    fn test_zero_timeout_is_configuration_error() {
        let config = ConnectionConfig::new("http://localhost:8080")
            .unwrap()
            .with_timeout(Duration::ZERO);
        let err = StateFetcher::new(config).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert!(err.to_string().contains("timeout"));

        let config = ConnectionConfig::new("http://localhost:8080")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert!(StateFetcher::new(config).is_ok());
    }

    #[test]
    fn test_truncate_short_body() {
        assert_eq!(truncate_body(b"internal error"), "internal error");
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "é".repeat(MAX_ERROR_BODY_BYTES);
        let truncated = truncate_body(body.as_bytes());
        assert!(truncated.len() < body.len());
        assert!(truncated.ends_with("bytes truncated)"));
        assert!(truncated.starts_with("éé"));
    }
}
