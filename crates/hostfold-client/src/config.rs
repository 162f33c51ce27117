//! Connection configuration for the state endpoint

use std::fmt;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::{ClientError, Result};

/// HTTP Basic credentials
///
/// Username and password travel together; a half-configured pair is not
/// representable.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Pair up optional username and password
    ///
    /// Returns `None` unless both are present. When only one is given the
    /// request goes out unauthenticated instead of failing; a warning is
    /// logged so the half-configured pair does not go unnoticed.
    #[must_use]
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) => Some(Self::new(username, password)),
            (None, None) => None,
            (username, _) => {
                warn!(
                    username_set = username.is_some(),
                    "only one of username/password configured, authentication disabled"
                );
                None
            }
        }
    }

    /// Username
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how to reach the state endpoint
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    base_url: Url,
    credentials: Option<Credentials>,
    insecure_skip_verify: bool,
    state_endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Create a configuration for `base_url`
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`] if the URL does not parse, is
    /// not `http`/`https`, or carries a query or fragment (endpoint paths are
    /// appended to the base URL, which would land them inside the query).
    ///
    /// # Example
    /// ```
    /// use hostfold_client::{ConnectionConfig, Credentials};
    ///
    /// let config = ConnectionConfig::new("https://controller.example.com")?
    ///     .with_credentials(Some(Credentials::new("admin", "secret")))
    ///     .with_state_endpoint("/api/v2/state");
    /// assert!(config.credentials().is_some());
    /// # Ok::<(), hostfold_client::ClientError>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref().trim();
        let base_url = Url::parse(raw)
            .map_err(|e| ClientError::Configuration(format!("invalid base URL {raw:?}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "unsupported URL scheme {:?} in {raw:?}",
                base_url.scheme()
            )));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(ClientError::Configuration(format!(
                "base URL {raw:?} must not contain a query or fragment"
            )));
        }
        Ok(Self {
            base_url,
            credentials: None,
            insecure_skip_verify: false,
            state_endpoint: None,
            timeout: None,
        })
    }

    /// Set basic auth credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Skip TLS certificate verification
    #[must_use]
    pub fn with_insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.insecure_skip_verify = insecure;
        self
    }

    /// Set the default state endpoint path
    #[must_use]
    pub fn with_state_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.state_endpoint = Some(endpoint.into());
        self
    }

    /// Set a whole-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Basic auth credentials, if configured
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Whether TLS verification is disabled
    #[must_use]
    pub fn insecure_skip_verify(&self) -> bool {
        self.insecure_skip_verify
    }

    /// Default state endpoint path
    #[must_use]
    pub fn state_endpoint(&self) -> Option<&str> {
        self.state_endpoint.as_deref()
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Join the base URL and an endpoint path
    ///
    /// The base URL's own path is kept: `https://host/api` + `/state` gives
    /// `https://host/api/state`.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        let joined = format!("{base}/{path}");
        Url::parse(&joined)
            .map_err(|e| ClientError::Configuration(format!("invalid endpoint URL {joined:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = ConnectionConfig::new("http://localhost:8080").unwrap();
        assert!(config.credentials().is_none());
        assert!(!config.insecure_skip_verify());
        assert!(config.state_endpoint().is_none());
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            ConnectionConfig::new("not a url"),
            Err(ClientError::Configuration(_))
        ));
        assert!(matches!(
            ConnectionConfig::new("ftp://controller"),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn test_base_url_rejects_query_and_fragment() {
        let err = ConnectionConfig::new("http://localhost:8080/?token=x").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert!(err.to_string().contains("query"));

        assert!(ConnectionConfig::new("http://localhost:8080/api#state").is_err());
        assert!(ConnectionConfig::new("http://localhost:8080/api").is_ok());
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let config = ConnectionConfig::new("https://controller.example.com/api/").unwrap();
        let url = config.endpoint_url("/v2/state").unwrap();
        assert_eq!(url.as_str(), "https://controller.example.com/api/v2/state");

        let url = config.endpoint_url("v2/state?workspace=prod").unwrap();
        assert_eq!(
            url.as_str(),
            "https://controller.example.com/api/v2/state?workspace=prod"
        );
    }

    #[test]
    fn test_endpoint_url_bare_host() {
        let config = ConnectionConfig::new("http://localhost:8080").unwrap();
        let url = config.endpoint_url("/state").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/state");
    }

    #[test]
    fn test_credentials_from_parts() {
        let both = Credentials::from_parts(Some("admin".into()), Some("secret".into())).unwrap();
        assert_eq!(both.username(), "admin");
        assert_eq!(both.password(), "secret");

        assert!(Credentials::from_parts(Some("admin".into()), None).is_none());
        assert!(Credentials::from_parts(None, Some("secret".into())).is_none());
        assert!(Credentials::from_parts(None, None).is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("admin", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
