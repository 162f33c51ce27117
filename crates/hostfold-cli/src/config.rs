//! Configuration loading and types
//!
//! Settings are layered: `CONTROLLER_*` environment variables first, then the
//! config file, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{WrapErr, bail, eyre};
use hostfold_client::{ConnectionConfig, Credentials};
use serde::{Deserialize, Serialize};

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// State endpoint connection
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Connection settings, every field optional so layers can be merged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Base URL of the controller API
    pub host: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Skip TLS certificate verification
    pub insecure_skip_verify: Option<bool>,
    /// Path of the state document, relative to `host`
    pub state_endpoint: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be loaded
    pub fn load_default() -> eyre::Result<Self> {
        if let Ok(path) = std::env::var("HOSTFOLD_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        let mut paths = vec![
            PathBuf::from("hostfold.toml"),
            PathBuf::from("/etc/hostfold/hostfold.toml"),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("hostfold/hostfold.toml"));
        }

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Config::default())
    }
}

impl ControllerConfig {
    /// Read `CONTROLLER_*` variables from the process environment
    ///
    /// # Errors
    /// Returns error if `CONTROLLER_INSECURE_SKIP_VERIFY` is not a boolean
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read `CONTROLLER_*` variables through `lookup`
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    /// Returns error if `CONTROLLER_INSECURE_SKIP_VERIFY` is not a boolean or
    /// `CONTROLLER_TIMEOUT_SECS` is not a positive number
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let insecure_skip_verify = var("CONTROLLER_INSECURE_SKIP_VERIFY")
            .map(|raw| {
                parse_bool(&raw).ok_or_else(|| {
                    eyre!("CONTROLLER_INSECURE_SKIP_VERIFY is not a valid boolean: {raw:?}")
                })
            })
            .transpose()?;

        let timeout_secs = var("CONTROLLER_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .wrap_err_with(|| format!("CONTROLLER_TIMEOUT_SECS is not a number: {raw:?}"))
            })
            .transpose()?;
        if timeout_secs == Some(0) {
            bail!("CONTROLLER_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            host: var("CONTROLLER_HOST"),
            username: var("CONTROLLER_USERNAME"),
            password: var("CONTROLLER_PASSWORD"),
            insecure_skip_verify,
            state_endpoint: var("CONTROLLER_STATE_ENDPOINT"),
            timeout_secs,
        })
    }

    /// Layer `other` on top of `self`; values set in `other` win
    #[must_use]
    pub fn overlay(self, other: ControllerConfig) -> Self {
        Self {
            host: other.host.or(self.host),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            insecure_skip_verify: other.insecure_skip_verify.or(self.insecure_skip_verify),
            state_endpoint: other.state_endpoint.or(self.state_endpoint),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Build the client connection settings
    ///
    /// # Errors
    /// Returns error if no host is configured, the host is not a valid URL, or
    /// the timeout is zero
    pub fn connection(&self) -> eyre::Result<ConnectionConfig> {
        let Some(host) = self.host.as_deref().filter(|h| !h.trim().is_empty()) else {
            bail!(
                "missing controller host: set --host, `controller.host` in the config file, \
                 or the CONTROLLER_HOST environment variable"
            );
        };

        let mut connection = ConnectionConfig::new(host)?
            .with_credentials(Credentials::from_parts(
                self.username.clone(),
                self.password.clone(),
            ))
            .with_insecure_skip_verify(self.insecure_skip_verify.unwrap_or(false));
        if let Some(endpoint) = &self.state_endpoint {
            connection = connection.with_state_endpoint(endpoint.clone());
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                bail!("controller timeout_secs must be greater than zero");
            }
            connection = connection.with_timeout(Duration::from_secs(secs));
        }
        Ok(connection)
    }
}

/// Accepts 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
