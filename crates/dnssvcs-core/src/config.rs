//! Provider configuration
//!
//! The configuration is read once when the provider is constructed. Zone
//! clients are built from it (one per zone) and never change afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default API endpoint of the DNS Services instance
pub const DEFAULT_ENDPOINT: &str = "https://api.dns-svcs.cloud.ibm.com/v1";

/// DNS Services provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key used by zone clients to authenticate
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// DNS Services instance that owns the zones
    pub instance_id: String,

    /// User agent sent with every request
    #[serde(default)]
    pub user_agent: String,

    /// Zone ids managed by this provider
    pub zones: Vec<String>,

    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Retry policy applied by zone clients
    #[serde(default)]
    pub retry: RetryConfig,
}

// Custom Debug implementation that hides the API key
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<REDACTED>")
            .field("instance_id", &self.instance_id)
            .field("user_agent", &self.user_agent)
            .field("zones", &self.zones)
            .field("endpoint", &self.endpoint)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration with default endpoint and retry policy
    pub fn new(
        api_key: impl Into<String>,
        instance_id: impl Into<String>,
        zones: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            instance_id: instance_id.into(),
            user_agent: String::new(),
            zones: zones.into_iter().map(Into::into).collect(),
            endpoint: default_endpoint(),
            retry: RetryConfig::default(),
        }
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Load configuration from `DNSSVCS_*` environment variables
    ///
    /// - `DNSSVCS_API_KEY` (required)
    /// - `DNSSVCS_INSTANCE_ID` (required)
    /// - `DNSSVCS_ZONES`: comma-separated zone ids (required)
    /// - `DNSSVCS_USER_AGENT`
    /// - `DNSSVCS_ENDPOINT`
    /// - `DNSSVCS_MAX_RETRIES`
    /// - `DNSSVCS_RETRY_INTERVAL_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config(format!("{key} is required")))
        };

        let retry_defaults = RetryConfig::default();
        let config = Self {
            api_key: required("DNSSVCS_API_KEY")?,
            instance_id: required("DNSSVCS_INSTANCE_ID")?,
            user_agent: lookup("DNSSVCS_USER_AGENT").unwrap_or_default(),
            zones: required("DNSSVCS_ZONES")?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            endpoint: lookup("DNSSVCS_ENDPOINT").unwrap_or_else(default_endpoint),
            retry: RetryConfig {
                max_retries: parse_or("DNSSVCS_MAX_RETRIES", &lookup, retry_defaults.max_retries)?,
                retry_interval_secs: parse_or(
                    "DNSSVCS_RETRY_INTERVAL_SECS",
                    &lookup,
                    retry_defaults.retry_interval_secs,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.zones.is_empty() {
            return Err(Error::config("missing zone data"));
        }
        if self.zones.iter().any(String::is_empty) {
            return Err(Error::config("zone ids cannot be empty"));
        }
        if self.instance_id.is_empty() {
            return Err(Error::config("instance id cannot be empty"));
        }
        if self.api_key.is_empty() {
            return Err(Error::config("API key cannot be empty"));
        }
        if self.endpoint.is_empty() {
            return Err(Error::config("endpoint cannot be empty"));
        }
        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("{key} has an invalid value: {value:?}"))),
        None => Ok(default),
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Retry policy handed to zone clients at construction time
///
/// The reconciler itself never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retry attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum interval between retries (in seconds)
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_interval_secs: default_retry_interval_secs(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_interval_secs() -> u64 {
    5
}
