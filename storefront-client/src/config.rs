//! Client configuration

use crate::{ClientError, ClientResult};

/// Default storage bucket for product images
pub const DEFAULT_BUCKET: &str = "products";

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project base URL (e.g., "https://xyz.example.co")
    pub base_url: String,

    /// API key, sent as `apikey` and as the bearer token
    pub api_key: String,

    /// Storage bucket holding product images
    pub bucket: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Deadline for the catalog query in seconds
    pub catalog_timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration with default bucket and timeouts
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            timeout: 30,
            catalog_timeout: 10,
        }
    }

    /// Load from `STOREFRONT_*` environment variables
    ///
    /// `STOREFRONT_BACKEND_URL` and `STOREFRONT_API_KEY` are required; there is
    /// no built-in fallback endpoint.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = require_env("STOREFRONT_BACKEND_URL")?;
        let api_key = require_env("STOREFRONT_API_KEY")?;

        let mut config = Self::new(base_url, api_key);
        if let Ok(bucket) = std::env::var("STOREFRONT_BUCKET") {
            if !bucket.is_empty() {
                config.bucket = bucket;
            }
        }
        if let Some(secs) = parse_env("STOREFRONT_HTTP_TIMEOUT_SECS") {
            config.timeout = secs;
        }
        if let Some(secs) = parse_env("STOREFRONT_CATALOG_TIMEOUT_SECS") {
            config.catalog_timeout = secs;
        }
        Ok(config)
    }

    /// Set the storage bucket
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the catalog query deadline
    pub fn with_catalog_timeout(mut self, seconds: u64) -> Self {
        self.catalog_timeout = seconds;
        self
    }

    /// Catalog query deadline as a duration
    pub fn catalog_deadline(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.catalog_timeout)
    }

    /// Create a REST client from this configuration
    pub fn build_rest_client(&self) -> ClientResult<super::RestClient> {
        super::RestClient::new(self)
    }
}

fn require_env(name: &str) -> ClientResult<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ClientError::Config(format!("{name} must be set"))),
    }
}

fn parse_env(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
