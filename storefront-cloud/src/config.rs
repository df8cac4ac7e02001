//! Service configuration

use storefront_client::ClientConfig;
use storefront_client::config::DEFAULT_BUCKET;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// Backend project URL (REST and storage live under it)
    pub backend_url: String,
    /// Service key used for table, RPC and storage calls
    pub backend_service_key: String,
    /// Bucket holding product images
    pub storage_bucket: String,
    /// Outbound request timeout in seconds
    pub http_timeout_secs: u64,
    /// Catalog query deadline in seconds
    pub catalog_timeout_secs: u64,
}

impl Config {
    /// Require a secret env var: must be set everywhere, and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = std::env::var(name).map_err(|_| format!("{name} must be set"))?;
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            http_port: Self::parse_or("HTTP_PORT", 8080),
            backend_url: std::env::var("BACKEND_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .ok_or("BACKEND_URL must be set")?,
            backend_service_key: Self::require_secret("BACKEND_SERVICE_KEY", &environment)?,
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BUCKET.into()),
            http_timeout_secs: Self::parse_or("HTTP_TIMEOUT_SECS", 30),
            catalog_timeout_secs: Self::parse_or("CATALOG_TIMEOUT_SECS", 10),
            environment,
        })
    }

    /// Client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.backend_url, &self.backend_service_key)
            .with_bucket(&self.storage_bucket)
            .with_timeout(self.http_timeout_secs)
            .with_catalog_timeout(self.catalog_timeout_secs)
    }
}
