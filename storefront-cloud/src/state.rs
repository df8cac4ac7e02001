//! Application state for storefront-cloud

use std::sync::Arc;
use std::time::Duration;

use storefront_client::{Backend, CatalogFetcher, ImagePipeline, ObjectStorage};

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
///
/// Only `Arc`ed clients; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Tables and RPC
    pub backend: Arc<dyn Backend>,
    /// Paginated public catalog
    pub catalog: CatalogFetcher,
    /// Image compression and storage
    pub images: ImagePipeline,
}

impl AppState {
    /// Create a new AppState backed by the REST client
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let client_config = config.client_config();
        let client = Arc::new(client_config.build_rest_client()?);
        tracing::info!(
            backend_url = %client_config.base_url,
            bucket = %client_config.bucket,
            "Backend client ready"
        );
        Ok(Self::with_clients(
            client.clone(),
            client,
            client_config.catalog_deadline(),
        ))
    }

    /// Assemble state from any backend and storage implementation
    pub fn with_clients(
        backend: Arc<dyn Backend>,
        storage: Arc<dyn ObjectStorage>,
        catalog_deadline: Duration,
    ) -> Self {
        Self {
            catalog: CatalogFetcher::new(backend.clone(), catalog_deadline),
            images: ImagePipeline::new(storage),
            backend,
        }
    }
}
