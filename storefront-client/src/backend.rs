//! Backend seams
//!
//! [`Backend`] covers the data store (tables and RPC), [`ObjectStorage`] the
//! image bucket. [`crate::RestClient`] implements both; tests substitute
//! in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::ClientResult;
use crate::catalog::{CatalogQuery, PageRange, RawStoreRow};

/// Data store surface: one joined catalog read, inserts, and RPC
#[async_trait]
pub trait Backend: Send + Sync {
    /// Run the joined owner → products → images/variants query.
    ///
    /// Returns `Ok(None)` when no store matches the slug.
    async fn store_catalog(
        &self,
        query: &CatalogQuery,
        range: PageRange,
    ) -> ClientResult<Option<RawStoreRow>>;

    /// Insert a single row into `table`
    async fn insert(&self, table: &str, row: Value) -> ClientResult<()>;

    /// Call a remote procedure, returning its JSON result (`Null` for void)
    async fn rpc(&self, function: &str, args: Value) -> ClientResult<Value>;
}

/// Object storage surface for one bucket
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload an object; existing objects are not overwritten
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> ClientResult<()>;

    /// Public URL for an object path
    fn public_url(&self, path: &str) -> String;

    /// Remove several objects in one call
    async fn remove(&self, paths: &[String]) -> ClientResult<()>;

    /// Fetch an object (or any image URL) back as bytes
    async fn download(&self, url: &str) -> ClientResult<Vec<u8>>;

    /// Object path behind a public URL of this bucket
    fn path_from_url(&self, url: &str) -> Option<String> {
        let prefix = self.public_url("");
        let url = url.split(['?', '#']).next()?;
        let path = url.strip_prefix(prefix.as_str())?;
        (!path.is_empty()).then(|| path.to_string())
    }
}

/// Outcome of a write whose failure must not affect the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort {
    Ok,
    Degraded(String),
}

impl BestEffort {
    /// Collapse a result, keeping only the failure reason
    pub fn from_result<T, E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::Degraded(e.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bucket;

    #[async_trait]
    impl ObjectStorage for Bucket {
        async fn upload(&self, _: &str, _: Vec<u8>, _: &str) -> ClientResult<()> {
            Ok(())
        }
        fn public_url(&self, path: &str) -> String {
            format!("https://cdn.test/storage/v1/object/public/products/{path}")
        }
        async fn remove(&self, _: &[String]) -> ClientResult<()> {
            Ok(())
        }
        async fn download(&self, _: &str) -> ClientResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_path_from_url() {
        let bucket = Bucket;
        assert_eq!(
            bucket.path_from_url(
                "https://cdn.test/storage/v1/object/public/products/u1/17-abc.webp?v=2"
            ),
            Some("u1/17-abc.webp".to_string())
        );
        assert_eq!(
            bucket.path_from_url("https://elsewhere.test/u1/17-abc.webp"),
            None
        );
        assert_eq!(
            bucket.path_from_url("https://cdn.test/storage/v1/object/public/products/"),
            None
        );
    }

    #[test]
    fn test_best_effort_from_result() {
        assert_eq!(BestEffort::from_result::<(), &str>(Ok(())), BestEffort::Ok);
        let degraded = BestEffort::from_result::<(), _>(Err("table missing"));
        assert!(degraded.is_degraded());
        assert_eq!(degraded, BestEffort::Degraded("table missing".to_string()));
    }
}
