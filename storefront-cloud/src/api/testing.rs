//! In-memory backend and storage for handler tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use storefront_client::catalog::{CatalogQuery, PageRange, RawStoreRow};
use storefront_client::{Backend, ClientError, ClientResult, ObjectStorage};
use tower::ServiceExt;

use crate::state::AppState;

pub const PUBLIC_PREFIX: &str = "https://backend.test/storage/v1/object/public/products/";

#[derive(Default)]
pub struct StubBackend {
    pub store: Option<Value>,
    pub fail_catalog: bool,
    pub fail_insert: bool,
    pub fail_rpc: bool,
    pub panic_rpc: bool,
    pub queries: Mutex<Vec<(CatalogQuery, PageRange)>>,
    pub inserts: Mutex<Vec<(String, Value)>>,
    pub rpcs: Mutex<Vec<(String, Value)>>,
}

#[async_trait]
impl Backend for StubBackend {
    async fn store_catalog(
        &self,
        query: &CatalogQuery,
        range: PageRange,
    ) -> ClientResult<Option<RawStoreRow>> {
        self.queries.lock().unwrap().push((query.clone(), range));
        if self.fail_catalog {
            return Err(ClientError::Internal("connection reset".into()));
        }
        match &self.store {
            Some(store) => Ok(Some(serde_json::from_value(store.clone())?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<()> {
        if self.fail_insert {
            return Err(ClientError::Validation("insert rejected".into()));
        }
        self.inserts.lock().unwrap().push((table.to_string(), row));
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Value) -> ClientResult<Value> {
        if self.panic_rpc {
            panic!("counter function state corrupted");
        }
        if self.fail_rpc {
            return Err(ClientError::Internal("function raised".into()));
        }
        self.rpcs.lock().unwrap().push((function.to_string(), args));
        Ok(Value::Null)
    }
}

#[derive(Default)]
pub struct StubStorage {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStorage for StubStorage {
    async fn upload(&self, path: &str, data: Vec<u8>, _content_type: &str) -> ClientResult<()> {
        self.objects.lock().unwrap().insert(path.to_string(), data);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{PUBLIC_PREFIX}{path}")
    }

    async fn remove(&self, paths: &[String]) -> ClientResult<()> {
        let mut objects = self.objects.lock().unwrap();
        for path in paths {
            objects.remove(path);
        }
        self.removed.lock().unwrap().extend_from_slice(paths);
        Ok(())
    }

    async fn download(&self, url: &str) -> ClientResult<Vec<u8>> {
        Err(ClientError::NotFound(url.to_string()))
    }
}

pub fn app(backend: Arc<StubBackend>, storage: Arc<StubStorage>) -> Router {
    crate::api::create_router(AppState::with_clients(
        backend,
        storage,
        Duration::from_secs(5),
    ))
}

/// Drive one request through the router, returning status and JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
