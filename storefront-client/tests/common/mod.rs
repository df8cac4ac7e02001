//! In-memory backend and storage shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use storefront_client::catalog::{CatalogQuery, PageRange, RawStoreRow};
use storefront_client::{Backend, ClientError, ClientResult, ObjectStorage};

pub const PUBLIC_PREFIX: &str = "https://backend.test/storage/v1/object/public/products/";

/// Backend returning a canned store row
#[derive(Default)]
pub struct FakeBackend {
    pub store: Option<Value>,
    pub delay: Option<Duration>,
    pub fail_insert: bool,
    pub fail_rpc: bool,
    pub calls: Mutex<Vec<(CatalogQuery, PageRange)>>,
    pub inserts: Mutex<Vec<(String, Value)>>,
    pub rpcs: Mutex<Vec<(String, Value)>>,
}

impl FakeBackend {
    pub fn with_store(store: Value) -> Self {
        Self {
            store: Some(store),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn store_catalog(
        &self,
        query: &CatalogQuery,
        range: PageRange,
    ) -> ClientResult<Option<RawStoreRow>> {
        self.calls.lock().unwrap().push((query.clone(), range));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.store {
            Some(store) => Ok(Some(serde_json::from_value(store.clone())?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<()> {
        if self.fail_insert {
            return Err(ClientError::NotFound(format!("relation {table} does not exist")));
        }
        self.inserts.lock().unwrap().push((table.to_string(), row));
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Value) -> ClientResult<Value> {
        if self.fail_rpc {
            return Err(ClientError::Internal("function failed".to_string()));
        }
        self.rpcs.lock().unwrap().push((function.to_string(), args));
        Ok(Value::Null)
    }
}

/// Bucket kept in a map; uploads whose path contains `fail_on` are rejected
#[derive(Default)]
pub struct MemoryStorage {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    pub removed: Mutex<Vec<Vec<String>>>,
    pub fail_on: Option<String>,
    pub fail_remove: bool,
    pub remote: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Default::default()
        }
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.objects.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> ClientResult<()> {
        if self.fail_on.as_deref().is_some_and(|m| path.contains(m)) {
            return Err(ClientError::Storage(format!("upload {path} rejected")));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (data, content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{PUBLIC_PREFIX}{path}")
    }

    async fn remove(&self, paths: &[String]) -> ClientResult<()> {
        self.removed.lock().unwrap().push(paths.to_vec());
        if self.fail_remove {
            return Err(ClientError::Storage("remove rejected".to_string()));
        }
        let mut objects = self.objects.lock().unwrap();
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    async fn download(&self, url: &str) -> ClientResult<Vec<u8>> {
        if let Some(path) = self.path_from_url(url) {
            if let Some((data, _)) = self.objects.lock().unwrap().get(&path) {
                return Ok(data.clone());
            }
        }
        self.remote
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(url.to_string()))
    }
}

/// PNG of the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 251) as u8, (y % 241) as u8, 90])
    });
    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    buffer
}

/// Raw product row as the backend join returns it
pub fn product_row(id: &str, position: Option<i32>, created_at: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "description": "Hand made",
        "sku": format!("SKU-{id}"),
        "price": 12.5,
        "stock_quantity": 5,
        "is_available": true,
        "category": "ceramics",
        "position": position,
        "created_at": created_at,
        "updated_at": created_at,
        "product_images": [
            {"id": format!("{id}-i3"), "product_id": id, "url": format!("https://cdn.test/{id}-3.webp"), "position": 3, "created_at": created_at},
            {"id": format!("{id}-i1"), "product_id": id, "url": format!("https://cdn.test/{id}-1.webp"), "position": 1, "created_at": created_at},
            {"id": format!("{id}-i2"), "product_id": id, "url": format!("https://cdn.test/{id}-2.webp"), "position": 2, "created_at": created_at}
        ],
        "product_variants": [
            {"id": format!("{id}-v3"), "product_id": id, "name": "Hidden", "sku": "H", "price_modifier": 0, "stock_quantity": 10, "is_available": false, "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"},
            {"id": format!("{id}-v2"), "product_id": id, "name": "Large", "sku": "L", "price_modifier": 4, "stock_quantity": 2, "is_available": true, "created_at": "2024-03-01T00:00:00Z", "updated_at": "2024-03-01T00:00:00Z"},
            {"id": format!("{id}-v0"), "product_id": id, "name": "Sold out", "sku": "S", "price_modifier": 1, "stock_quantity": 0, "is_available": true, "created_at": "2024-01-15T00:00:00Z", "updated_at": "2024-01-15T00:00:00Z"},
            {"id": format!("{id}-v1"), "product_id": id, "name": "Small", "sku": "M", "price_modifier": 0, "stock_quantity": 7, "is_available": true, "created_at": "2024-02-01T00:00:00Z", "updated_at": "2024-02-01T00:00:00Z"}
        ]
    })
}
