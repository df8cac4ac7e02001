//! Public catalog fetch
//!
//! One joined query per page (owner → products → images/variants), raced
//! against a deadline, then reshaped product by product. A product row that
//! does not match the expected schema is replaced by a degraded record so a
//! single bad row never takes down the page.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use serde_json::Value;

use shared::models::{
    CatalogPage, Product, ProductImage, ProductVariant, StoreOwner, sort_images,
    surface_variants,
};

use crate::{Backend, ClientError, ClientResult};

/// Default page size for catalog pages
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Catalog request for one store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub store_slug: String,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub category: Option<String>,
}

impl CatalogQuery {
    /// First page with the default page size
    pub fn new(store_slug: impl Into<String>) -> Self {
        Self {
            store_slug: store_slug.into(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            category: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Page number with 0 treated as 1
    pub fn effective_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size with 0 treated as the default
    pub fn effective_page_size(&self) -> u32 {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    /// Row window for this page
    pub fn range(&self) -> PageRange {
        PageRange::new(self.effective_page(), self.effective_page_size())
    }
}

/// Half-open row window `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub from: u64,
    pub to: u64,
}

impl PageRange {
    pub fn new(page: u32, page_size: u32) -> Self {
        let from = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        Self {
            from,
            to: from + u64::from(page_size),
        }
    }

    /// Number of rows in the window
    pub fn len(&self) -> u64 {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owner row as returned by the joined query; products stay raw so each
/// one can be decoded (and fail) on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStoreRow {
    pub store_name: Option<String>,
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub products: Vec<Value>,
}

impl RawStoreRow {
    pub fn owner(&self) -> StoreOwner {
        StoreOwner {
            store_name: self.store_name.clone().unwrap_or_default(),
            whatsapp_number: self.whatsapp_number.clone(),
        }
    }
}

/// Expected shape of one embedded product row
#[derive(Debug, Deserialize)]
struct RawProduct {
    id: String,
    name: String,
    description: Option<String>,
    sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    stock_quantity: i32,
    is_available: bool,
    category: Option<String>,
    position: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    product_images: Vec<ProductImage>,
    #[serde(default)]
    product_variants: Vec<ProductVariant>,
}

impl RawProduct {
    fn into_product(self) -> Product {
        let mut images = self.product_images;
        sort_images(&mut images);
        let variants = surface_variants(self.product_variants);
        let image_url = images.first().map(|img| img.url.clone());

        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            sku: self.sku,
            price: self.price,
            stock_quantity: self.stock_quantity,
            is_available: self.is_available,
            category: self.category,
            position: self.position,
            created_at: self.created_at,
            updated_at: self.updated_at,
            images,
            variants,
            image_url,
        }
    }
}

/// Reshape one raw product row, degrading instead of failing
pub fn reshape_product(raw: Value) -> Product {
    match RawProduct::deserialize(&raw) {
        Ok(product) => product.into_product(),
        Err(e) => {
            let product = degraded_product(&raw);
            tracing::warn!(
                product_id = %product.id,
                error = %e,
                "Product row failed to decode, serving degraded record"
            );
            product
        }
    }
}

/// Salvage what the row has, default the rest, drop images and variants
fn degraded_product(raw: &Value) -> Product {
    let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
    let timestamp = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default()
    };

    Product {
        id: text("id").unwrap_or_default(),
        name: text("name").unwrap_or_default(),
        description: text("description"),
        sku: text("sku").unwrap_or_default(),
        price: raw
            .get("price")
            .and_then(Value::as_f64)
            .and_then(Decimal::from_f64)
            .unwrap_or_default(),
        stock_quantity: raw
            .get("stock_quantity")
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or_default(),
        // The query only returns available products
        is_available: raw
            .get("is_available")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        category: text("category"),
        position: raw
            .get("position")
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok()),
        created_at: timestamp("created_at"),
        updated_at: timestamp("updated_at"),
        images: Vec::new(),
        variants: Vec::new(),
        image_url: None,
    }
}

/// Fetches public catalog pages through a [`Backend`]
#[derive(Clone)]
pub struct CatalogFetcher {
    backend: Arc<dyn Backend>,
    deadline: Duration,
}

impl CatalogFetcher {
    pub fn new(backend: Arc<dyn Backend>, deadline: Duration) -> Self {
        Self { backend, deadline }
    }

    /// Fetch one catalog page.
    ///
    /// A missing store fails page 1 with [`ClientError::StoreNotFound`];
    /// later pages come back empty so pagination can run out quietly.
    pub async fn fetch(&self, query: &CatalogQuery) -> ClientResult<CatalogPage> {
        let page = query.effective_page();
        let page_size = query.effective_page_size();
        let range = query.range();

        tracing::debug!(
            store_slug = %query.store_slug,
            page,
            from = range.from,
            to = range.to,
            category = ?query.category,
            "Fetching catalog page"
        );

        // On timeout the in-flight query is dropped, not cancelled remotely
        let row = match tokio::time::timeout(
            self.deadline,
            self.backend.store_catalog(query, range),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(store_slug = %query.store_slug, "Catalog query timed out");
                return Err(ClientError::Timeout(self.deadline));
            }
        };

        let Some(row) = row else {
            if page == 1 {
                return Err(ClientError::StoreNotFound(query.store_slug.clone()));
            }
            tracing::debug!(store_slug = %query.store_slug, page, "Store not found past first page");
            return Ok(CatalogPage::empty(page, page_size));
        };

        let owner = row.owner();
        let products: Vec<Product> = row.products.into_iter().map(reshape_product).collect();

        Ok(CatalogPage {
            store_owner: Some(owner),
            products,
            page,
            page_size,
        })
    }
}
