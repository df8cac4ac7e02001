//! Catalog page served for a store

use serde::{Deserialize, Serialize};

use super::{Product, StoreOwner};

/// One page of a store's public catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// `None` only for pages past the first when the store lookup found nothing
    pub store_owner: Option<StoreOwner>,
    pub products: Vec<Product>,
    pub page: u32,
    pub page_size: u32,
}

impl CatalogPage {
    /// Empty page, used to let pagination run out quietly
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            store_owner: None,
            products: Vec::new(),
            page,
            page_size,
        }
    }

    /// Whether a full page came back, i.e. a next page may exist
    pub fn has_more(&self) -> bool {
        self.page_size > 0 && self.products.len() >= self.page_size as usize
    }
}
