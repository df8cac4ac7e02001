//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProductImage, ProductVariant};

/// Product as served to the storefront
///
/// `images` are sorted by position, `variants` hold only purchasable
/// variants (oldest first) and `image_url` is the first image, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    /// Base price, variant modifiers are added on top
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub category: Option<String>,
    /// Manual sort position (nulls sort last)
    pub position: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<ProductImage>,
    pub variants: Vec<ProductVariant>,
    pub image_url: Option<String>,
}

impl Product {
    /// Look up a surfaced variant by id
    pub fn variant(&self, variant_id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Base price plus the modifier of the given variant
    pub fn price_with(&self, variant: Option<&ProductVariant>) -> Decimal {
        self.price + variant.map_or(Decimal::ZERO, |v| v.price_modifier)
    }
}
