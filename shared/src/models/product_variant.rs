//! Product Variant Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Purchasable sub-option of a product (`product_variants` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub sku: String,
    /// Added to the product's base price
    #[serde(with = "rust_decimal::serde::float")]
    pub price_modifier: Decimal,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductVariant {
    /// Whether the variant can be offered to buyers
    pub fn is_purchasable(&self) -> bool {
        self.is_available && self.stock_quantity > 0
    }
}

/// Keep purchasable variants only, oldest first.
pub fn surface_variants(variants: Vec<ProductVariant>) -> Vec<ProductVariant> {
    let mut surfaced: Vec<ProductVariant> = variants
        .into_iter()
        .filter(ProductVariant::is_purchasable)
        .collect();
    surfaced.sort_by_key(|v| v.created_at);
    surfaced
}
