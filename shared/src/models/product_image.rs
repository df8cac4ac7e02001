//! Product Image Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product image entity (`product_images` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub url: String,
    /// Render order, ascending
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Sort images by position ascending. Stable, so ties keep backend order.
pub fn sort_images(images: &mut [ProductImage]) {
    images.sort_by_key(|img| img.position);
}
