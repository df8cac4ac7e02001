//! Catalog data models
//!
//! Shaped types served to the storefront. Raw backend rows are decoded
//! separately by the catalog fetcher and reshaped into these.

pub mod catalog;
pub mod product;
pub mod product_image;
pub mod product_variant;
pub mod store_owner;

// Re-exports
pub use catalog::*;
pub use product::*;
pub use product_image::*;
pub use product_variant::*;
pub use store_owner::*;
