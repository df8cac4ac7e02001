//! Storefront Client - backend access for the catalog storefront
//!
//! Talks to the hosted data store (REST + RPC) and the object storage
//! bucket, and builds the storefront features on top:
//! - [`catalog`]: paginated public catalog fetch with per-row isolation
//! - [`image`](crate::image): compression, responsive sizes, upload and deletion
//! - [`card`]: product card view model with the WhatsApp contact link

pub mod backend;
pub mod card;
pub mod catalog;
pub mod config;
pub mod error;
pub mod image;
pub mod rest;

pub use backend::{Backend, BestEffort, ObjectStorage};
pub use card::ProductCard;
pub use catalog::{CatalogFetcher, CatalogQuery, PageRange};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use crate::image::{ImagePipeline, ImageSize, ImageSource, UploadedImage};
pub use rest::RestClient;

// Re-export shared models for convenience
pub use shared::models::{CatalogPage, Product, ProductImage, ProductVariant, StoreOwner};
