//! Shared types for the storefront
//!
//! Domain models, the unified error system and the wire types of the
//! view-count endpoint, used by both the client library and the service.

pub mod error;
pub mod models;
pub mod util;
pub mod view_count;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
