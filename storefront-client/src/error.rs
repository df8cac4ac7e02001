//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend did not answer before the deadline
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// No store matches the slug
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// Source bytes could not be decoded as an image
    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    /// URL does not point into the image bucket
    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(String),

    /// Object storage rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
