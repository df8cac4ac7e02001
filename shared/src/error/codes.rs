//! Error codes returned by the storefront service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Store errors
//! - 61xx: Image errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the front-end can
/// switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Malformed request body
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 3xxx: Store ====================
    /// No store matches the requested slug
    StoreNotFound = 3001,

    // ==================== 61xx: Image ====================
    /// File too large
    FileTooLarge = 6101,
    /// Unsupported file format
    UnsupportedFileFormat = 6102,
    /// Invalid image file (cannot be decoded)
    InvalidImageFile = 6103,
    /// No file provided
    NoFileProvided = 6104,
    /// Empty file provided
    EmptyFile = 6105,
    /// Object storage rejected the file
    FileStorageFailed = 6107,
    /// URL does not point into the image bucket
    InvalidImageUrl = 6108,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Backend did not answer in time
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            ErrorCode::StoreNotFound => "Store not found",

            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileStorageFailed => "File storage failed",
            ErrorCode::InvalidImageUrl => "Invalid image URL",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an unassigned u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            3001 => Ok(ErrorCode::StoreNotFound),

            6101 => Ok(ErrorCode::FileTooLarge),
            6102 => Ok(ErrorCode::UnsupportedFileFormat),
            6103 => Ok(ErrorCode::InvalidImageFile),
            6104 => Ok(ErrorCode::NoFileProvided),
            6105 => Ok(ErrorCode::EmptyFile),
            6107 => Ok(ErrorCode::FileStorageFailed),
            6108 => Ok(ErrorCode::InvalidImageUrl),

            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
