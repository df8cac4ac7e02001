//! Service-layer error type for storefront-cloud
//!
//! `ServiceError` bridges client errors (`ClientError`) and the API-layer
//! error (`AppError`) so handlers can use `?` on client calls directly.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use storefront_client::ClientError;

/// Service-layer error
///
/// - `Client`: backend, storage or image errors (mapped by kind, infrastructure ones logged)
/// - `App`: business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    Client(ClientError),
    App(AppError),
}

impl From<ClientError> for ServiceError {
    fn from(e: ClientError) -> Self {
        ServiceError::Client(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let client_err = match e {
            ServiceError::App(app_err) => return app_err,
            ServiceError::Client(client_err) => client_err,
        };

        match client_err {
            ClientError::StoreNotFound(slug) => AppError::store_not_found(slug),
            ClientError::Timeout(deadline) => {
                tracing::warn!(?deadline, "Backend timed out");
                AppError::timeout()
            }
            ClientError::ImageLoad(msg) => {
                AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {msg}"))
            }
            ClientError::InvalidImageUrl(url) => {
                AppError::new(ErrorCode::InvalidImageUrl).with_detail("url", url)
            }
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                AppError::new(ErrorCode::FileStorageFailed)
            }
            other => {
                tracing::error!(error = %other, "Backend error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn map(e: ClientError) -> AppError {
        ServiceError::from(e).into()
    }

    #[test]
    fn test_client_errors_map_by_kind() {
        assert_eq!(
            map(ClientError::StoreNotFound("bakery".into())).code,
            ErrorCode::StoreNotFound
        );
        assert_eq!(
            map(ClientError::Timeout(Duration::from_secs(10))).code,
            ErrorCode::TimeoutError
        );
        assert_eq!(
            map(ClientError::ImageLoad("bad header".into())).code,
            ErrorCode::InvalidImageFile
        );
        assert_eq!(
            map(ClientError::Storage("quota".into())).code,
            ErrorCode::FileStorageFailed
        );
    }

    #[test]
    fn test_infrastructure_errors_are_hidden() {
        let err = map(ClientError::Internal("pg: relation missing".into()));
        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(!err.message.contains("pg"));
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::from(AppError::validation("owner_id required")).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "owner_id required");
    }
}
