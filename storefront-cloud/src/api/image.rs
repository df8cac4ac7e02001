//! Product image API
//!
//! POST /api/images: multipart (`file`, `owner_id`, optional `sizes=false`)
//! → validate → compress to WebP → upload canonical + sizes
//!
//! DELETE /api/images: `{ url }` → remove the image and all of its sizes

use axum::extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use storefront_client::UploadedImage;

use crate::error::ServiceResult;
use crate::state::AppState;

/// Maximum file size (10MB)
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Request body cap, leaving room for the other form fields
const MAX_BODY_SIZE: usize = MAX_FILE_SIZE + 64 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/images", post(upload_image).delete(delete_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(ErrorCode::FileTooLarge)
            .with_detail("max_bytes", MAX_FILE_SIZE as u64);
    }
    AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
}

/// Fields collected from the upload form
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(Option<String>, Vec<u8>)>,
    owner_id: Option<String>,
    sizes: bool,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm {
            sizes: true,
            ..Default::default()
        };

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" | "" => {
                    let filename = field.file_name().map(|s| s.to_string());
                    let data = field.bytes().await.map_err(multipart_error)?;
                    form.file = Some((filename, data.to_vec()));
                }
                "owner_id" => {
                    form.owner_id = Some(field.text().await.map_err(multipart_error)?);
                }
                "sizes" => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.sizes = !value.trim().eq_ignore_ascii_case("false");
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Validate the file part, returning its bytes
fn validate_file(file: Option<(Option<String>, Vec<u8>)>) -> Result<Vec<u8>, AppError> {
    let (filename, data) = file.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large: {} bytes (max {})",
                data.len(),
                MAX_FILE_SIZE
            ),
        ));
    }

    let filename = filename.unwrap_or_default();
    let ext = std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!("Unsupported format: {ext}. Supported: png, jpg, jpeg, webp"),
        ));
    }

    Ok(data)
}

/// POST /api/images: upload a product image
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ServiceResult<ApiResponse<UploadedImage>> {
    let form = UploadForm::read(multipart).await?;

    let owner_id = form
        .owner_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "owner_id is required"))?;
    let data = validate_file(form.file)?;

    let uploaded = state
        .images
        .upload_optimized_image(data, &owner_id, form.sizes)
        .await?;

    Ok(ApiResponse::success(uploaded))
}

#[derive(Debug, Deserialize)]
pub struct DeleteImageRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    /// Object paths targeted by the delete
    pub removed: Vec<String>,
}

/// DELETE /api/images: delete an image and all of its sizes
pub async fn delete_image(
    State(state): State<AppState>,
    Json(req): Json<DeleteImageRequest>,
) -> ServiceResult<ApiResponse<DeleteImageResponse>> {
    let removed = state.images.delete_image_with_variants(&req.url).await?;
    tracing::info!(url = %req.url, count = removed.len(), "Product image deleted");
    Ok(ApiResponse::success(DeleteImageResponse { removed }))
}
