//! Image upload pipeline
//!
//! Upload flow:
//! 1. Compress to the canonical 1200px WebP and upload it (must succeed)
//! 2. Optionally compress and upload thumbnail/medium/large concurrently;
//!    a size that fails is logged and left out of the result
//!
//! Objects: `{owner_id}/{millis}-{random}[-{size}].webp`. An image that
//! cannot be re-encoded is stored as uploaded under its own extension.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::compress::{CompressOptions, CompressedImage, compress_blocking};
use super::naming::{ImageSize, ImageVariantName};
use crate::{ClientError, ClientResult, ObjectStorage};

/// Public URLs of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadedImage {
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

impl UploadedImage {
    /// URL for a size, if that size was stored
    pub fn url(&self, size: ImageSize) -> Option<&str> {
        match size {
            ImageSize::Original => Some(&self.original),
            ImageSize::Thumbnail => self.thumbnail.as_deref(),
            ImageSize::Medium => self.medium.as_deref(),
            ImageSize::Large => self.large.as_deref(),
        }
    }
}

/// One input to [`ImagePipeline::batch_process_images`]
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Freshly supplied encoded bytes
    File(Vec<u8>),
    /// Already stored image to be re-processed
    Url(String),
}

/// Compresses and stores product images in one bucket
#[derive(Clone)]
pub struct ImagePipeline {
    storage: Arc<dyn ObjectStorage>,
}

impl ImagePipeline {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Compress and upload one image, optionally with its smaller sizes
    pub async fn upload_optimized_image(
        &self,
        data: Vec<u8>,
        owner_id: &str,
        generate_sizes: bool,
    ) -> ClientResult<UploadedImage> {
        if owner_id.is_empty() || owner_id.contains('/') {
            return Err(ClientError::Validation(format!(
                "Invalid owner id: {owner_id:?}"
            )));
        }

        let data: Arc<[u8]> = data.into();
        let name = ImageVariantName::generate(owner_id);

        let original = self
            .store_size(data.clone(), &name, ImageSize::Original)
            .await?;

        let mut uploaded = UploadedImage {
            original,
            ..Default::default()
        };

        if generate_sizes {
            let (thumbnail, medium, large) = futures::join!(
                self.store_size_lenient(data.clone(), &name, ImageSize::Thumbnail),
                self.store_size_lenient(data.clone(), &name, ImageSize::Medium),
                self.store_size_lenient(data, &name, ImageSize::Large),
            );
            uploaded.thumbnail = thumbnail;
            uploaded.medium = medium;
            uploaded.large = large;
        }

        tracing::info!(
            owner_id = %owner_id,
            base = %name.base,
            sizes = generate_sizes,
            "Product image uploaded"
        );

        Ok(uploaded)
    }

    /// Compress to one size, upload it, return its public URL
    async fn store_size(
        &self,
        data: Arc<[u8]>,
        name: &ImageVariantName,
        size: ImageSize,
    ) -> ClientResult<String> {
        let compressed = compress_blocking(data, CompressOptions::for_size(size)).await?;
        let path = object_path(name, size, &compressed).ok_or_else(|| {
            ClientError::ImageLoad(format!("{size} size could not be re-encoded"))
        })?;
        if !compressed.reencoded {
            tracing::warn!(
                path = %path,
                content_type = compressed.content_type,
                "Image stored as uploaded, re-encoding failed"
            );
        }
        self.storage
            .upload(&path, compressed.data, compressed.content_type)
            .await?;
        Ok(self.storage.public_url(&path))
    }

    async fn store_size_lenient(
        &self,
        data: Arc<[u8]>,
        name: &ImageVariantName,
        size: ImageSize,
    ) -> Option<String> {
        match self.store_size(data, name, size).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(base = %name.base, size = %size, error = %e, "Image size upload failed, omitting");
                None
            }
        }
    }

    /// Delete an image together with all of its sizes.
    ///
    /// Any size's URL identifies the whole set. Names outside the variant
    /// scheme delete just that object. Removal is best effort: failures
    /// are logged. Returns the paths that were targeted.
    pub async fn delete_image_with_variants(&self, url: &str) -> ClientResult<Vec<String>> {
        let path = self
            .storage
            .path_from_url(url)
            .ok_or_else(|| ClientError::InvalidImageUrl(url.to_string()))?;

        let paths = match ImageVariantName::parse(&path) {
            Some(name) => name.sibling_paths(),
            None => vec![path],
        };

        if let Err(e) = self.storage.remove(&paths).await {
            tracing::warn!(paths = ?paths, error = %e, "Image delete failed");
        }
        Ok(paths)
    }

    /// Process new files and stored URLs one after another.
    ///
    /// Sequential on purpose to keep storage load flat. Each item gets its
    /// own result; one failure does not stop the rest.
    pub async fn batch_process_images(
        &self,
        sources: Vec<ImageSource>,
        owner_id: &str,
    ) -> Vec<ClientResult<UploadedImage>> {
        let mut results = Vec::with_capacity(sources.len());

        for (index, source) in sources.into_iter().enumerate() {
            let result = match source {
                ImageSource::File(data) => self.upload_optimized_image(data, owner_id, true).await,
                ImageSource::Url(url) => match self.storage.download(&url).await {
                    Ok(data) => self.upload_optimized_image(data, owner_id, true).await,
                    Err(e) => Err(e),
                },
            };

            if let Err(e) = &result {
                tracing::warn!(index, owner_id = %owner_id, error = %e, "Batch image failed");
            }
            results.push(result);
        }

        results
    }
}

/// Object path for a compressed size.
///
/// Re-encoded output is WebP. A canonical image that could only be passed
/// through keeps its own extension so the name matches the bytes. Smaller
/// sizes get no path in that case since they would just duplicate it.
fn object_path(
    name: &ImageVariantName,
    size: ImageSize,
    compressed: &CompressedImage,
) -> Option<String> {
    (compressed.reencoded || size == ImageSize::Original)
        .then(|| name.path_with_extension(size, compressed.extension))
}
