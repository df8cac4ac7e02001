//! Image compression
//!
//! Decode → fit within a bounding box → re-encode. Decoding failures are
//! errors; encoding failures fall back to the untouched source bytes.

use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use super::naming::ImageSize;
use crate::{ClientError, ClientResult};

/// Quality used for every stored rendition
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossy WebP via libwebp
    #[default]
    Webp,
    Jpeg,
    /// Quality is ignored
    Png,
}

impl OutputFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Compression parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// 0.0 to 1.0
    pub quality: f32,
    pub format: OutputFormat,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self::for_size(ImageSize::Original)
    }
}

impl CompressOptions {
    /// Square box for a rendition size, WebP at the default quality
    pub fn for_size(size: ImageSize) -> Self {
        Self {
            max_width: size.max_dimension(),
            max_height: size.max_dimension(),
            quality: DEFAULT_QUALITY,
            format: OutputFormat::Webp,
        }
    }

    /// Quality mapped to the JPEG 1-100 scale
    fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
    }

    /// Quality on libwebp's 0-100 scale
    fn webp_quality(&self) -> f32 {
        self.quality.clamp(0.0, 1.0) * 100.0
    }
}

/// Result of a compression pass
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
    /// File extension matching `content_type`
    pub extension: &'static str,
    /// `false` when encoding failed and `data` is the untouched input
    pub reencoded: bool,
}

impl CompressedImage {
    /// Wrap the untouched source bytes
    fn passthrough(data: &[u8], width: u32, height: u32) -> Self {
        let format = image::guess_format(data).ok();
        Self {
            data: data.to_vec(),
            width,
            height,
            content_type: format.map_or("application/octet-stream", |f| f.to_mime_type()),
            extension: format
                .and_then(|f| f.extensions_str().first().copied())
                .unwrap_or("bin"),
            reencoded: false,
        }
    }
}

/// Target dimensions fitting `width × height` inside `max_width × max_height`.
///
/// Aspect ratio is preserved, images already inside the box are left as
/// they are, and no side drops below 1 px.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let w = (f64::from(width) * scale).round() as u32;
    let h = (f64::from(height) * scale).round() as u32;
    (w.clamp(1, max_width.max(1)), h.clamp(1, max_height.max(1)))
}

/// Compress an encoded image according to `options`
pub fn compress(data: &[u8], options: &CompressOptions) -> ClientResult<CompressedImage> {
    let img = image::load_from_memory(data).map_err(|e| ClientError::ImageLoad(e.to_string()))?;
    let (src_w, src_h) = img.dimensions();
    let (width, height) = fit_within(src_w, src_h, options.max_width, options.max_height);

    let resized = if (width, height) == (src_w, src_h) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    match encode(&resized, options) {
        Ok(buffer) => Ok(CompressedImage {
            data: buffer,
            width,
            height,
            content_type: options.format.content_type(),
            extension: options.format.extension(),
            reencoded: true,
        }),
        Err(e) => {
            tracing::warn!(error = %e, format = ?options.format, "Image encode failed, keeping original");
            Ok(CompressedImage::passthrough(data, src_w, src_h))
        }
    }
}

fn encode(img: &DynamicImage, options: &CompressOptions) -> Result<Vec<u8>, String> {
    if options.format == OutputFormat::Webp {
        return encode_webp(img, options.webp_quality());
    }

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let written = match options.format {
            OutputFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut cursor, options.jpeg_quality());
                img.to_rgb8().write_with_encoder(encoder)
            }
            _ => {
                let encoder = PngEncoder::new(&mut cursor);
                img.to_rgba8().write_with_encoder(encoder)
            }
        };
        written.map_err(|e| e.to_string())?;
    }
    Ok(buffer)
}

/// Lossy WebP; the alpha channel is kept only when the source has one
fn encode_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, String> {
    let (width, height) = img.dimensions();
    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        encoder.encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
        encoder.encode_simple(false, quality)
    };
    encoded
        .map(|memory| memory.to_vec())
        .map_err(|e| format!("webp encode failed: {e:?}"))
}

/// Run [`compress`] on the blocking pool
pub async fn compress_blocking(
    data: Arc<[u8]>,
    options: CompressOptions,
) -> ClientResult<CompressedImage> {
    tokio::task::spawn_blocking(move || compress(&data, &options))
        .await
        .map_err(|e| ClientError::Internal(format!("compression task failed: {e}")))?
}

/// All four renditions of one source image
#[derive(Debug, Clone)]
pub struct ResponsiveImages {
    pub thumbnail: CompressedImage,
    pub medium: CompressedImage,
    pub large: CompressedImage,
    pub original: CompressedImage,
}

impl ResponsiveImages {
    pub fn get(&self, size: ImageSize) -> &CompressedImage {
        match size {
            ImageSize::Thumbnail => &self.thumbnail,
            ImageSize::Medium => &self.medium,
            ImageSize::Large => &self.large,
            ImageSize::Original => &self.original,
        }
    }
}

/// Compress to 150/300/600/1200 px WebP boxes concurrently
pub async fn generate_responsive_images(data: Arc<[u8]>) -> ClientResult<ResponsiveImages> {
    let (thumbnail, medium, large, original) = tokio::try_join!(
        compress_blocking(data.clone(), CompressOptions::for_size(ImageSize::Thumbnail)),
        compress_blocking(data.clone(), CompressOptions::for_size(ImageSize::Medium)),
        compress_blocking(data.clone(), CompressOptions::for_size(ImageSize::Large)),
        compress_blocking(data, CompressOptions::for_size(ImageSize::Original)),
    )?;

    Ok(ResponsiveImages {
        thumbnail,
        medium,
        large,
        original,
    })
}
