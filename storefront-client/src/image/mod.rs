//! Product image processing
//!
//! - [`compress`]: decode, fit within a box, re-encode
//! - [`naming`]: `<base>[-size].webp` object naming and URL bookkeeping
//! - [`upload`]: canonical + size variants to object storage, deletion, batches

pub mod compress;
pub mod naming;
pub mod upload;

pub use compress::{
    CompressOptions, CompressedImage, OutputFormat, ResponsiveImages, compress, fit_within,
    generate_responsive_images,
};
pub use naming::{ImageSize, ImageVariantName, variant_url};
pub use upload::{ImagePipeline, ImageSource, UploadedImage};
